//! Non-stack deduplication and UID uniqueness

use crate::effect::{Effect, EffectUid};
use std::collections::{HashMap, HashSet};

/// Make every UID unique within one collection.
///
/// Repeated UIDs get a `~n` suffix in harvest order, so the first
/// occurrence keeps the catalog-derived name.
pub fn ensure_unique_uids(effects: &mut [Effect]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(effects.len());
    let mut repeats: HashMap<String, u32> = HashMap::new();
    for effect in effects.iter_mut() {
        if seen.insert(effect.uid.0.clone()) {
            continue;
        }
        let base = effect.uid.0.clone();
        let counter = repeats.entry(base.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{base}~{counter}");
            if seen.insert(candidate.clone()) {
                tracing::trace!(uid = %base, renamed = %candidate, "duplicate uid renamed");
                effect.uid = EffectUid(candidate);
                break;
            }
        }
    }
}

/// Keep one effect per non-stack key.
///
/// The survivor is the effect with the best source priority; among equal
/// priorities the first harvested wins. Output order follows input order.
/// Returns the discarded effects.
pub fn dedup_non_stacking(effects: Vec<Effect>) -> (Vec<Effect>, Vec<Effect>) {
    let mut winners: HashMap<&str, (u8, usize)> = HashMap::new();
    for (index, effect) in effects.iter().enumerate() {
        let Some(key) = effect.non_stack_key.as_deref() else {
            continue;
        };
        let priority = effect.source.kind().priority();
        winners
            .entry(key)
            .and_modify(|best| {
                if priority < best.0 {
                    *best = (priority, index);
                }
            })
            .or_insert((priority, index));
    }
    let keep: HashSet<usize> = winners.values().map(|(_, index)| *index).collect();

    let mut kept = Vec::with_capacity(effects.len());
    let mut discarded = Vec::new();
    for (index, effect) in effects.into_iter().enumerate() {
        if effect.non_stack_key.is_none() || keep.contains(&index) {
            kept.push(effect);
        } else {
            tracing::trace!(uid = %effect.uid, "non-stacking duplicate discarded");
            discarded.push(effect);
        }
    }
    (kept, discarded)
}
