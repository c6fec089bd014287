//! Catalog files on disk

use super::ConfigError;
use crate::catalog::Catalog;
use std::path::Path;

/// Load a catalog, picking the format from the file extension
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = super::read_file(path)?;
    let catalog = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Catalog::from_json_str(&content)?,
        Some("toml") => Catalog::from_toml_str(&content)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    tracing::debug!(
        path = %path.display(),
        operators = catalog.operator_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("does/not/exist/catalog.json"));
        assert!(matches!(err, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_json_file() {
        let dir = std::env::temp_dir().join(format!("calc_core_catalog_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        fs::write(
            &path,
            r#"{"operators": [{"id": "op", "name": "Op", "element": "열기", "baseAttack": 280}]}"#,
        )
        .unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert!(catalog.operator("op").is_some());

        let bad = dir.join("catalog.txt");
        fs::write(&bad, "").unwrap();
        assert!(matches!(
            load_catalog(&bad),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
