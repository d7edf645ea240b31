//! Loading the response catalog from disk at startup

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::template::{CatalogError, CatalogResult, TemplateCatalog};

/// Load the response catalog from `path`.
///
/// The format is chosen by extension: `.json`, `.yaml`/`.yml` or `.toml`.
/// Response ids and language tags are kept exactly as written.
pub fn load_catalog(path: impl AsRef<Path>) -> CatalogResult<TemplateCatalog> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = fs::read_to_string(path)?;
    let value: Value = match extension.as_str() {
        "json" => serde_json::from_str(&contents).map_err(|e| CatalogError::Parse(e.to_string()))?,
        "yaml" | "yml" => {
            serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse(e.to_string()))?
        }
        "toml" => toml::from_str(&contents).map_err(|e| CatalogError::Parse(e.to_string()))?,
        other => {
            return Err(CatalogError::Parse(format!(
                "unsupported catalog format '{}' for {}",
                other,
                path.display()
            )))
        }
    };

    let catalog = TemplateCatalog::from_value(value)?;

    tracing::info!(
        path = %path.display(),
        responses = catalog.len(),
        "Response catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ResponseEntry;
    use std::io::Write;

    #[test]
    fn test_load_json_catalog() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "utter_greet": [{{"text": "Hey {{name}}"}}],
                "utter_bye": {{"en": [{{"text": "Bye"}}]}}
            }}"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(matches!(
            catalog.get("utter_greet"),
            Some(ResponseEntry::Channel(v)) if v[0].text == Some(serde_json::json!("Hey {name}"))
        ));
    }

    #[test]
    fn test_load_toml_catalog() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[[utter_greet]]
text = "Hey {{name}}"

[[utter_greet]]
text = "Hey from slack"
channel = "slack"

[utter_Bye]
"pt-BR" = [{{ text = "Tchau" }}]
"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.get("utter_greet").unwrap().variant_count(), 2);
        assert!(matches!(
            catalog.get("utter_Bye"),
            Some(ResponseEntry::Language(by_language)) if by_language.contains_key("pt-BR")
        ));
    }

    #[test]
    fn test_yaml_catalog_keeps_keys_verbatim() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(
            file,
            r#"
utter_Greet:
  pt-BR:
    - text: "Olá {{name}}"
  en:
    - text: "Hello {{name}}"
utter.dot:
  - text: "Dotted"
  - text: "Dotted on slack"
    channel: slack
"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.ids(), vec!["utter.dot", "utter_Greet"]);
        assert!(catalog.contains("utter_Greet"));
        assert!(!catalog.contains("utter_greet"));

        match catalog.get("utter_Greet") {
            Some(ResponseEntry::Language(by_language)) => {
                let languages: Vec<&str> = by_language.keys().map(String::as_str).collect();
                assert_eq!(languages, vec!["en", "pt-BR"]);
                assert_eq!(
                    by_language["pt-BR"][0].text,
                    Some(serde_json::json!("Olá {name}"))
                );
            }
            other => panic!("expected language-keyed entry, got {:?}", other),
        }

        assert!(matches!(
            catalog.get("utter.dot"),
            Some(ResponseEntry::Channel(v)) if v.len() == 2
        ));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let mut file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        write!(file, "utter_greet = hi").unwrap();

        assert!(matches!(
            load_catalog(file.path()),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_catalog("does/not/exist.json"),
            Err(CatalogError::Io(_))
        ));
    }
}
