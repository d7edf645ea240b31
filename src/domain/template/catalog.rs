//! Read-only response template catalog

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::{CatalogError, CatalogResult, ResponseEntry, Variant};

/// Response id to template variants, built once and never mutated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    entries: HashMap<String, ResponseEntry>,
}

impl TemplateCatalog {
    /// Create a catalog from already-built entries
    pub fn new(entries: HashMap<String, ResponseEntry>) -> Self {
        Self { entries }
    }

    /// Build a catalog from a parsed JSON mapping
    pub fn from_value(value: serde_json::Value) -> CatalogResult<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(CatalogError::Parse(
                "Catalog root must be a mapping of response ids".to_string(),
            ));
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (id, raw) in map {
            let entry = serde_json::from_value::<ResponseEntry>(raw).map_err(|e| {
                CatalogError::InvalidEntry {
                    id: id.clone(),
                    reason: e.to_string(),
                }
            })?;
            entries.insert(id, entry);
        }

        Ok(Self { entries })
    }

    /// Add or replace a channel-keyed response
    pub fn with_channel_variants(mut self, id: impl Into<String>, variants: Vec<Variant>) -> Self {
        self.entries
            .insert(id.into(), ResponseEntry::Channel(variants));
        self
    }

    /// Add variants for one language of a language-keyed response
    pub fn with_language_variants(
        mut self,
        id: impl Into<String>,
        language: impl Into<String>,
        variants: Vec<Variant>,
    ) -> Self {
        let entry = self
            .entries
            .entry(id.into())
            .or_insert_with(|| ResponseEntry::Language(Default::default()));

        match entry {
            ResponseEntry::Language(by_language) => {
                by_language.insert(language.into(), variants);
            }
            ResponseEntry::Channel(_) => {
                let mut by_language = std::collections::BTreeMap::new();
                by_language.insert(language.into(), variants);
                *entry = ResponseEntry::Language(by_language);
            }
        }
        self
    }

    /// Get the entry for a response id
    pub fn get(&self, id: &str) -> Option<&ResponseEntry> {
        self.entries.get(id)
    }

    /// Check if a response id exists
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Response ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of responses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap in an `Arc` for sharing between generators
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
