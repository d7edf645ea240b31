//! Response template types and error definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Variable mapping used as the substitution context for one render call
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Fields of a variant that take part in interpolation, in dispatch order
pub const INTERPOLATED_FIELDS: [&str; 6] = [
    "text",
    "image",
    "custom",
    "button",
    "attachment",
    "quick_replies",
];

/// Catalog-specific error type
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid catalog entry '{id}': {reason}")]
    InvalidEntry { id: String, reason: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// One concrete candidate rendering of a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<serde_json::Value>,

    /// Output channel this variant is restricted to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Any other keys; passed through without interpolation
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Variant {
    /// Create a text-only variant
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(serde_json::Value::String(text.into())),
            ..Self::default()
        }
    }

    /// Restrict this variant to an output channel
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Channel tag, treating an empty tag as no tag
    pub fn channel_tag(&self) -> Option<&str> {
        self.channel.as_deref().filter(|c| !c.is_empty())
    }

    /// Mutable access to an interpolatable field by name
    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Option<serde_json::Value>> {
        match name {
            "text" => Some(&mut self.text),
            "image" => Some(&mut self.image),
            "custom" => Some(&mut self.custom),
            "button" => Some(&mut self.button),
            "attachment" => Some(&mut self.attachment),
            "quick_replies" => Some(&mut self.quick_replies),
            _ => None,
        }
    }

    /// Shared access to an interpolatable field by name
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        match name {
            "text" => self.text.as_ref(),
            "image" => self.image.as_ref(),
            "custom" => self.custom.as_ref(),
            "button" => self.button.as_ref(),
            "attachment" => self.attachment.as_ref(),
            "quick_replies" => self.quick_replies.as_ref(),
            _ => None,
        }
    }
}

/// A response definition under one of the two addressing schemes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEntry {
    /// Ordered variants, each optionally tagged with a channel
    Channel(Vec<Variant>),

    /// Language tag to ordered variants; no channel filtering
    Language(BTreeMap<String, Vec<Variant>>),
}

impl ResponseEntry {
    /// Name of the addressing scheme, used in listings and logs
    pub fn scheme(&self) -> &'static str {
        match self {
            ResponseEntry::Channel(_) => "channel",
            ResponseEntry::Language(_) => "language",
        }
    }

    /// Total number of variants across the entry
    pub fn variant_count(&self) -> usize {
        match self {
            ResponseEntry::Channel(variants) => variants.len(),
            ResponseEntry::Language(by_language) => by_language.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_keeps_unknown_keys() {
        let variant: Variant = serde_json::from_value(json!({
            "text": "Hi {name}",
            "channel": "slack",
            "elements": [{"title": "{name}"}]
        }))
        .unwrap();

        assert_eq!(variant.text, Some(json!("Hi {name}")));
        assert_eq!(variant.channel.as_deref(), Some("slack"));
        assert_eq!(variant.extra["elements"], json!([{"title": "{name}"}]));

        let back = serde_json::to_value(&variant).unwrap();
        assert_eq!(back["elements"][0]["title"], "{name}");
        assert!(back.get("image").is_none());
    }

    #[test]
    fn test_empty_channel_tag_counts_as_untagged() {
        let variant = Variant::text("hello").with_channel("");
        assert_eq!(variant.channel_tag(), None);

        let tagged = Variant::text("hello").with_channel("web");
        assert_eq!(tagged.channel_tag(), Some("web"));
    }

    #[test]
    fn test_entry_shape_from_json() {
        let channel: ResponseEntry =
            serde_json::from_value(json!([{"text": "a"}, {"text": "b", "channel": "web"}]))
                .unwrap();
        assert_eq!(channel.scheme(), "channel");
        assert_eq!(channel.variant_count(), 2);

        let language: ResponseEntry = serde_json::from_value(json!({
            "en": [{"text": "Hello"}],
            "fr": [{"text": "Bonjour"}, {"text": "Salut"}]
        }))
        .unwrap();
        assert_eq!(language.scheme(), "language");
        assert_eq!(language.variant_count(), 3);
    }

    #[test]
    fn test_field_accessors_cover_interpolated_set() {
        let mut variant = Variant::default();
        for name in INTERPOLATED_FIELDS {
            *variant.field_mut(name).unwrap() = Some(json!(name));
        }
        for name in INTERPOLATED_FIELDS {
            assert_eq!(variant.field(name), Some(&json!(name)));
        }
        assert!(variant.field_mut("channel").is_none());
    }
}
