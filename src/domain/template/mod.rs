//! Response template catalog and variable substitution.
//!
//! This module provides:
//! - Variant definitions with `{variable}` placeholders
//! - A read-only catalog supporting channel-keyed and language-keyed responses
//! - The substitution engine used to render variant fields
//!
//! # Example
//!
//! ```ignore
//! let catalog = TemplateCatalog::from_value(json!({
//!     "utter_greet": [
//!         {"text": "Hey {name}!"},
//!         {"text": "Hey {name}, from Slack", "channel": "slack"}
//!     ],
//!     "utter_bye": {
//!         "en": [{"text": "Goodbye {name}"}]
//!     }
//! }))?;
//!
//! let rendered = render_value(&json!("Hello {name}"), &variables);
//! ```

mod catalog;
mod substitution;
mod types;

pub use catalog::TemplateCatalog;
pub use substitution::{render_str, render_value, unresolved_placeholders, UnresolvedPolicy};
pub use types::{
    CatalogError, CatalogResult, ResponseEntry, Variables, Variant, INTERPOLATED_FIELDS,
};
