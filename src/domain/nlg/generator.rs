//! Template-based response generator

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;

use super::chooser::{RandomChooser, VariantChooser};
use super::variables::{merge_variables, requested_language, VariableSource};
use crate::metrics::RenderMetrics;
use crate::template::{
    render_value, unresolved_placeholders, ResponseEntry, TemplateCatalog, UnresolvedPolicy,
    Variables, Variant, INTERPOLATED_FIELDS,
};

/// Generator-specific error type
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Generator expected a language to return template")]
    MissingLanguage,

    #[error("Unresolved placeholder '{{{name}}}' in response '{response}'")]
    UnresolvedPlaceholder { response: String, name: String },
}

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Produces rendered responses for a response id
#[async_trait]
pub trait NaturalLanguageGenerator: Send + Sync {
    /// Render every variant of a language-keyed response.
    ///
    /// Pulls the current values from `source` once, merges `overrides` over
    /// them, and requires a `language` entry among the overrides.
    async fn generate(
        &self,
        response_id: &str,
        source: &dyn VariableSource,
        channel: &str,
        overrides: &Variables,
    ) -> GeneratorResult<Option<Vec<Variant>>>;
}

/// Generator that renders responses from a read-only template catalog.
///
/// Selected variants are always cloned before interpolation, so the catalog
/// observed by other callers never changes.
pub struct TemplatedGenerator {
    catalog: Arc<TemplateCatalog>,
    chooser: Arc<dyn VariantChooser>,
    unresolved_policy: UnresolvedPolicy,
}

impl TemplatedGenerator {
    /// Create a generator over `catalog` with a thread-local random chooser
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self {
            catalog,
            chooser: Arc::new(RandomChooser),
            unresolved_policy: UnresolvedPolicy::default(),
        }
    }

    /// Replace the random source used by [`resolve_by_slots`](Self::resolve_by_slots)
    pub fn with_chooser(mut self, chooser: Arc<dyn VariantChooser>) -> Self {
        self.chooser = chooser;
        self
    }

    /// Set the policy for placeholders without a matching variable
    pub fn with_unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved_policy = policy;
        self
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn unresolved_policy(&self) -> UnresolvedPolicy {
        self.unresolved_policy
    }

    /// Variants of a channel-keyed response eligible for `channel`.
    ///
    /// Variants tagged with `channel` take precedence; only when there are
    /// none do untagged variants apply. Variants tagged with any other
    /// channel are never eligible.
    pub fn templates_for_channel(&self, response_id: &str, channel: &str) -> Vec<&Variant> {
        let Some(ResponseEntry::Channel(variants)) = self.catalog.get(response_id) else {
            return Vec::new();
        };

        let mut channel_templates = Vec::new();
        let mut default_templates = Vec::new();

        for variant in variants {
            if variant.channel.as_deref() == Some(channel) {
                channel_templates.push(variant);
            } else if variant.channel_tag().is_none() {
                default_templates.push(variant);
            }
        }

        if channel_templates.is_empty() {
            default_templates
        } else {
            channel_templates
        }
    }

    /// Pick one eligible variant uniformly at random
    pub fn random_template_for(&self, response_id: &str, channel: &str) -> Option<&Variant> {
        let eligible = self.templates_for_channel(response_id, channel);
        if eligible.is_empty() {
            return None;
        }
        let index = self.chooser.choose_index(eligible.len());
        eligible.get(index).copied()
    }

    /// Render all variants of a language-keyed response.
    ///
    /// `channel` is accepted for symmetry with
    /// [`resolve_by_slots`](Self::resolve_by_slots) but does not filter here.
    pub fn resolve_by_language(
        &self,
        response_id: &str,
        filled_slots: &Variables,
        channel: &str,
        overrides: &Variables,
    ) -> GeneratorResult<Option<Vec<Variant>>> {
        let started = Instant::now();
        let result = self.resolve_by_language_inner(response_id, filled_slots, channel, overrides);
        RenderMetrics::record("language", outcome_label(&result, |r| r.is_some()), started);
        result
    }

    fn resolve_by_language_inner(
        &self,
        response_id: &str,
        filled_slots: &Variables,
        channel: &str,
        overrides: &Variables,
    ) -> GeneratorResult<Option<Vec<Variant>>> {
        let Some(language) = requested_language(overrides) else {
            tracing::warn!(response = %response_id, "Render requested without a language");
            return Err(GeneratorError::MissingLanguage);
        };

        let by_language = match self.catalog.get(response_id) {
            None => {
                tracing::debug!(response = %response_id, "Unknown response id");
                return Ok(None);
            }
            Some(ResponseEntry::Channel(_)) => {
                tracing::warn!(
                    response = %response_id,
                    "Response is channel-keyed; cannot resolve by language"
                );
                return Ok(None);
            }
            Some(ResponseEntry::Language(by_language)) => by_language,
        };

        let Some(variants) = by_language.get(language) else {
            tracing::debug!(
                response = %response_id,
                language = %language,
                "No variants for requested language"
            );
            return Ok(None);
        };

        let variables = merge_variables(filled_slots, overrides);
        let rendered = variants
            .iter()
            .map(|variant| self.fill_template(response_id, variant.clone(), &variables))
            .collect::<GeneratorResult<Vec<_>>>()?;

        tracing::debug!(
            response = %response_id,
            language = %language,
            channel = %channel,
            count = rendered.len(),
            "Rendered language-keyed response"
        );

        Ok(Some(rendered))
    }

    /// Render one randomly chosen variant of a channel-keyed response
    pub fn resolve_by_slots(
        &self,
        response_id: &str,
        filled_slots: &Variables,
        channel: &str,
        overrides: &Variables,
    ) -> GeneratorResult<Option<Variant>> {
        let started = Instant::now();
        let result = self.resolve_by_slots_inner(response_id, filled_slots, channel, overrides);
        RenderMetrics::record("random", outcome_label(&result, |r| r.is_some()), started);
        result
    }

    fn resolve_by_slots_inner(
        &self,
        response_id: &str,
        filled_slots: &Variables,
        channel: &str,
        overrides: &Variables,
    ) -> GeneratorResult<Option<Variant>> {
        match self.catalog.get(response_id) {
            None => {
                tracing::debug!(response = %response_id, "Unknown response id");
                return Ok(None);
            }
            Some(ResponseEntry::Language(_)) => {
                tracing::warn!(
                    response = %response_id,
                    "Response is language-keyed; cannot pick a channel variant"
                );
                return Ok(None);
            }
            Some(ResponseEntry::Channel(_)) => {}
        }

        let Some(variant) = self.random_template_for(response_id, channel) else {
            tracing::debug!(
                response = %response_id,
                channel = %channel,
                "No eligible variant for channel"
            );
            return Ok(None);
        };

        let variables = merge_variables(filled_slots, overrides);
        self.fill_template(response_id, variant.clone(), &variables)
            .map(Some)
    }

    /// Interpolate the eligible fields of an owned variant.
    ///
    /// Returns the variant untouched when `variables` is empty.
    pub fn fill_template(
        &self,
        response_id: &str,
        mut variant: Variant,
        variables: &Variables,
    ) -> GeneratorResult<Variant> {
        if variables.is_empty() {
            return Ok(variant);
        }

        let check_unresolved = self.unresolved_policy == UnresolvedPolicy::Fail
            || tracing::enabled!(tracing::Level::DEBUG);

        for name in INTERPOLATED_FIELDS {
            let Some(Some(value)) = variant.field_mut(name) else {
                continue;
            };

            if check_unresolved {
                let missing = unresolved_placeholders(value, variables);
                if let Some(first) = missing.first() {
                    if self.unresolved_policy == UnresolvedPolicy::Fail {
                        return Err(GeneratorError::UnresolvedPlaceholder {
                            response: response_id.to_string(),
                            name: first.clone(),
                        });
                    }
                    tracing::debug!(
                        response = %response_id,
                        field = name,
                        missing = ?missing,
                        "Leaving unresolved placeholders in place"
                    );
                }
            }

            *value = render_value(value, variables);
        }

        Ok(variant)
    }
}

#[async_trait]
impl NaturalLanguageGenerator for TemplatedGenerator {
    async fn generate(
        &self,
        response_id: &str,
        source: &dyn VariableSource,
        channel: &str,
        overrides: &Variables,
    ) -> GeneratorResult<Option<Vec<Variant>>> {
        let filled_slots = source.current_values();
        self.resolve_by_language(response_id, &filled_slots, channel, overrides)
    }
}

fn outcome_label<T>(result: &GeneratorResult<T>, found: impl Fn(&T) -> bool) -> &'static str {
    match result {
        Ok(value) if found(value) => "rendered",
        Ok(_) => "absent",
        Err(GeneratorError::MissingLanguage) => "missing_language",
        Err(GeneratorError::UnresolvedPlaceholder { .. }) => "unresolved",
    }
}
