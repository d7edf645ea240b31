//! Variable substitution engine for response templates
//!
//! Placeholders are written `{name}`. A placeholder whose name has no entry
//! in the variable mapping is left in the output verbatim; the generator
//! decides whether that is acceptable (see [`UnresolvedPolicy`]).

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Deserialize;

use super::types::Variables;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{([^\n{}]+?)\}").expect("placeholder pattern is valid");
}

/// What to do with a placeholder that has no matching variable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Leave the literal `{name}` text in place
    #[default]
    Keep,
    /// Fail the render call
    Fail,
}

/// Substitute `{variable}` placeholders in every string leaf of a JSON value
pub fn render_value(value: &serde_json::Value, variables: &Variables) -> serde_json::Value {
    match value {
        serde_json::Value::String(s) => serde_json::Value::String(render_str(s, variables)),
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(|v| render_value(v, variables)).collect())
        }
        serde_json::Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(key, val)| (key.clone(), render_value(val, variables)))
                .collect(),
        ),
        // Numbers, booleans, null are passed through as-is
        _ => value.clone(),
    }
}

/// Substitute placeholders in a single string
pub fn render_str(template: &str, variables: &Variables) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => display_value(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of placeholders in `value` that `variables` cannot resolve, in
/// order of first appearance
pub fn unresolved_placeholders(value: &serde_json::Value, variables: &Variables) -> Vec<String> {
    let mut missing = Vec::new();
    collect_unresolved(value, variables, &mut missing);
    missing
}

fn collect_unresolved(value: &serde_json::Value, variables: &Variables, missing: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => {
            for caps in PLACEHOLDER.captures_iter(s) {
                let name = &caps[1];
                if !variables.contains_key(name) && !missing.iter().any(|m| m == name) {
                    missing.push(name.to_string());
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for v in arr {
                collect_unresolved(v, variables, missing);
            }
        }
        serde_json::Value::Object(obj) => {
            for v in obj.values() {
                collect_unresolved(v, variables, missing);
            }
        }
        _ => {}
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        // For arrays and objects, use JSON representation
        _ => value.to_string(),
    }
}
