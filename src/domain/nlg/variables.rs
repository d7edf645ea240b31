//! Variable sources and the merge rule for render-time variables

use serde::{Deserialize, Serialize};

use crate::template::Variables;

/// Override key that selects the language for language-keyed responses
pub const LANGUAGE_KEY: &str = "language";

/// Producer of the current variable values (typically a dialogue tracker)
pub trait VariableSource: Send + Sync {
    /// Snapshot of the current values, taken once per render request
    fn current_values(&self) -> Variables;
}

impl VariableSource for Variables {
    fn current_values(&self) -> Variables {
        self.clone()
    }
}

/// Tracker state as received from a bot, carrying its filled slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerState {
    /// Conversation the state belongs to (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,

    /// Current slot values
    #[serde(default)]
    pub slots: Variables,
}

impl VariableSource for TrackerState {
    fn current_values(&self) -> Variables {
        self.slots.clone()
    }
}

/// Merge slot values with call-time overrides; overrides win on conflict
pub fn merge_variables(filled_slots: &Variables, overrides: &Variables) -> Variables {
    let mut merged = filled_slots.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// The requested language, if the overrides carry a non-empty one
pub fn requested_language(overrides: &Variables) -> Option<&str> {
    overrides
        .get(LANGUAGE_KEY)
        .and_then(serde_json::Value::as_str)
        .filter(|language| !language.is_empty())
}
