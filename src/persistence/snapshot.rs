//! Saved-progress snapshot format

use super::PersistenceError;
use crate::state::{QuoteForm, Step};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the single snapshot slot
pub const SNAPSHOT_KEY: &str = "quoteFormData";

/// Bump whenever a field is added, removed, or changes meaning
pub const SCHEMA_VERSION: u32 = 1;

/// How to treat a stored snapshot that does not match the current schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Only accept snapshots written with [`SCHEMA_VERSION`] and carrying every field
    Reject,
    /// Fill missing fields from defaults and ignore unknown ones
    MergeDefaults,
}

/// The full form plus the step the user was on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    #[serde(flatten)]
    pub form: QuoteForm,
    pub last_step: Step,
    pub schema_version: u32,
}

impl WizardProgress {
    pub fn new(form: QuoteForm, last_step: Step) -> Self {
        Self {
            form,
            last_step,
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a stored snapshot under `policy`
    ///
    /// Malformed values (unknown service tags, a step outside 1..=5, wrong
    /// types) are errors under every policy.
    pub fn from_json(raw: &str, policy: SnapshotPolicy) -> Result<Self, PersistenceError> {
        let Value::Object(stored) = serde_json::from_str::<Value>(raw)? else {
            return Err(PersistenceError::NotAnObject);
        };

        match policy {
            SnapshotPolicy::Reject => {
                let found = stored.get("schemaVersion").and_then(Value::as_u64);
                if found != Some(u64::from(SCHEMA_VERSION)) {
                    return Err(PersistenceError::IncompatibleSchema {
                        found,
                        expected: SCHEMA_VERSION,
                    });
                }
                Ok(serde_json::from_value(Value::Object(stored))?)
            }
            SnapshotPolicy::MergeDefaults => {
                let mut merged =
                    serde_json::to_value(Self::new(QuoteForm::default(), Step::default()))?;
                if let Some(defaults) = merged.as_object_mut() {
                    for (key, value) in stored {
                        if key != "schemaVersion" && !value.is_null() && defaults.contains_key(&key)
                        {
                            defaults.insert(key, value);
                        }
                    }
                }
                Ok(serde_json::from_value(merged)?)
            }
        }
    }
}
