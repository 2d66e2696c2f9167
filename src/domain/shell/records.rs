//! Opaque records produced by screens.
//!
//! The shell never inspects profile or decision contents. Both are kept as
//! JSON objects so whichever screen produced them owns their shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{DecisionId, Timestamp, ValidationError};

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            /// Builds the record from an arbitrary JSON value, which must be an object.
            pub fn from_value(value: Value) -> Result<Self, ValidationError> {
                match value {
                    Value::Object(fields) => Ok(Self(fields)),
                    other => Err(ValidationError::invalid_format(
                        $field,
                        format!("expected a JSON object, got {}", json_kind(&other)),
                    )),
                }
            }

            pub fn field(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// String view of a field; non-string scalars are rendered with `to_string`.
            pub fn text(&self, key: &str) -> Option<String> {
                self.0.get(key).map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
            }

            pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
                self.0.iter()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }
    };
}

opaque_record!(
    /// A profile produced by onboarding.
    UserProfile,
    "profile"
);

opaque_record!(
    /// A decision submitted from the decision form.
    DecisionData,
    "decision"
);

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A decision the result screen chose to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDecision {
    pub id: DecisionId,
    pub decision: DecisionData,
    pub saved_at: Timestamp,
}

impl SavedDecision {
    pub fn new(decision: DecisionData) -> Self {
        Self {
            id: DecisionId::new(),
            decision,
            saved_at: Timestamp::now(),
        }
    }

    /// Title shown in listings, falling back to the id.
    pub fn title(&self) -> String {
        self.decision
            .text("title")
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| format!("Decision {}", self.id.short()))
    }
}
