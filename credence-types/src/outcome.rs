//! The uniform operation envelope returned to the request-handling layer.
//!
//! Every core operation renders into `{success, message, data?}` so a thin
//! UI layer can show pass/fail without inspecting error types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result envelope for one core operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl OpOutcome {
    /// A successful outcome with no payload.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// A successful outcome carrying a payload.
    #[must_use]
    pub fn ok_with(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A failed outcome. The message is user-facing.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Renders any `Result` whose error displays a user-facing message.
    pub fn from_result<T, E>(result: Result<T, E>, message: impl Into<String>, data: impl FnOnce(T) -> Option<Value>) -> Self
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(value) => Self {
                success: true,
                message: message.into(),
                data: data(value),
            },
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
