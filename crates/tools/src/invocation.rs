//! Typed tool invocations.
//!
//! A model-issued call is decoded into exactly one [`ToolInvocation`] variant
//! before anything runs. Unknown names and bad arguments are rejected here.

use crate::record_unknown_question::{self, RecordUnknownQuestion};
use crate::record_user_details::{self, RecordUserDetails};
use alterego_core::error::ToolError;
use alterego_core::provider::ToolDefinition;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    RecordUserDetails(RecordUserDetails),
    RecordUnknownQuestion(RecordUnknownQuestion),
}

impl ToolInvocation {
    /// Decode a tool name and its JSON argument string.
    ///
    /// Fails with `NotFound` for an unknown name and `InvalidArguments` for
    /// malformed JSON, a missing required field or a wrong type.
    pub fn decode(name: &str, arguments: &str) -> Result<Self, ToolError> {
        match name {
            record_user_details::NAME => {
                parse_args(name, arguments).map(Self::RecordUserDetails)
            }
            record_unknown_question::NAME => {
                parse_args(name, arguments).map(Self::RecordUnknownQuestion)
            }
            other => Err(ToolError::NotFound(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RecordUserDetails(_) => record_user_details::NAME,
            Self::RecordUnknownQuestion(_) => record_unknown_question::NAME,
        }
    }

    /// The push notification this invocation sends.
    pub fn notification(&self) -> String {
        match self {
            Self::RecordUserDetails(details) => details.notification(),
            Self::RecordUnknownQuestion(question) => question.notification(),
        }
    }

    /// Schemas for every known tool, `record_user_details` first.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            RecordUserDetails::definition(),
            RecordUnknownQuestion::definition(),
        ]
    }
}

fn parse_args<T: DeserializeOwned>(tool_name: &str, arguments: &str) -> Result<T, ToolError> {
    // Some models send an empty string instead of `{}`
    let arguments = if arguments.trim().is_empty() {
        "{}"
    } else {
        arguments
    };

    serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments {
        tool_name: tool_name.to_string(),
        reason: e.to_string(),
    })
}
