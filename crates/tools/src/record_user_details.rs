//! `record_user_details`: a visitor left contact details for follow-up.

use alterego_core::provider::ToolDefinition;
use serde::Deserialize;

pub const NAME: &str = "record_user_details";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordUserDetails {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RecordUserDetails {
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: NAME.into(),
            description: "Record a user's details for follow-up".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "email": {
                        "type": "string",
                        "description": "The email address of this user"
                    },
                    "name": {
                        "type": "string",
                        "description": "The user's name, if they provided it"
                    },
                    "notes": {
                        "type": "string",
                        "description": "Any additional information about the conversation that's worth recording to give context"
                    }
                },
                "required": ["email"]
            }),
        }
    }

    /// Text pushed to the persona's owner.
    pub fn notification(&self) -> String {
        let name = self.name.as_deref().unwrap_or("Name not provided");
        let notes = self.notes.as_deref().unwrap_or("not provided");
        format!(
            "Recording interest from {name} with email {} and notes {notes}",
            self.email
        )
    }
}
