//! `record_unknown_question`: the persona couldn't answer something.

use alterego_core::provider::ToolDefinition;
use serde::Deserialize;

pub const NAME: &str = "record_unknown_question";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordUnknownQuestion {
    pub question: String,
}

impl RecordUnknownQuestion {
    pub fn definition() -> ToolDefinition {
        ToolDefinition {
            name: NAME.into(),
            description: "Record a question the bot could not answer".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The question that couldn't be answered"
                    }
                },
                "required": ["question"]
            }),
        }
    }

    pub fn notification(&self) -> String {
        format!("Recording {} asked that I couldn't answer", self.question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_text() {
        let q = RecordUnknownQuestion {
            question: "What is your favourite colour?".into(),
        };
        assert_eq!(
            q.notification(),
            "Recording What is your favourite colour? asked that I couldn't answer"
        );
    }

    #[test]
    fn schema_requires_question() {
        let def = RecordUnknownQuestion::definition();
        assert_eq!(def.name, NAME);
        assert_eq!(def.parameters["required"], serde_json::json!(["question"]));
    }
}
