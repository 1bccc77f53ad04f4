//! The conversation driver implementation.

use alterego_core::error::{AgentError, ToolError};
use alterego_core::event::{DomainEvent, EventBus};
use alterego_core::message::{Conversation, Message};
use alterego_core::provider::{Provider, ProviderRequest};
use alterego_core::tool::ToolResult;
use alterego_tools::ToolRegistry;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives one conversation to a final reply, running tools along the way.
///
/// Holds only immutable state, so one driver behind an `Arc` serves every
/// concurrent request.
pub struct ConversationDriver {
    /// The completion provider
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Max tokens per round (provider default when unset)
    max_tokens: Option<u32>,

    /// The two persona tools
    tools: Arc<ToolRegistry>,

    /// Persona prompt placed first in every conversation
    system_prompt: String,

    /// Completion rounds allowed per request
    max_rounds: u32,

    /// Event bus for domain events
    event_bus: Arc<EventBus>,
}

impl ConversationDriver {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            tools,
            system_prompt: system_prompt.into(),
            max_rounds: 10,
            event_bus,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the round cap. Values below 1 are raised to 1.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds.max(1);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Start a conversation for one incoming message.
    pub fn start(&self, history: Vec<Message>, message: impl Into<String>) -> Conversation {
        Conversation::for_request(&self.system_prompt, history, message)
    }

    /// Answer `message` given the caller's prior history.
    pub async fn reply(
        &self,
        history: Vec<Message>,
        message: impl Into<String>,
    ) -> Result<String, alterego_core::Error> {
        let mut conversation = self.start(history, message);
        self.run(&mut conversation).await
    }

    /// Run the tool-calling loop until the model produces a final answer.
    ///
    /// The conversation must already end with the latest user message. The
    /// final assistant message is appended before returning its text.
    pub async fn run(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, alterego_core::Error> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.len(),
            "Processing conversation"
        );

        let tool_definitions = self.tools.definitions();

        for round in 1..=self.max_rounds {
            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            let response = self.provider.complete(request).await?;

            debug!(
                conversation_id = %conversation.id,
                round,
                stop_reason = %response.stop_reason,
                tool_calls = response.message.tool_calls.len(),
                "Completion round finished"
            );

            self.event_bus.publish(DomainEvent::CompletionRoundFinished {
                conversation_id: conversation.id.to_string(),
                round,
                stop_reason: response.stop_reason.to_string(),
                tokens_used: response.usage.as_ref().map(|u| u.total_tokens),
                timestamp: Utc::now(),
            });

            if !response.requests_tools() {
                let mut message = response.message;
                if !message.tool_calls.is_empty() {
                    // Calls without a `tool_calls` stop reason are not executed
                    warn!(
                        stop_reason = %response.stop_reason,
                        count = message.tool_calls.len(),
                        "Ignoring tool calls on a final round"
                    );
                    message.tool_calls.clear();
                }

                let reply = message.content.clone();
                conversation.push(message);
                return Ok(reply);
            }

            let tool_calls = response.message.tool_calls.clone();
            conversation.push(response.message);

            for call in &tool_calls {
                let result = match self.tools.execute(call).await {
                    Ok(result) => result,
                    Err(e @ ToolError::NotFound(_)) => return Err(e.into()),
                    Err(e) => {
                        // Let the model see what went wrong and try again
                        warn!(tool = %call.name, error = %e, "Tool call failed");
                        ToolResult::failed(&call.id, e.to_string())
                    }
                };

                conversation.push(Message::tool_result(&call.id, result.content()));
            }
        }

        warn!(
            conversation_id = %conversation.id,
            rounds = self.max_rounds,
            "Round cap reached while the model was still requesting tools"
        );
        Err(AgentError::ToolLoopExceeded {
            rounds: self.max_rounds,
        }
        .into())
    }
}
