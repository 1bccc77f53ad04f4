//! The tool registry: decodes model-issued calls and runs them.

use crate::invocation::ToolInvocation;
use alterego_core::error::ToolError;
use alterego_core::event::{DomainEvent, EventBus};
use alterego_core::message::MessageToolCall;
use alterego_core::provider::ToolDefinition;
use alterego_core::tool::{ToolResult, UnknownToolPolicy};
use alterego_notifiers::NotificationDispatcher;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

pub struct ToolRegistry {
    dispatcher: NotificationDispatcher,
    events: Arc<EventBus>,
    policy: UnknownToolPolicy,
}

impl ToolRegistry {
    pub fn new(dispatcher: NotificationDispatcher, events: Arc<EventBus>) -> Self {
        Self {
            dispatcher,
            events,
            policy: UnknownToolPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Tool schemas sent to the model on every round.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolInvocation::definitions()
    }

    /// Decode and run one tool call.
    ///
    /// Returns `InvalidArguments` when the arguments don't decode (nothing
    /// runs). Unknown names yield `{}` under the lenient policy and
    /// `NotFound` under the strict one.
    pub async fn execute(&self, call: &MessageToolCall) -> Result<ToolResult, ToolError> {
        let start = Instant::now();

        let invocation = match ToolInvocation::decode(&call.name, &call.arguments) {
            Ok(invocation) => invocation,
            Err(ToolError::NotFound(name)) => return self.unknown_tool(&call.id, name),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Rejected tool arguments");
                self.publish_executed(&call.name, false, start);
                return Err(e);
            }
        };

        debug!(tool = invocation.name(), call_id = %call.id, "Executing tool");
        // Both tools only notify, and answer the model the same way
        self.dispatcher.dispatch(invocation.notification());
        self.publish_executed(&call.name, true, start);
        Ok(ToolResult::ok(&call.id, serde_json::json!({"recorded": "ok"})))
    }

    fn unknown_tool(&self, call_id: &str, name: String) -> Result<ToolResult, ToolError> {
        self.events.publish(DomainEvent::UnknownToolRequested {
            tool_name: name.clone(),
            timestamp: Utc::now(),
        });

        match self.policy {
            UnknownToolPolicy::Lenient => {
                warn!(tool = %name, "Model requested unknown tool, returning empty result");
                Ok(ToolResult::ok(call_id, serde_json::json!({})))
            }
            UnknownToolPolicy::Strict => {
                warn!(tool = %name, "Model requested unknown tool");
                Err(ToolError::NotFound(name))
            }
        }
    }

    fn publish_executed(&self, tool_name: &str, success: bool, start: Instant) {
        self.events.publish(DomainEvent::ToolExecuted {
            tool_name: tool_name.to_string(),
            success,
            duration_ms: start.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alterego_core::error::NotifyError;
    use alterego_core::notify::Notifier;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::broadcast;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        fn name(&self) -> &str {
            "recording"
        }

        async fn notify(&self, message: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    fn registry() -> (ToolRegistry, Arc<RecordingNotifier>, Arc<EventBus>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let events = Arc::new(EventBus::new(32));
        let dispatcher = NotificationDispatcher::new(notifier.clone(), events.clone());
        (ToolRegistry::new(dispatcher, events.clone()), notifier, events)
    }

    fn call(name: &str, arguments: &str) -> MessageToolCall {
        MessageToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    async fn wait_for_delivery(rx: &mut broadcast::Receiver<Arc<DomainEvent>>) {
        loop {
            let event = rx.recv().await.unwrap();
            if matches!(event.as_ref(), DomainEvent::NotificationDelivered { .. }) {
                return;
            }
        }
    }

    #[tokio::test]
    async fn user_details_sends_notification() {
        let (registry, notifier, events) = registry();
        let mut rx = events.subscribe();

        let result = registry
            .execute(&call("record_user_details", r#"{"email":"a@b.com"}"#))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.call_id, "call_1");
        assert_eq!(result.content(), r#"{"recorded":"ok"}"#);

        wait_for_delivery(&mut rx).await;
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("a@b.com"));
    }

    #[tokio::test]
    async fn unknown_question_sends_notification() {
        let (registry, notifier, events) = registry();
        let mut rx = events.subscribe();

        registry
            .execute(&call("record_unknown_question", r#"{"question":"Pets?"}"#))
            .await
            .unwrap();

        wait_for_delivery(&mut rx).await;
        assert_eq!(
            notifier.sent.lock().unwrap().as_slice(),
            ["Recording Pets? asked that I couldn't answer"]
        );
    }

    #[tokio::test]
    async fn invalid_arguments_send_nothing() {
        let (registry, notifier, events) = registry();
        let mut rx = events.subscribe();

        let err = registry
            .execute(&call("record_user_details", r#"{"name":"Ada"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));

        match rx.recv().await.unwrap().as_ref() {
            DomainEvent::ToolExecuted { success, .. } => assert!(!success),
            other => panic!("Expected ToolExecuted, got {other:?}"),
        }

        registry.dispatcher.flush().await;
        assert!(notifier.sent.lock().unwrap().is_empty());
        assert!(rx.try_recv().is_err(), "no notification outcome expected");
    }

    #[tokio::test]
    async fn unknown_tool_lenient_returns_empty_object() {
        let (registry, notifier, events) = registry();
        let mut rx = events.subscribe();

        let result = registry.execute(&call("shell", r#"{"cmd":"ls"}"#)).await.unwrap();
        assert_eq!(result.content(), "{}");
        assert!(notifier.sent.lock().unwrap().is_empty());

        match rx.recv().await.unwrap().as_ref() {
            DomainEvent::UnknownToolRequested { tool_name, .. } => assert_eq!(tool_name, "shell"),
            other => panic!("Expected UnknownToolRequested, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_tool_strict_fails() {
        let (registry, _, _) = registry();
        let registry = registry.with_policy(UnknownToolPolicy::Strict);

        let err = registry.execute(&call("shell", "{}")).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref n) if n == "shell"));
    }

    #[test]
    fn definitions_cover_both_tools() {
        let (registry, _, _) = registry();
        assert_eq!(registry.definitions().len(), 2);
    }
}
