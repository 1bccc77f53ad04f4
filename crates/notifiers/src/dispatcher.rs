//! Background delivery of notifications.
//!
//! A tool hands its message to the dispatcher and moves on. The send runs on
//! its own task; the outcome is logged and published on the event bus, and
//! never reaches the conversation. Short-lived callers such as the CLI call
//! [`NotificationDispatcher::flush`] before the runtime shuts down.

use alterego_core::event::{DomainEvent, EventBus};
use alterego_core::notify::Notifier;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    events: Arc<EventBus>,
    in_flight: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, events: Arc<EventBus>) -> Self {
        Self {
            notifier,
            events,
            in_flight: Arc::default(),
        }
    }

    pub fn notifier_name(&self) -> &str {
        self.notifier.name()
    }

    /// Start delivering `message` in the background.
    ///
    /// Must be called from within a Tokio runtime. Clones share the set of
    /// in-flight sends.
    pub fn dispatch(&self, message: impl Into<String>) {
        let message = message.into();
        let notifier = Arc::clone(&self.notifier);
        let events = Arc::clone(&self.events);

        let handle = tokio::spawn(async move {
            let name = notifier.name().to_string();
            match notifier.notify(&message).await {
                Ok(()) => {
                    debug!(notifier = %name, "Notification delivered");
                    events.publish(DomainEvent::NotificationDelivered {
                        notifier: name,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    warn!(notifier = %name, error = %e, "Notification failed");
                    events.publish(DomainEvent::NotificationFailed {
                        notifier: name,
                        error_message: e.to_string(),
                        timestamp: Utc::now(),
                    });
                }
            }
        });

        let mut in_flight = self.lock_in_flight();
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }

    /// Number of sends that have not finished yet.
    pub fn pending(&self) -> usize {
        self.lock_in_flight().iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait for every send started so far to finish.
    pub async fn flush(&self) {
        let pending = std::mem::take(&mut *self.lock_in_flight());
        if !pending.is_empty() {
            debug!(count = pending.len(), "Waiting for notifications in flight");
        }
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "Notification task did not complete");
            }
        }
    }

    // Handles are plain data, so a poisoned lock is still usable
    fn lock_in_flight(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alterego_core::error::NotifyError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Takes a while to answer, then counts the delivery.
    #[derive(Default)]
    struct Slow {
        delivered: AtomicUsize,
    }

    #[async_trait]
    impl Notifier for Slow {
        fn name(&self) -> &str {
            "slow"
        }

        async fn notify(&self, _message: &str) -> Result<(), NotifyError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.delivered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Refusing;

    #[async_trait]
    impl Notifier for Refusing {
        fn name(&self) -> &str {
            "refusing"
        }

        async fn notify(&self, _message: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected {
                status_code: 400,
                message: "invalid token".into(),
            })
        }
    }

    #[tokio::test]
    async fn success_publishes_delivered() {
        let events = Arc::new(EventBus::new(8));
        let mut rx = events.subscribe();
        let dispatcher = NotificationDispatcher::new(Arc::new(crate::LogNotifier), events);

        dispatcher.dispatch("Recording hello");
        dispatcher.flush().await;

        match rx.recv().await.unwrap().as_ref() {
            DomainEvent::NotificationDelivered { notifier, .. } => assert_eq!(notifier, "log"),
            other => panic!("Expected NotificationDelivered, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_is_swallowed_and_published() {
        let events = Arc::new(EventBus::new(8));
        let mut rx = events.subscribe();
        let dispatcher = NotificationDispatcher::new(Arc::new(Refusing), events);

        dispatcher.dispatch("hi");
        dispatcher.flush().await;

        match rx.recv().await.unwrap().as_ref() {
            DomainEvent::NotificationFailed { notifier, error_message, .. } => {
                assert_eq!(notifier, "refusing");
                assert!(error_message.contains("invalid token"));
            }
            other => panic!("Expected NotificationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn flush_waits_for_slow_sends() {
        let slow = Arc::new(Slow::default());
        let dispatcher = NotificationDispatcher::new(slow.clone(), Arc::new(EventBus::new(8)));

        dispatcher.dispatch("one");
        dispatcher.clone().dispatch("two");
        assert_eq!(slow.delivered.load(Ordering::SeqCst), 0);

        dispatcher.flush().await;
        assert_eq!(slow.delivered.load(Ordering::SeqCst), 2);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn flushed_send_survives_runtime_shutdown() {
        let slow = Arc::new(Slow::default());
        let dispatcher = NotificationDispatcher::new(slow.clone(), Arc::new(EventBus::new(8)));

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            dispatcher.dispatch("Recording interest from Ada");
            dispatcher.flush().await;
        });
        drop(rt);

        assert_eq!(slow.delivered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn flush_without_sends_returns() {
        let dispatcher =
            NotificationDispatcher::new(Arc::new(crate::LogNotifier), Arc::new(EventBus::new(8)));
        dispatcher.flush().await;
        assert_eq!(dispatcher.pending(), 0);
    }
}
