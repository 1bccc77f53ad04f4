//! Subcommands and the wiring they share.

pub mod chat;
pub mod doctor;
pub mod prompt;
pub mod serve;

use alterego_agent::ConversationDriver;
use alterego_config::{AppConfig, PersonaConfig};
use alterego_core::event::EventBus;
use alterego_core::persona::{Persona, Profile};
use alterego_notifiers::NotificationDispatcher;
use alterego_tools::ToolRegistry;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// Load config from `path`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => AppConfig::load_with_env(path),
        None => AppConfig::load(),
    };
    config.map_err(|e| format!("Failed to load config: {e}").into())
}

/// Read the profile documents and assemble the persona.
pub fn load_persona(config: &PersonaConfig) -> Persona {
    let mut persona = Persona::new(&config.name, Profile::load(&config.profile_path));

    if let Some(summary_path) = &config.summary_path {
        persona = persona.with_summary(Profile::load(summary_path));
    }

    if let Some(github) = &config.github {
        persona = persona.with_github(github);
    }

    persona
}

/// Everything a running session needs, built once.
pub struct Runtime {
    pub driver: Arc<ConversationDriver>,
    pub events: Arc<EventBus>,
    /// Shares its in-flight sends with the driver's tools
    pub notifications: NotificationDispatcher,
}

impl Runtime {
    /// Wait for notifications still being sent. Call before exiting.
    pub async fn flush_notifications(&self) {
        let pending = self.notifications.pending();
        if pending > 0 {
            eprintln!("  Sending {pending} notification(s)...");
        }
        self.notifications.flush().await;
    }
}

/// Wire provider, notifier, tools and persona into a driver.
pub fn build_runtime(config: &AppConfig) -> Result<Runtime, Box<dyn std::error::Error>> {
    let provider = alterego_providers::default_provider(config)?;

    let events = Arc::new(EventBus::default());
    let notifier = alterego_notifiers::build_from_config(&config.notifications);
    let notifications = NotificationDispatcher::new(notifier, events.clone());
    let tools = Arc::new(
        ToolRegistry::new(notifications.clone(), events.clone())
            .with_policy(config.agent.unknown_tool_policy),
    );

    let persona = load_persona(&config.persona);
    if !persona.profile.loaded {
        warn!(name = %persona.name, "Running without a profile document");
    }

    let driver = ConversationDriver::new(
        provider,
        &config.default_model,
        tools,
        persona.system_prompt(),
        events.clone(),
    )
    .with_temperature(config.default_temperature)
    .with_max_tokens(config.default_max_tokens)
    .with_max_rounds(config.agent.max_rounds);

    Ok(Runtime {
        driver: Arc::new(driver),
        events,
        notifications,
    })
}

/// Log every domain event at debug level.
pub fn spawn_event_logger(events: &EventBus) {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => debug!(event = ?event, "Domain event"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}
