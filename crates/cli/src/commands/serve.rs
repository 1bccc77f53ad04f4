//! `alterego serve`: start the HTTP gateway.

use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    port_override: Option<u16>,
    host_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    if let Some(host) = host_override {
        config.gateway.host = host;
    }

    let runtime = super::build_runtime(&config)?;
    super::spawn_event_logger(&runtime.events);

    println!("🪞 alterego");
    println!("   Persona:   {}", config.persona.name);
    println!(
        "   Model:     {} via {}",
        runtime.driver.model(),
        runtime.driver.provider_name()
    );
    println!("   Notifier:  {}", runtime.notifications.notifier_name());
    println!("   Listening: http://{}:{}", config.gateway.host, config.gateway.port);

    let served = alterego_gateway::start(&config.gateway, runtime.driver.clone()).await;
    runtime.flush_notifications().await;
    served
}
