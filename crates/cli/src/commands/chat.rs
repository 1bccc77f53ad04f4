//! `alterego chat`: single-message or interactive terminal chat.

use super::Runtime;
use alterego_core::message::Message;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    config_path: Option<&Path>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let runtime = super::build_runtime(&config)?;
    super::spawn_event_logger(&runtime.events);

    let result = match message {
        Some(msg) => single(&runtime, msg).await,
        None => interactive(&runtime, &config.persona.name).await,
    };

    // The runtime goes away with main; sends still in flight would be cut off
    runtime.flush_notifications().await;
    result
}

async fn single(runtime: &Runtime, message: String) -> Result<(), Box<dyn std::error::Error>> {
    eprint!("  Thinking...");
    let reply = runtime.driver.reply(Vec::new(), message).await;
    eprint!("\r              \r");
    println!("{}", reply?);
    Ok(())
}

async fn interactive(runtime: &Runtime, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let driver = &runtime.driver;

    println!();
    println!("  alterego: chatting as {name}");
    println!("  Model:    {} via {}", driver.model(), driver.provider_name());
    println!("  Notifier: {}", runtime.notifications.notifier_name());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut history: Vec<Message> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        eprint!("  ...");
        let mut conversation = driver.start(history.clone(), line);
        let result = driver.run(&mut conversation).await;
        eprint!("\r     \r");

        match result {
            Ok(reply) => {
                println!();
                for text_line in reply.lines() {
                    println!("  {name} > {text_line}");
                }
                println!();
                // Keep tool traffic too, so the model remembers what it recorded
                history = conversation.messages.into_iter().skip(1).collect();
            }
            Err(e) => {
                eprintln!("  [Error] {e}");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
