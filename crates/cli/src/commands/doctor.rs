//! `alterego doctor`: diagnose configuration and connectivity.

use alterego_config::AppConfig;
use alterego_core::persona::Profile;
use alterego_core::provider::Provider;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 alterego doctor");
    println!("==================\n");

    let mut issues = 0;

    // Config
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));
    if !path.exists() {
        println!("  ⚠️  No config file at {}, using defaults", path.display());
    }

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  1 issue found. Fix the config and run again.");
            return Ok(());
        }
    };

    // API key
    if config.has_api_key() {
        println!("  ✅ API key configured for '{}'", config.default_provider);
    } else {
        println!("  ❌ No API key: set OPENAI_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Profile documents
    for (label, doc) in std::iter::once(("Profile", &config.persona.profile_path))
        .chain(config.persona.summary_path.iter().map(|p| ("Summary", p)))
    {
        match Profile::try_load(doc) {
            Ok(text) if !text.trim().is_empty() => {
                println!("  ✅ {label} readable: {} ({} chars)", doc.display(), text.len());
            }
            Ok(_) => {
                println!("  ⚠️  {label} has no text: {}", doc.display());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ {label} unreadable: {} ({e})", doc.display());
                issues += 1;
            }
        }
    }

    // Notifications
    if config.notifications.has_pushover() {
        println!("  ✅ Pushover credentials configured");
    } else {
        println!("  ⚠️  Pushover not configured: notifications will only be logged");
        issues += 1;
    }

    // Providers
    let router = alterego_providers::build_from_config(&config);
    println!("  ℹ️  Providers: {}", router.list().join(", "));
    println!("  ℹ️  Model: {}", config.default_model);

    // Provider reachability
    match alterego_providers::default_provider(&config) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
            Ok(false) => {
                println!("  ❌ Provider '{}' rejected the health check", provider.name());
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                issues += 1;
            }
        },
        Err(e) => println!("  ⏭️  Skipping provider check: {e}"),
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
