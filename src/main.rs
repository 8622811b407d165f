mod logging;
mod poller;

use clap::{Parser, Subcommand};
use hwbot_channels::telegram::TelegramNotifier;
use hwbot_core::config::{self, check_tokens, Credentials, Secrets, Settings};
use hwbot_providers::practicum::PracticumClient;
use poller::Poller;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "hwbot",
    version,
    about = "Watches homework review status and reports changes to Telegram"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to settings file.
    #[arg(short, long, default_value = "hwbot.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll forever (default).
    Start,
    /// Run a single poll cycle and exit.
    Once,
    /// Show which secrets are set and the effective settings.
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Variables already in the environment take precedence over `.env`.
    dotenvy::dotenv().ok();

    let settings = config::load(&cli.config)?;
    let _log_guard = logging::init(&settings.logging);
    match &settings.source {
        Some(path) => info!("settings loaded from {}", path.display()),
        None => info!("settings file {} not found, using defaults", cli.config),
    }

    let secrets = Secrets::from_env();

    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => {
            let Some(creds) = gate(secrets)? else {
                return Ok(ExitCode::FAILURE);
            };
            info!("hwbot: starting");
            build_poller(&settings, &creds).run().await;
        }
        Commands::Once => {
            let Some(creds) = gate(secrets)? else {
                return Ok(ExitCode::FAILURE);
            };
            let mut poller = build_poller(&settings, &creds);
            let outcome = poller.run_cycle().await;
            info!(
                "hwbot: single cycle finished: {outcome:?}, next cursor {}",
                poller.cursor()
            );
        }
        Commands::Status => {
            println!("hwbot — Status Check\n");
            println!("Settings: {}", cli.config);
            println!("Endpoint: {}", settings.poller.endpoint);
            println!("Retry period: {}s", settings.poller.retry_period_secs);
            println!();

            let missing = secrets.missing();
            for name in [
                config::PRACTICUM_TOKEN_VAR,
                config::TELEGRAM_TOKEN_VAR,
                config::TELEGRAM_CHAT_ID_VAR,
            ] {
                println!(
                    "  {name}: {}",
                    if missing.contains(&name) { "missing" } else { "set" }
                );
            }

            if !check_tokens(&secrets) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Startup token gate. `None` means the process must exit with status 1.
///
/// No chat notification is attempted here: the chat credentials may be the
/// very thing that is missing.
fn gate(secrets: Secrets) -> anyhow::Result<Option<Credentials>> {
    if !check_tokens(&secrets) {
        error!(
            "critical: missing required environment variables: {}. Stopping.",
            secrets.missing().join(", ")
        );
        return Ok(None);
    }
    Ok(Some(secrets.into_credentials()?))
}

/// Wire the API client and the notifier into a poller whose cursor starts now.
fn build_poller(settings: &Settings, creds: &Credentials) -> Poller {
    let api = PracticumClient::from_config(
        &creds.practicum_token,
        settings.poller.endpoint.clone(),
        settings.poller.request_timeout(),
    );
    let notifier = TelegramNotifier::new(
        &creds.telegram_token,
        &creds.telegram_chat_id,
        &settings.telegram,
    );
    Poller::new(
        Box::new(api),
        Box::new(notifier),
        settings.poller.retry_period(),
        chrono::Utc::now().timestamp(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_secrets() -> Secrets {
        Secrets {
            practicum_token: Some("y0_practicum".to_string()),
            telegram_token: Some("123:bot".to_string()),
            telegram_chat_id: Some("42".to_string()),
        }
    }

    #[test]
    fn test_gate_stops_without_secrets() {
        assert!(gate(Secrets::default()).unwrap().is_none());
    }

    #[test]
    fn test_gate_stops_on_empty_token() {
        let secrets = Secrets {
            telegram_token: Some(String::new()),
            ..full_secrets()
        };
        assert!(gate(secrets).unwrap().is_none());
    }

    #[test]
    fn test_gate_passes_credentials_through() {
        let creds = gate(full_secrets()).unwrap().expect("all secrets set");
        assert_eq!(creds.practicum_token, "y0_practicum");
        assert_eq!(creds.telegram_token, "123:bot");
        assert_eq!(creds.telegram_chat_id, "42");
    }
}
