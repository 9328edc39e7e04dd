//! Toque Anônimo - anonymous, tone-filtered messages
//!
//! Runs the relay service and exposes the composer pipeline (tone analysis,
//! share links, delivery channels) on the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use toque::{
    codec::{self, Route},
    config::ToqueConfig,
    delivery::{Channel, Composer, Orchestrator, RelayClient, TerminalPlatform},
    tone,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "toque")]
#[command(author = "Toque Team")]
#[command(version)]
#[command(about = "Anonymous, tone-filtered message links with multi-channel delivery")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TOQUE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay HTTP service
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Score a message for respectfulness
    Analyze {
        /// Message text
        text: String,
    },

    /// Print the anonymous share link for a message
    Link {
        /// Message text
        text: String,

        /// Origin for the link (overrides config)
        #[arg(long)]
        origin: Option<String>,

        /// Skip the positivity rewrite
        #[arg(long)]
        raw: bool,
    },

    /// Decode the message carried by a share link
    Open {
        /// Share link
        url: String,
    },

    /// Deliver a message through one channel
    Send {
        /// copy-link, copy-text, whatsapp, email, sms, relay-email or relay-sms
        channel: Channel,

        /// Message text
        text: String,

        /// Relay base URL, required by the relay channels
        #[arg(long, env = "TOQUE_RELAY_URL")]
        relay: Option<String>,

        /// User agent used for device detection
        #[arg(long, default_value = "toque-cli")]
        user_agent: String,

        /// Skip the positivity rewrite
        #[arg(long)]
        raw: bool,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let config = ToqueConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            run_serve(config, host, port).await?;
        }
        Commands::Analyze { text } => {
            let report = tone::analyze(&text);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Link { text, origin, raw } => {
            let message = compose(&text, raw);
            let origin = origin.unwrap_or(config.share.origin);
            println!("{}", codec::build_share_link(&origin, &message));
        }
        Commands::Open { url } => match codec::route(&url) {
            Route::View(message) => println!("{}", message),
            Route::Compose => println!("Nenhuma mensagem neste link. Escreva a sua!"),
        },
        Commands::Send {
            channel,
            text,
            relay,
            user_agent,
            raw,
        } => {
            run_send(config, channel, &text, relay, user_agent, raw).await?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("toque={},tower_http={}", log_level, log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// The message every action sends
fn compose(text: &str, raw: bool) -> String {
    let mut composer = Composer::new(text);
    composer.set_positive_mode(!raw);
    composer.current_message()
}

async fn run_serve(mut config: ToqueConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Toque relay");
    toque::api::serve(config).await?;
    Ok(())
}

async fn run_send(
    config: ToqueConfig,
    channel: Channel,
    text: &str,
    relay: Option<String>,
    user_agent: String,
    raw: bool,
) -> Result<()> {
    let message = compose(text, raw);
    if message.is_empty() {
        anyhow::bail!("Escreva uma mensagem antes de enviar.");
    }

    let report = tone::analyze(&message);
    if !report.is_respectful() {
        eprintln!(
            "Tom: {} ({}/100)",
            report.quality.label(),
            report.score
        );
        for suggestion in &report.suggestions {
            eprintln!("  - {}", suggestion);
        }
    }

    let platform = Arc::new(TerminalPlatform::new(config.share.origin, user_agent));
    let mut orchestrator = Orchestrator::new(platform);
    if let Some(url) = relay {
        orchestrator = orchestrator.with_relay(RelayClient::new(url));
    }

    let outcome = orchestrator.deliver(channel, &message).await;
    println!("{}", outcome.label());
    Ok(())
}

fn show_config(config: Option<&ToqueConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default().masked();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
