//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the
//! appropriate commands.

pub mod model_list;

use std::error::Error;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::constants::DEFAULT_SERVER_URL;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "causerie")]
#[command(about = "A terminal chat client for self-hosted chat service backends")]
#[command(
    long_about = "Causerie is a full-screen terminal chat interface for self-hosted chat \
service backends. It renders the conversation, relays messages to the backend's chat \
endpoint, and shows the backend's model catalog.\n\n\
Server selection:\n\
  --server URL            Use URL for this invocation\n\
  CAUSERIE_SERVER         Environment fallback\n\
  causerie set server URL Persist a default in the config file\n\n\
Controls:\n\
  Type                    Enter your message in the input field\n\
  Enter                   Send the message\n\
  Up/Down/PgUp/PgDn       Scroll through chat history\n\
  F2                      Toggle the model catalog pane\n\
  Ctrl+C                  Quit the application\n\n\
Commands:\n\
  /clear                  Clear the conversation\n\
  /models                 Refresh and show the model catalog\n\
  /log [filename]         Enable or pause transcript logging\n\
  /help                   Show extended help"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides CAUSERIE_SERVER and the config file)
    #[arg(short = 's', long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List the models the backend offers
    Models,
    /// Set configuration values
    Set {
        /// Configuration key to set (server, theme)
        key: String,
        /// Value to set for the key
        value: String,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load()?;
    let server_url = resolve_server_url(args.server.as_deref(), &config);

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(server_url, args.log, &config).await,
        Commands::Models => model_list::list_models(&server_url).await,
        Commands::Set { key, value } => {
            let mut config = config;
            match key.as_str() {
                "server" => {
                    config.server = Some(value.clone());
                    config.save()?;
                    println!("Set server to: {value}");
                }
                "theme" => {
                    config.theme = Some(value.clone());
                    config.save()?;
                    println!("Set theme to: {value}");
                }
                _ => {
                    eprintln!("Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = config;
            match key.as_str() {
                "server" => {
                    config.server = None;
                    config.save()?;
                    println!("Unset server");
                }
                "theme" => {
                    config.theme = None;
                    config.save()?;
                    println!("Unset theme");
                }
                _ => {
                    eprintln!("Unknown config key: {key}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}

/// Resolve the backend base URL: flag, then environment, then config,
/// then the demo server default.
pub fn resolve_server_url(flag: Option<&str>, config: &Config) -> String {
    if let Some(url) = flag {
        if !url.is_empty() {
            return url.to_string();
        }
    }
    if let Ok(url) = std::env::var("CAUSERIE_SERVER") {
        if !url.is_empty() {
            return url;
        }
    }
    if let Some(url) = &config.server {
        return url.clone();
    }
    DEFAULT_SERVER_URL.to_string()
}

/// Diagnostics go to a file named by CAUSERIE_LOG, or nowhere. Writing
/// them to stderr would corrupt the alternate screen.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("CAUSERIE_LOG_FILTER").unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(path) = std::env::var("CAUSERIE_LOG") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::sink)
        .init();
}
