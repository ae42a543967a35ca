//! voice-relay: credential-injecting HTTP relay for a browser voice assistant
//!
//! Sits between a static browser frontend and two upstream providers:
//! - a speech synthesis API (voice catalog + raw WAV generation)
//! - a chat completion API (conversational replies)

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

use voice_relay::{api::VoiceCatalog, api::TTS_VERSION_HEADER, config::AppConfig, run_server};

#[derive(Parser)]
#[command(name = "voice-relay")]
#[command(version = "0.1.0")]
#[command(about = "HTTP relay for a browser voice assistant")]
#[command(long_about = "
voice-relay fronts two upstream providers for a browser voice assistant:
  - a speech synthesis API (/voices catalog listing, /generate WAV audio)
  - a chat completion API (/chat conversational replies)

Credentials come from the environment (CARTESIA_API_KEY, OPENAI_API_KEY);
everything else is optional YAML configuration.

Example usage:
  voice-relay run --port 10000
  voice-relay check-config --config config.yaml
")]
struct Cli {
    /// Path to config file (optional; built-in defaults apply without one)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Run {
        /// Override listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration and print the effective settings
    CheckConfig,

    /// Test connectivity to both upstream providers
    TestUpstreams,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .init();

    match cli.command {
        Commands::Run { port } => {
            run_relay(cli.config, port).await?;
        }
        Commands::CheckConfig => {
            check_config(cli.config);
        }
        Commands::TestUpstreams => {
            test_upstreams(cli.config).await?;
        }
    }

    Ok(())
}

/// Run the relay server
async fn run_relay(
    config_path: Option<PathBuf>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config_or_exit(config_path.as_deref());
    config.apply_env_overrides();

    if let Some(port) = port_override {
        config.server.port = port;
    }

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    run_server(config).await
}

/// Validate configuration and print a summary
fn check_config(config_path: Option<PathBuf>) {
    let mut config = load_config_or_exit(config_path.as_deref());
    config.apply_env_overrides();

    match config.validate() {
        Ok(()) => {
            println!("✓ Configuration is valid\n");
            println!("Server:");
            println!("  Listen: {}:{}", config.server.host, config.server.port);
            println!("  Frontend: {}", config.server.frontend_dir);
            println!("\nTTS upstream:");
            println!("  URL: {}", config.tts.base_url());
            println!("  API version: {}", config.tts.api_version);
            println!("  Default model: {}", config.tts.default_model);
            println!("  Credential: {}", credential_status(&config.tts.api_key));
            println!("  Timeout: {}s", config.tts.timeout_seconds);
            println!("\nChat upstream:");
            println!("  URL: {}", config.chat.base_url());
            println!("  Model: {}", config.chat.model);
            println!("  Credential: {}", credential_status(&config.chat.api_key));
            println!("  Timeout: {}s", config.chat.timeout_seconds);
            println!("\nAssistant:");
            println!("  Persona: {} chars", config.assistant.persona.len());
            println!("  Mock orders: {}", config.assistant.orders.len());
        }
        Err(e) => {
            eprintln!("✗ Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

fn credential_status(key: &Option<String>) -> &'static str {
    match key {
        Some(_) => "configured",
        None => "not set",
    }
}

/// Probe both upstream providers
async fn test_upstreams(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config_or_exit(config_path.as_deref());
    config.apply_env_overrides();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let voices_url = config.tts.voices_url();
    println!("Testing voice catalog: {}", voices_url);

    let mut request = client
        .get(&voices_url)
        .header(TTS_VERSION_HEADER, config.tts.api_version.as_str());
    if let Some(ref key) = config.tts.api_key {
        request = request.bearer_auth(key);
    }

    match request.send().await {
        Ok(resp) if resp.status().is_success() => {
            println!("✓ Voice catalog reachable ({})", resp.status());
            if let Ok(catalog) = resp.json::<VoiceCatalog>().await {
                println!("  Voices: {}", catalog.data.len());
                for voice in catalog.data.iter().take(5) {
                    println!(
                        "    - {} ({})",
                        voice.name,
                        voice.language.as_deref().unwrap_or("unknown")
                    );
                }
            }
        }
        Ok(resp) => {
            println!("✗ Voice catalog returned error status: {}", resp.status());
        }
        Err(e) => {
            println!("✗ Failed to reach voice catalog: {}", e);
        }
    }

    let models_url = format!("{}/v1/models", config.chat.base_url());
    println!("\nTesting chat provider: {}", models_url);

    let mut request = client.get(&models_url);
    if let Some(ref key) = config.chat.api_key {
        request = request.bearer_auth(key);
    }

    match request.send().await {
        Ok(resp) if resp.status().is_success() => {
            println!("✓ Chat provider reachable ({})", resp.status());
        }
        Ok(resp) => {
            println!("✗ Chat provider returned error status: {}", resp.status());
        }
        Err(e) => {
            println!("✗ Failed to reach chat provider: {}", e);
        }
    }

    Ok(())
}

/// Load configuration or exit with error
fn load_config_or_exit(config_path: Option<&Path>) -> AppConfig {
    match AppConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            eprintln!("\nThe config file is optional; without one the relay runs on built-in defaults.");
            eprintln!("Copy config.yaml.default to config.yaml to customize.");
            std::process::exit(1);
        }
    }
}
