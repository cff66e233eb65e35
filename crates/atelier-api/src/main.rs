//! Atelier CLI and HTTP server entry point.
//!
//! Binary name: `atelier`
//!
//! Parses CLI arguments, resolves configuration, then either starts the
//! HTTP server or runs one of the headless client commands.

mod cli;
mod http;
mod state;

use std::path::Path;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use atelier_infra::config::ServerConfig;
use state::AppState;

#[derive(Parser)]
#[command(name = "atelier", version, about = "Companion desktop backend with an AI scaffold builder")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Machine-readable output where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listen port (overrides config file and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Listen host (overrides config file and HOST)
        #[arg(long)]
        host: Option<String>,
    },

    /// Run a build against a server and optionally export the archive
    Build {
        /// The build prompt
        prompt: Option<String>,

        /// Use a named starter prompt (landing, react, cli)
        #[arg(long, conflicts_with = "prompt")]
        preset: Option<String>,

        /// Attach a file as build context (repeatable, 500 KiB per file)
        #[arg(long = "context", value_name = "FILE")]
        context: Vec<std::path::PathBuf>,

        /// Write the resulting zip archive to this path
        #[arg(long, value_name = "PATH")]
        export: Option<std::path::PathBuf>,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:3001")]
        server: String,
    },

    /// Send one chat message to the companion
    Chat {
        /// The message to send
        message: String,

        /// Persona preset (companion, neutral, friendly, snarky, formal,
        /// hacker, cute)
        #[arg(long)]
        persona: Option<String>,

        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:3001")]
        server: String,
    },

    /// Query a server's credential status
    Status {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:3001")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,atelier=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { port, host } => {
            let mut config = ServerConfig::load(Path::new("config.toml")).await;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            serve(config).await?;
        }

        Commands::Build {
            prompt,
            preset,
            context,
            export,
            server,
        } => {
            cli::build::run(&server, prompt, preset, context, export, cli.json).await?;
        }

        Commands::Chat {
            message,
            persona,
            server,
        } => {
            cli::chat::run(&server, message, persona, cli.json).await?;
        }

        Commands::Status { server } => {
            cli::status::run(&server, cli.json).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let hosted = config.hosted_available();
    let speech = config.elevenlabs_api_key.is_some();

    let state = AppState::from_config(&config);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!();
    println!(
        "  {} Atelier listening on {}",
        style("⚡").bold(),
        style(format!("http://{addr}")).cyan()
    );
    if hosted {
        println!("  {} Hosted API key configured", style("✓").green());
    } else {
        println!(
            "  {} No hosted API key - chat and builder return 503",
            style("⚠").yellow()
        );
    }
    if speech {
        println!("  {} Speech synthesis configured", style("✓").green());
    } else {
        println!("  {} No speech API key - TTS disabled", style("⚠").yellow());
    }
    println!("  {}", style("Press Ctrl+C to stop").dim());
    println!();

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
