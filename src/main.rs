use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use conversa::config::DEFAULT_CONFIG_PATH;
use conversa::render::{ConsoleNotifier, ConsoleSurface, LogNotifier};
use conversa::speech::{ConsoleInput, ConsoleRecognizer, ForwardedRecognition};
use conversa::{
    chat, create_router, AppState, BackendClient, Config, ConversationSession,
    SessionCollaborators, SnapshotSurface,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Conversa - voice conversation client for a remote assistant
#[derive(Parser)]
#[command(name = "conversa", version, about)]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Talk to the assistant from this terminal
    Chat,
    /// Serve the HTTP control API for a browser front end
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn,conversa=info",
        1 => "info,conversa=debug",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let cfg = Config::load(&cli.config)?;
    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", cfg.backend.base_url);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(cfg).await,
        Command::Serve { port } => run_server(cfg, port).await,
    }
}

async fn run_chat(cfg: Config) -> Result<()> {
    let console = ConsoleInput::stdin();
    let backend = BackendClient::new(cfg.endpoints(), cfg.request_timeout())
        .context("Failed to create backend client")?;

    let session = Arc::new(ConversationSession::new(
        cfg.session_config(),
        SessionCollaborators {
            backend: Arc::new(backend),
            recognizer: Box::new(ConsoleRecognizer::new(console.clone())),
            synthesizer: cfg.synthesizer(),
            surface: Arc::new(ConsoleSurface),
            notifier: Arc::new(ConsoleNotifier),
        },
    ));

    chat::run(&session, &console, &cfg).await
}

async fn run_server(cfg: Config, port: Option<u16>) -> Result<()> {
    let backend = BackendClient::new(cfg.endpoints(), cfg.request_timeout())
        .context("Failed to create backend client")?;
    let view = Arc::new(SnapshotSurface::new());

    let session = ConversationSession::new(
        cfg.session_config(),
        SessionCollaborators {
            backend: Arc::new(backend),
            // Recognition happens in the front end and arrives per request
            recognizer: Box::new(ForwardedRecognition::unsupported()),
            synthesizer: cfg.synthesizer(),
            surface: view.clone(),
            notifier: Arc::new(LogNotifier),
        },
    );

    let state = AppState::new(Arc::new(session), view).with_export_file(&cfg.session.export_file);

    let addr = format!(
        "{}:{}",
        cfg.service.http.bind,
        port.unwrap_or(cfg.service.http.port)
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP API listening on {}", addr);

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server failed")
}
