//! gbot CLI: run the Telegram bot, the web-chat endpoint, or list captured
//! leads. Config from env and optional CLI args.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialogue::{ContentConfig, DialogueEngine};
use gbot_core::{init_tracing, NoopNotifier, Notifier, Stage, WhatsAppNotifier};
use gbot_telegram::TelegramConfig;
use storage::SessionRepository;
use tracing::info;

#[derive(Parser)]
#[command(name = "gbot")]
#[command(about = "Lead-capture bot CLI: telegram, web, leads", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Telegram {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Run the web-chat endpoint (port can override PORT).
    Web {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the most recently captured leads.
    Leads {
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Telegram { token } => run_telegram(token).await,
        Commands::Web { port } => run_web(port).await,
        Commands::Leads { limit } => list_leads(limit).await,
    }
}

fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:gbot.db".to_string())
}

fn default_log_file() -> String {
    std::env::var("LOG_FILE").unwrap_or_else(|_| "logs/gbot.log".to_string())
}

/// Builds the engine shared by both transports: SQLite store, notifier and
/// content tables from env.
async fn build_engine() -> Result<Arc<DialogueEngine>> {
    let repo = SessionRepository::new(&database_url())
        .await
        .context("Open session database (DATABASE_URL)")?;

    let notifier: Arc<dyn Notifier> = match std::env::var("WHATSAPP_GATEWAY_URL") {
        Ok(url) if !url.trim().is_empty() => Arc::new(WhatsAppNotifier::new(url)?),
        _ => {
            info!("WHATSAPP_GATEWAY_URL not set; lead notifications disabled");
            Arc::new(NoopNotifier)
        }
    };

    let content = ContentConfig::from_env();

    Ok(Arc::new(DialogueEngine::new(
        Arc::new(repo),
        notifier,
        content,
    )))
}

async fn run_telegram(token: Option<String>) -> Result<()> {
    let config = TelegramConfig::from_env(token)?;

    std::fs::create_dir_all("logs").context("Create logs directory")?;
    let log_file = config.log_file.clone().unwrap_or_else(default_log_file);
    init_tracing(&log_file)?;

    let engine = build_engine().await?;
    let bot = config.build_bot()?;

    info!("Bot started successfully");
    gbot_telegram::run_repl(bot, engine).await
}

async fn run_web(port: Option<u16>) -> Result<()> {
    std::fs::create_dir_all("logs").context("Create logs directory")?;
    init_tracing(&default_log_file())?;

    let port = port
        .or_else(|| std::env::var("PORT").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(4000);

    let engine = build_engine().await?;
    gbot_web::run_web(engine, port).await
}

/// Prints the most recent sessions that completed onboarding, newest first.
async fn list_leads(limit: i64) -> Result<()> {
    // Plain console subscriber; the report itself goes to stdout via println.
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .init();

    let repo = SessionRepository::new(&database_url())
        .await
        .context("Open session database (DATABASE_URL)")?;

    let sessions = repo.recent_sessions(limit).await?;
    let leads: Vec<_> = sessions
        .iter()
        .filter(|s| s.stage == Stage::MainMenu)
        .collect();

    println!("{} lead(s) captured:", leads.len());
    for session in leads {
        println!(
            "  {}  {:<20}  {:<16}  [{}]  {}",
            session.created_at.format("%Y-%m-%d %H:%M"),
            session.display_name.as_deref().unwrap_or("-"),
            session.contact_phone.as_deref().unwrap_or("-"),
            session.language.map(|l| l.code()).unwrap_or("-"),
            session.session_key,
        );
    }

    Ok(())
}
