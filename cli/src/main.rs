//! CLI entrypoint for streamchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use streamchat_application::{
    ConversationLogger, InputLock, NoConversationLogger, SessionController, ThreadCoordinator,
};
use streamchat_domain::ThreadId;
use streamchat_infrastructure::{
    ConfigLoader, FileConfig, HttpChatStore, JsonlConversationLogger, SseStreamTransport,
    UuidThreadIdGenerator,
};
use streamchat_presentation::{ChatRepl, Cli, ConsoleChatView};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;

    // Must stay alive for the file writer to flush
    let log_dir = config.logging.dir.as_deref().map(expand_home);
    let _log_guard = init_logging(cli.verbose, log_dir.as_deref())?;
    info!("Starting streamchat against {}", config.server.base_url);

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let client_config = config.to_client_config();
    let store = Arc::new(HttpChatStore::new(&client_config)?);
    let transport = Arc::new(SseStreamTransport::new(&client_config)?);
    let view = Arc::new(ConsoleChatView::new().with_spinner(!cli.quiet));
    let conversation_logger = transcript_logger(&config);

    let controller =
        SessionController::with_parts(transport, InputLock::new(), conversation_logger.clone());
    let mut coordinator = ThreadCoordinator::new(
        store,
        view.clone(),
        controller,
        Arc::new(UuidThreadIdGenerator),
    )
    .with_conversation_logger(conversation_logger)
    .with_config(&client_config);

    // Startup: explicit thread, fresh draft, or the most recent thread
    let started = match (&cli.thread, cli.new) {
        (Some(id), _) => {
            let thread_id = ThreadId::parse(id.as_str())?;
            coordinator.refresh_threads().await;
            coordinator.select_thread(thread_id, None).await
        }
        (None, true) => {
            coordinator.refresh_threads().await;
            coordinator.start_new_draft();
            Ok(())
        }
        (None, false) => coordinator.bootstrap().await,
    };
    if let Err(e) = started {
        view.error(&e.to_string());
    }

    ChatRepl::new(coordinator, view)
        .with_history_file(config.repl.history_file.as_deref().map(expand_home))
        .with_banner(!cli.quiet)
        .run()
        .await?;

    Ok(())
}

/// Merge config sources, apply CLI overrides and validate.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.display().to_string());
    }
    if cli.transcript {
        config.logging.transcript = true;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("config: {}", error);
        }
        bail!("Invalid configuration ({} problem(s))", errors.len());
    }
    Ok(config)
}

/// Verbosity picks the level unless `RUST_LOG` is set. With a log directory,
/// output goes to daily files so it never interleaves with streamed replies.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "streamchat.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// JSONL transcript in the log directory (or the data directory), when
/// enabled. Failing to open it only disables transcripts.
fn transcript_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    if !config.logging.transcript {
        return Arc::new(NoConversationLogger);
    }

    let dir = config
        .logging
        .dir
        .as_deref()
        .map(expand_home)
        .or_else(|| dirs::data_dir().map(|d| d.join("streamchat").join("transcripts")));
    let Some(dir) = dir else {
        warn!("No directory for transcripts; transcript logging disabled");
        return Arc::new(NoConversationLogger);
    };

    match JsonlConversationLogger::in_dir(&dir) {
        Ok(logger) => {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open transcript in {}: {}", dir.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
