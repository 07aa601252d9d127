//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for streamchat
#[derive(Parser, Debug)]
#[command(name = "streamchat")]
#[command(author, version, about = "Terminal client for a streaming multi-thread chat server")]
#[command(long_about = r#"
streamchat talks to a chat server: it lists your conversation threads, replays
their history and streams the assistant's replies token by token.

Configuration files are loaded from (in priority order):
1. STREAMCHAT_* environment variables (e.g. STREAMCHAT_SERVER__BASE_URL)
2. --config <path>          Explicit config file
3. ./streamchat.toml        Project-level config
4. ~/.config/streamchat/config.toml   Global config

Example:
  streamchat
  streamchat --server http://localhost:8000 --thread 6f1c...
  streamchat -vv --log-dir ~/.local/state/streamchat
"#)]
pub struct Cli {
    /// Chat server base URL (overrides server.base_url)
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Open this thread instead of the most recent one
    #[arg(short, long, value_name = "ID")]
    pub thread: Option<String>,

    /// Start in a new, unsaved chat
    #[arg(long, conflicts_with = "thread")]
    pub new: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the tool-call spinner and the welcome banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write a JSONL transcript of every session into the log directory
    #[arg(long)]
    pub transcript: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
