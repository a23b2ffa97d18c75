//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for devmate
#[derive(Parser, Debug)]
#[command(name = "devmate")]
#[command(author, version, about = "Local developer assistant driven by an Ollama model")]
#[command(long_about = r#"
Devmate is a conversational developer assistant for the current project.
The model can run local tools (shell commands, file reads/writes/edits,
file and content search) by embedding TOOL: invocations in its replies.

Commands and file writes run with your privileges and no sandbox.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./devmate.toml      Project-level config
3. ~/.config/devmate/config.toml   Global config

Example:
  devmate "What does the login controller do?"
  devmate --chat -m qwen3-coder:30b
"#)]
pub struct Cli {
    /// The request to process (omit with --chat for interactive mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Model tag to use (overrides the configured default)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Disable the JSONL conversation transcript
    #[arg(long)]
    pub no_transcript: bool,
}
