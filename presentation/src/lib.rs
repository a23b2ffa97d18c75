//! Presentation layer for devmate
//!
//! CLI argument definitions, the interactive REPL, console formatting, and
//! progress reporting.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

pub use chat::ChatRepl;
pub use cli::Cli;
pub use output::{console::ConsoleFormatter, tasks::render_tasks};
pub use progress::TurnReporter;
