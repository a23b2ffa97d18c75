//! CLI entrypoint for devmate
//!
//! Wires the layers together: configuration, the Ollama gateway, the local
//! tool executor, and either the interactive REPL or a single one-shot turn.

use anyhow::{bail, Result};
use clap::Parser;
use devmate_application::{
    LlmGateway, NoTurnProgress, RunTurnUseCase, SessionConfig, TurnProgressNotifier,
};
use devmate_domain::prompt::AssistantPromptTemplate;
use devmate_domain::{Conversation, Model, Role};
use devmate_infrastructure::{
    default_tool_spec, detect_framework, project_context, ConfigLoader, JsonlConversationLogger,
    LocalToolExecutor, OllamaGateway,
};
use devmate_presentation::{ChatRepl, Cli, TurnReporter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to a rolling file so they never interleave with the REPL;
    // the guard must outlive main for the writer to flush.
    let _log_guard = init_logging(cli.verbose);

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        match ConfigLoader::load(cli.config.as_ref()) {
            Ok(c) => c,
            Err(e) => bail!("Failed to load configuration: {}", e),
        }
    };

    let model = cli
        .model
        .as_deref()
        .or(config.backend.model.as_deref())
        .map(Model::new)
        .unwrap_or_default();

    info!(%model, base_url = %config.backend.base_url, "Starting devmate");

    // === Dependency Injection ===
    let gateway = Arc::new(OllamaGateway::new(config.backend.base_url.as_str()));
    let executor = Arc::new(LocalToolExecutor::new());

    // Backend reachability check before anything else
    let installed = match gateway.available_models().await {
        Ok(models) => models,
        Err(e) => {
            eprintln!("Could not reach the Ollama server at {}: {}", config.backend.base_url, e);
            eprintln!("Make sure it is running: ollama serve");
            std::process::exit(1);
        }
    };
    if installed.is_empty() {
        eprintln!("No models installed on the Ollama server.");
        eprintln!("Pull one with: ollama pull qwen3-coder:30b");
        std::process::exit(1);
    }

    // Project context for the system prompt
    let cwd = std::env::current_dir()?;
    let framework = detect_framework(&cwd);
    if !cli.quiet {
        println!("Framework: {}", framework.name);
        if !framework.features.is_empty() {
            println!("Features: {}", framework.features.join(", "));
        }
    }
    let context = project_context(&cwd, &framework);
    let system_prompt = AssistantPromptTemplate::system(&default_tool_spec(), &context);

    let mut use_case = RunTurnUseCase::new(gateway.clone(), executor);
    if !cli.no_transcript
        && let Some(logger) = transcript_logger()
    {
        use_case = use_case.with_logger(Arc::new(logger));
    }

    let session = SessionConfig::new(model);

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(use_case, gateway, session, system_prompt)
            .with_progress(!cli.quiet)
            .with_history(config.repl.history);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let mut conversation = Conversation::with_system_prompt(system_prompt);
    let reporter = TurnReporter::new();
    let silent = NoTurnProgress;
    let progress: &dyn TurnProgressNotifier = if cli.quiet {
        &silent
    } else {
        &reporter
    };

    let outcome = use_case
        .execute(&question, &mut conversation, &session, progress)
        .await;

    match outcome {
        Ok(_) => {
            // Without progress callbacks nothing was printed yet
            if cli.quiet
                && let Some(answer) = conversation
                    .messages()
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::Assistant)
            {
                println!("{}", answer.content);
            }
            Ok(())
        }
        Err(e) => {
            reporter.finish();
            bail!("{}", e);
        }
    }
}

/// Route tracing output to a daily-rolling log file under the data dir.
///
/// Falls back to stderr when no data dir exists. Returns the non-blocking
/// writer guard, which must stay alive until exit.
fn init_logging(verbose: u8) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    match dirs::data_dir() {
        Some(data_dir) => {
            let log_dir = data_dir.join("devmate").join("logs");
            let appender = tracing_appender::rolling::daily(log_dir, "devmate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
            None
        }
    }
}

/// Create the JSONL transcript logger for this session
fn transcript_logger() -> Option<JsonlConversationLogger> {
    let data_dir = dirs::data_dir()?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = data_dir
        .join("devmate")
        .join("transcripts")
        .join(format!("session-{}.jsonl", stamp));
    JsonlConversationLogger::new(path)
}
