//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::console::ConsoleFormatter;
use crate::output::tasks::render_tasks;
use crate::progress::TurnReporter;
use colored::Colorize;
use devmate_application::ports::turn_progress::NoTurnProgress;
use devmate_application::{
    LlmGateway, RunTurnUseCase, SessionConfig, ToolExecutorPort, TurnOutcome,
    TurnProgressNotifier,
};
use devmate_domain::{Conversation, Model, TaskStatus, TaskTracker};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Interactive chat REPL
///
/// Owns the conversation history and the session configuration for the
/// lifetime of the process; nothing survives a restart.
pub struct ChatRepl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> {
    use_case: RunTurnUseCase<G, T>,
    gateway: Arc<G>,
    config: SessionConfig,
    conversation: Conversation,
    tasks: TaskTracker,
    show_progress: bool,
    save_history: bool,
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> ChatRepl<G, T> {
    /// Create a new ChatRepl
    pub fn new(
        use_case: RunTurnUseCase<G, T>,
        gateway: Arc<G>,
        config: SessionConfig,
        system_prompt: String,
    ) -> Self {
        Self {
            use_case,
            gateway,
            config,
            conversation: Conversation::with_system_prompt(system_prompt),
            tasks: TaskTracker::new(),
            show_progress: true,
            save_history: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set whether to persist input history
    pub fn with_history(mut self, save: bool) -> Self {
        self.save_history = save;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = if self.save_history {
            dirs::data_dir().map(|p| p.join("devmate").join("history.txt"))
        } else {
            None
        };

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    // Bare exit words, as well as /commands
                    if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
                        println!("Bye!");
                        break;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_input(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("+---------------------------------------------+");
        println!("|   devmate - your local coding assistant     |");
        println!("+---------------------------------------------+");
        println!();
        println!("Model: {}", self.config.model().to_string().bold());
        println!(
            "{}",
            "Tool calls run with your privileges and no sandbox.".dimmed()
        );
        println!();
        println!("Commands:");
        println!("  /help            - Show this help");
        println!("  /models          - List installed models");
        println!("  /model <name>    - Switch the active model");
        println!("  /tasks           - Show the task list");
        println!("  /task add <txt>  - Track a new task");
        println!("  /task start <n>  - Mark task n in progress");
        println!("  /task done <n>   - Mark task n completed");
        println!("  /quit            - Exit (also: exit, quit)");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    async fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                self.print_welcome();
                false
            }
            "/models" => {
                match self.gateway.available_models().await {
                    Ok(models) if models.is_empty() => {
                        println!(
                            "{}",
                            ConsoleFormatter::warning(
                                "No models installed. Pull one with: ollama pull qwen3-coder:30b"
                            )
                        );
                    }
                    Ok(models) => {
                        println!(
                            "\n{}\n",
                            ConsoleFormatter::model_list(&models, self.config.model().as_str())
                        );
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        eprintln!("Is Ollama running? Start it with: ollama serve");
                    }
                }
                false
            }
            _ if cmd.starts_with("/model ") => {
                let name = cmd["/model ".len()..].trim();
                if name.is_empty() {
                    println!("Usage: /model <name>");
                } else {
                    self.config.set_model(Model::new(name));
                    println!("{} Model switched to: {}", "v".green(), name.bold());
                    println!(
                        "{}",
                        "Applies to the next message; the conversation so far is kept.".dimmed()
                    );
                }
                false
            }
            "/tasks" => {
                let rendered = render_tasks(&self.tasks);
                if rendered.is_empty() {
                    println!("No tasks tracked yet. Add one with: /task add <description>");
                } else {
                    println!("\n{}", rendered);
                }
                false
            }
            _ if cmd.starts_with("/task ") => {
                self.handle_task_command(cmd["/task ".len()..].trim());
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    /// Handle `/task add|start|done ...` subcommands.
    ///
    /// Positions are 1-based, matching the rendered table.
    fn handle_task_command(&mut self, args: &str) {
        let (action, rest) = match args.split_once(' ') {
            Some((action, rest)) => (action, rest.trim()),
            None => (args, ""),
        };

        match action {
            "add" if !rest.is_empty() => {
                self.tasks.add(rest, format!("Working on: {}", rest));
                println!("{} Task {} added", "v".green(), self.tasks.len());
            }
            "start" | "done" => {
                let status = if action == "start" {
                    TaskStatus::InProgress
                } else {
                    TaskStatus::Completed
                };
                match rest.parse::<usize>() {
                    Ok(position) if position >= 1 => {
                        match self.tasks.set_status(position - 1, status) {
                            Ok(()) => println!("{} Task {} is now {}", "v".green(), position, status),
                            Err(e) => println!("{}", ConsoleFormatter::warning(&e.to_string())),
                        }
                    }
                    _ => println!("Usage: /task {} <number>", action),
                }
            }
            _ => {
                println!("Usage: /task add <description> | /task start <n> | /task done <n>");
            }
        }
    }

    async fn process_input(&mut self, input: &str) {
        println!();

        let reporter = TurnReporter::new();
        let silent = NoTurnProgress;
        let progress: &dyn TurnProgressNotifier = if self.show_progress {
            &reporter
        } else {
            &silent
        };

        let result = self
            .use_case
            .execute(input, &mut self.conversation, &self.config, progress)
            .await;

        match result {
            Ok(TurnOutcome::Completed) => {}
            Ok(TurnOutcome::EmptyResponse) => {
                println!(
                    "{}",
                    ConsoleFormatter::warning("Try rephrasing, or switch models with /model")
                );
            }
            Ok(TurnOutcome::IterationCapExceeded) => {
                println!(
                    "{}",
                    ConsoleFormatter::warning("Ask a follow-up to continue where it stopped")
                );
            }
            Err(e) => {
                reporter.finish();
                eprintln!("Error: {}", e);
                eprintln!("Is the model available? Check with: ollama list");
            }
        }

        println!("{}", "-".repeat(60).dimmed());
    }
}
