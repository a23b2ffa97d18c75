//! Run Turn use case
//!
//! Orchestrates one user turn: send the conversation history to the model,
//! parse the reply for tool invocations, execute them sequentially, feed
//! the results back as conversation context, and repeat until the model
//! answers without tools or the iteration cap ends the round-trip loop.
//!
//! Tool failures never abort the turn; they return to the model as data.
//! Only a gateway failure aborts, and the iteration cap terminates with a
//! warning rather than an error.

use crate::config::SessionConfig;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLog};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::turn_progress::TurnProgressNotifier;
use devmate_domain::prompt::AssistantPromptTemplate;
use devmate_domain::{parse_tool_calls, Conversation};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Safety cap on model round-trips per user turn
pub const MAX_TURN_ITERATIONS: usize = 20;

/// Errors that abort a turn
#[derive(Error, Debug)]
pub enum RunTurnError {
    #[error("Backend failure: {0}")]
    Gateway(#[from] GatewayError),
}

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model gave a final answer with no further tool requests
    Completed,
    /// The model stayed blank even after the simplified retry
    EmptyResponse,
    /// The round-trip cap terminated the turn
    IterationCapExceeded,
}

/// Use case driving one conversation turn
pub struct RunTurnUseCase<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> {
    gateway: Arc<G>,
    tool_executor: Arc<T>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static, T: ToolExecutorPort + 'static> RunTurnUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tool_executor: Arc<T>) -> Self {
        Self {
            gateway,
            tool_executor,
            logger: Arc::new(NoConversationLog),
        }
    }

    /// Attach a conversation transcript logger
    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run one user turn to completion.
    ///
    /// Appends the user input and everything that follows (assistant
    /// replies, tool-result messages) to `conversation`. The history is
    /// never truncated; the only in-place rewrite is the documented
    /// blank-reply retry substitution.
    pub async fn execute(
        &self,
        input: &str,
        conversation: &mut Conversation,
        config: &SessionConfig,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutcome, RunTurnError> {
        info!(model = %config.model(), "Starting turn");

        conversation.push_user(input);
        self.logger.log(ConversationEvent::new(
            "user_input",
            serde_json::json!({ "content": input }),
        ));

        let mut iteration = 0usize;
        let mut retried = false;

        loop {
            if iteration >= MAX_TURN_ITERATIONS {
                warn!("Iteration cap of {} reached, ending turn", MAX_TURN_ITERATIONS);
                progress.on_iteration_cap(MAX_TURN_ITERATIONS);
                return Ok(TurnOutcome::IterationCapExceeded);
            }
            iteration += 1;
            progress.on_model_call(iteration, MAX_TURN_ITERATIONS);

            let mut reply = self
                .gateway
                .chat(config.model(), conversation.messages())
                .await?;

            if reply.content.trim().is_empty() {
                if retried {
                    warn!("Model returned a blank reply after retry, ending turn");
                    progress.on_empty_response();
                    return Ok(TurnOutcome::EmptyResponse);
                }
                retried = true;
                debug!("Blank reply, retrying once with a simplified restatement");
                progress.on_empty_retry();

                conversation
                    .replace_last_user_message(AssistantPromptTemplate::simplified_retry(input));
                reply = self
                    .gateway
                    .chat(config.model(), conversation.messages())
                    .await?;

                if reply.content.trim().is_empty() {
                    warn!("Model stayed blank after retry, ending turn");
                    progress.on_empty_response();
                    return Ok(TurnOutcome::EmptyResponse);
                }
            }

            conversation.push_assistant(&reply.content);
            self.logger.log(ConversationEvent::new(
                "assistant_reply",
                serde_json::json!({
                    "model": config.model().as_str(),
                    "iteration": iteration,
                    "content": reply.content,
                }),
            ));
            progress.on_assistant_message(&reply.content);

            let calls = parse_tool_calls(&reply.content);
            if calls.is_empty() {
                return Ok(TurnOutcome::Completed);
            }

            debug!(count = calls.len(), iteration, "Executing requested tools");
            progress.on_tools_requested(calls.len(), iteration, MAX_TURN_ITERATIONS);

            let mut results = Vec::with_capacity(calls.len());
            for call in &calls {
                progress.on_tool_call(call);
                self.logger.log(ConversationEvent::new(
                    "tool_call",
                    serde_json::json!({ "tool": call.tool_name, "args": call.arguments }),
                ));

                let result = self.tool_executor.execute(call).await;

                progress.on_tool_result(&result);
                self.logger.log(ConversationEvent::new(
                    "tool_result",
                    serde_json::json!({
                        "tool": result.tool_name,
                        "success": result.success,
                        "error": result.error.as_ref().map(|e| e.code.clone()),
                    }),
                ));
                results.push(result);
            }

            let results_text = results
                .iter()
                .map(|r| r.as_context())
                .collect::<Vec<_>>()
                .join("\n\n");
            conversation.push_user(format!("TOOL RESULTS:\n{}", results_text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::ModelInfo;
    use crate::ports::turn_progress::NoTurnProgress;
    use async_trait::async_trait;
    use devmate_domain::{
        Message, Model, Role, ToolCall, ToolDefinition, ToolParameter, ToolResult, ToolSpec,
    };
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Gateway that replays a scripted list of replies.
    ///
    /// When the script runs out, the fallback reply is returned forever,
    /// which is handy for exercising the iteration cap.
    struct ScriptedGateway {
        replies: Mutex<VecDeque<String>>,
        fallback: String,
        calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn new(replies: impl IntoIterator<Item = &'static str>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().map(String::from).collect()),
                fallback: "done".to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
            self.fallback = fallback.into();
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn chat(
            &self,
            _model: &Model,
            _messages: &[Message],
        ) -> Result<Message, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let content = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());
            Ok(Message::assistant(content))
        }

        async fn available_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
            Ok(Vec::new())
        }
    }

    /// Gateway whose every call fails
    struct FailingGateway;

    #[async_trait]
    impl LlmGateway for FailingGateway {
        async fn chat(
            &self,
            _model: &Model,
            _messages: &[Message],
        ) -> Result<Message, GatewayError> {
            Err(GatewayError::ConnectionError("connection refused".into()))
        }

        async fn available_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
            Err(GatewayError::ConnectionError("connection refused".into()))
        }
    }

    /// Executor that records calls and answers with canned successes
    struct RecordingExecutor {
        spec: ToolSpec,
        executed: Mutex<Vec<ToolCall>>,
    }

    impl RecordingExecutor {
        fn new() -> Self {
            let spec = ToolSpec::new().register(
                ToolDefinition::new("bash", "run a command")
                    .with_parameter(ToolParameter::new("command", "command", true)),
            );
            Self {
                spec,
                executed: Mutex::new(Vec::new()),
            }
        }

        fn executed_count(&self) -> usize {
            self.executed.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ToolExecutorPort for RecordingExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            self.executed.lock().unwrap().push(call.clone());
            ToolResult::success(&call.tool_name, "ok")
        }
    }

    fn use_case(
        gateway: ScriptedGateway,
    ) -> (
        RunTurnUseCase<ScriptedGateway, RecordingExecutor>,
        Arc<ScriptedGateway>,
        Arc<RecordingExecutor>,
    ) {
        let gateway = Arc::new(gateway);
        let executor = Arc::new(RecordingExecutor::new());
        (
            RunTurnUseCase::new(gateway.clone(), executor.clone()),
            gateway,
            executor,
        )
    }

    #[tokio::test]
    async fn test_turn_completes_without_tools() {
        let (use_case, gateway, executor) =
            use_case(ScriptedGateway::new(["Here is your answer."]));
        let mut conversation = Conversation::with_system_prompt("system");
        let config = SessionConfig::default();

        let outcome = use_case
            .execute("question", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(gateway.call_count(), 1);
        assert_eq!(executor.executed_count(), 0);
        // system + user + assistant
        assert_eq!(conversation.len(), 3);
    }

    #[tokio::test]
    async fn test_turn_executes_tools_and_appends_results() {
        let (use_case, gateway, executor) = use_case(ScriptedGateway::new([
            "Let me look.\nTOOL:bash(command=\"ls\")",
            "The directory is empty.",
        ]));
        let mut conversation = Conversation::new();
        let config = SessionConfig::default();

        let outcome = use_case
            .execute("what is here?", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(gateway.call_count(), 2);
        assert_eq!(executor.executed_count(), 1);

        // user, assistant, tool-results user message, final assistant
        let messages = conversation.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, Role::User);
        assert!(messages[2].content.starts_with("TOOL RESULTS:"));
        assert!(messages[2].content.contains("Result of bash:"));
        assert!(messages[2].content.contains("ok"));
    }

    #[tokio::test]
    async fn test_multiple_tools_run_in_parser_order() {
        let (use_case, _, executor) = use_case(ScriptedGateway::new([
            "TOOL:bash(command=\"first\")\nTOOL:bash(command=\"second\")",
            "done",
        ]));
        let mut conversation = Conversation::new();
        let config = SessionConfig::default();

        use_case
            .execute("go", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        let executed = executor.executed.lock().unwrap();
        assert_eq!(executed.len(), 2);
        assert_eq!(executed[0].get_str("command"), Some("first"));
        assert_eq!(executed[1].get_str("command"), Some("second"));
    }

    #[tokio::test]
    async fn test_blank_reply_retries_once_with_restatement() {
        let (use_case, gateway, _) =
            use_case(ScriptedGateway::new(["", "Recovered answer."]));
        let mut conversation = Conversation::new();
        let config = SessionConfig::default();

        let outcome = use_case
            .execute("why does login fail?", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(gateway.call_count(), 2);

        // The user message was replaced by the simplified restatement
        let messages = conversation.messages();
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].content.contains("why does login fail?"));
        assert_ne!(messages[0].content, "why does login fail?");
    }

    #[tokio::test]
    async fn test_blank_reply_twice_aborts_turn() {
        let (use_case, gateway, _) =
            use_case(ScriptedGateway::new(["", ""]).with_fallback(""));
        let mut conversation = Conversation::new();
        let config = SessionConfig::default();

        let outcome = use_case
            .execute("hello", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::EmptyResponse);
        assert_eq!(gateway.call_count(), 2);
        // No assistant message was appended
        assert_eq!(conversation.len(), 1);
    }

    #[tokio::test]
    async fn test_iteration_cap_terminates_turn() {
        // Every reply requests another tool: without the cap this would
        // loop forever.
        let gateway = ScriptedGateway::new([])
            .with_fallback("More to do.\nTOOL:bash(command=\"echo next\")");
        let (use_case, gateway, executor) = use_case(gateway);
        let mut conversation = Conversation::new();
        let config = SessionConfig::default();

        let outcome = use_case
            .execute("loop forever", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        assert_eq!(outcome, TurnOutcome::IterationCapExceeded);
        assert_eq!(gateway.call_count(), MAX_TURN_ITERATIONS);
        assert_eq!(executor.executed_count(), MAX_TURN_ITERATIONS);
    }

    #[tokio::test]
    async fn test_gateway_failure_aborts_turn() {
        let gateway = Arc::new(FailingGateway);
        let executor = Arc::new(RecordingExecutor::new());
        let use_case = RunTurnUseCase::new(gateway, executor);
        let mut conversation = Conversation::new();
        let config = SessionConfig::default();

        let err = use_case
            .execute("hello", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, RunTurnError::Gateway(_)));
    }

    #[tokio::test]
    async fn test_history_is_append_only_across_turns() {
        let (use_case, _, _) = use_case(ScriptedGateway::new(["first answer", "second answer"]));
        let mut conversation = Conversation::with_system_prompt("system");
        let config = SessionConfig::default();

        use_case
            .execute("one", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();
        let len_after_first = conversation.len();

        use_case
            .execute("two", &mut conversation, &config, &NoTurnProgress)
            .await
            .unwrap();

        assert!(conversation.len() > len_after_first);
        assert_eq!(conversation.messages()[1].content, "one");
        assert_eq!(conversation.messages()[2].content, "first answer");
    }
}
