//! The zero-shot ReAct SQL agent engine.
//!
//! One invocation is a bounded loop: build a completion request from
//! the session history plus the reasoning scratchpad, parse the model's
//! next step, dispatch the tool, append the observation, repeat until a
//! final answer or the step limit.

use tracing::{Instrument, debug, info, info_span, warn};

use tabletalk_types::chat::{AgentResponse, ChatTurn, TurnRole};
use tabletalk_types::error::AgentError;
use tabletalk_types::llm::{CompletionRequest, Message, MessageRole};

use crate::llm::BoxLlmProvider;

use super::classify::classify_final_answer;
use super::parser::{AgentStep, parse_step};
use super::prompt::{OBSERVATION_STOP, build_system_prompt};
use super::toolkit::{SqlToolkit, ToolError, ToolName};
use super::Agent;

/// Row cap the prompt teaches the model to respect.
const DEFAULT_TOP_K: u32 = 10;

/// Tuning for one agent engine.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    pub max_steps: u32,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "llama3-8b-8192".to_string(),
            max_steps: 15,
            max_tokens: 1024,
            temperature: 0.0,
        }
    }
}

/// LLM-backed SQL agent over a read-only toolkit.
pub struct SqlAgentEngine<T: SqlToolkit> {
    provider: BoxLlmProvider,
    toolkit: T,
    settings: AgentSettings,
}

impl<T: SqlToolkit> SqlAgentEngine<T> {
    pub fn new(provider: BoxLlmProvider, toolkit: T, settings: AgentSettings) -> Self {
        Self {
            provider,
            toolkit,
            settings,
        }
    }

    /// Run the reasoning loop for one question.
    async fn run(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<AgentResponse, AgentError> {
        let system_prompt = build_system_prompt(DEFAULT_TOP_K);
        let mut scratchpad = format!("Question: {question}\nThought: ");

        for step in 1..=self.settings.max_steps {
            let span = info_span!(
                "agent.step",
                step,
                model = %self.settings.model,
                provider = self.provider.name(),
            );

            let request = self.build_request(&system_prompt, history, &scratchpad);
            let response = self.provider.complete(&request).instrument(span).await?;

            match parse_step(&response.content)? {
                AgentStep::Final { answer } => {
                    info!(step, "agent produced final answer");
                    return Ok(classify_final_answer(&answer));
                }
                AgentStep::Action { tool, input } => {
                    debug!(%tool, %input, "agent action");
                    let observation = self.dispatch(&tool, &input).await?;
                    debug!(observation = %truncate(&observation, 200), "observation");

                    scratchpad.push_str(response.content.trim_end());
                    scratchpad.push_str(&format!("\nObservation: {observation}\nThought: "));
                }
            }
        }

        warn!(max_steps = self.settings.max_steps, "agent step limit reached");
        Err(AgentError::StepLimit(self.settings.max_steps))
    }

    /// Execute one tool call and produce its observation text.
    ///
    /// Unknown tools and statement-level failures come back as
    /// observations so the model can revise its approach; only
    /// connection-level failures abort the invocation.
    async fn dispatch(&self, tool: &str, input: &str) -> Result<String, AgentError> {
        let tool_name: ToolName = match tool.parse() {
            Ok(name) => name,
            Err(msg) => return Ok(format!("Error: {msg}. Use one of the listed tools.")),
        };

        let outcome = match tool_name {
            ToolName::ListTables => self.toolkit.list_tables().await.map(|t| t.join(", ")),
            ToolName::Schema => {
                let tables: Vec<String> = input
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                self.toolkit.table_schema(&tables).await
            }
            ToolName::Query => self
                .toolkit
                .run_query(input)
                .await
                .map(|result| result.to_observation()),
        };

        match outcome {
            Ok(observation) => Ok(observation),
            Err(ToolError::Statement(msg)) => Ok(format!("Error: {msg}")),
            Err(ToolError::Connection(e)) => Err(AgentError::Tool(e)),
        }
    }

    fn build_request(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        scratchpad: &str,
    ) -> CompletionRequest {
        let mut messages: Vec<Message> = history
            .iter()
            .map(|turn| Message {
                role: match turn.role {
                    TurnRole::User => MessageRole::User,
                    TurnRole::Assistant => MessageRole::Assistant,
                },
                content: turn.content.clone(),
            })
            .collect();

        // The scratchpad goes in as the current user message so the
        // model continues the Thought it was left on.
        messages.push(Message::user(scratchpad));

        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            system: Some(system_prompt.to_string()),
            max_tokens: self.settings.max_tokens,
            temperature: Some(self.settings.temperature),
            stop_sequences: Some(vec![OBSERVATION_STOP.to_string()]),
        }
    }
}

impl<T: SqlToolkit> Agent for SqlAgentEngine<T> {
    async fn ask(
        &self,
        question: &str,
        history: &[ChatTurn],
    ) -> Result<AgentResponse, AgentError> {
        self.run(question, history).await
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}
