//! System prompt assembly for the zero-shot ReAct SQL agent.
//!
//! The prompt teaches the model the Thought/Action/Action Input/
//! Observation loop and describes the three database tools. Completions
//! are cut at "Observation:" by a stop sequence so the engine, not the
//! model, supplies tool output.

use std::fmt::Write;

use super::toolkit::ToolName;

/// Marker the model emits when it is done.
pub const FINAL_ANSWER_PREFIX: &str = "Final Answer:";

/// Stop sequence cutting the completion before a hallucinated observation.
pub const OBSERVATION_STOP: &str = "Observation:";

/// Build the system prompt for one agent invocation.
///
/// `top_k` caps how many rows the model is told to fetch unless the
/// user asks for a specific count.
pub fn build_system_prompt(top_k: u32) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are an agent designed to interact with a SQLite database. \
         Given a question, create a syntactically correct SQLite query to run, \
         look at the result, and return the answer."
    );
    let _ = writeln!(
        prompt,
        "Unless the user specifies a number of results, limit your query to \
         at most {top_k} rows. Never query all columns from a table; ask only \
         for the relevant ones. The database is read-only: do not attempt any \
         INSERT, UPDATE, DELETE, or DDL statement."
    );
    prompt.push('\n');

    prompt.push_str("You have access to the following tools:\n\n");
    for tool in ToolName::ALL {
        let _ = writeln!(prompt, "{tool}: {}", tool.description());
    }

    prompt.push_str(
        "\nUse the following format:\n\n\
         Question: the input question\n\
         Thought: what to do next\n\
         Action: the tool to use, one of [",
    );
    for (i, tool) in ToolName::ALL.iter().enumerate() {
        if i > 0 {
            prompt.push_str(", ");
        }
        let _ = write!(prompt, "{tool}");
    }
    prompt.push_str(
        "]\n\
         Action Input: the input to the tool\n\
         Observation: the tool result\n\
         ... (Thought/Action/Action Input/Observation can repeat)\n\
         Thought: I now know the final answer\n\
         Final Answer: the answer to the original question\n\n\
         Always start by listing the tables, then inspect the schema of the \
         relevant ones before querying. Begin!\n",
    );

    prompt
}
