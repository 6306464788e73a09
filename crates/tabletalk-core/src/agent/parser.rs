//! Parsing of raw model output into the next agent step.
//!
//! The model either finishes ("Final Answer: ...") or requests a tool
//! ("Action: ..." / "Action Input: ..."). Anything else is a malformed
//! step and fails the invocation rather than being guessed at.

use tabletalk_types::error::AgentError;

use super::prompt::FINAL_ANSWER_PREFIX;

/// The next move the model chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    /// Invoke a tool with the given input.
    Action { tool: String, input: String },
    /// The model produced its final answer.
    Final { answer: String },
}

/// Parse one completion into an [`AgentStep`].
///
/// A "Final Answer:" marker wins over any action text before it, which
/// matches how models interleave a closing thought with the answer.
pub fn parse_step(output: &str) -> Result<AgentStep, AgentError> {
    if let Some(idx) = output.rfind(FINAL_ANSWER_PREFIX) {
        let answer = output[idx + FINAL_ANSWER_PREFIX.len()..].trim().to_string();
        return Ok(AgentStep::Final { answer });
    }

    let tool = find_marker_value(output, "Action:");
    let input = find_marker_value(output, "Action Input:");

    match (tool, input) {
        (Some(tool), Some(input)) => Ok(AgentStep::Action {
            tool: tool.trim_matches('`').to_string(),
            input: strip_input_decoration(&input),
        }),
        (Some(_), None) => Err(AgentError::MalformedStep(
            "action without 'Action Input:'".to_string(),
        )),
        _ => Err(AgentError::MalformedStep(format!(
            "no action or final answer in: {}",
            preview(output)
        ))),
    }
}

/// Value of the last `marker` line in the output: the text after the
/// marker up to the end of that line, or the rest of the output for
/// "Action Input:" (queries may span lines).
fn find_marker_value(output: &str, marker: &str) -> Option<String> {
    let idx = output.rfind(marker)?;
    let rest = &output[idx + marker.len()..];

    if marker == "Action Input:" {
        Some(rest.trim().to_string())
    } else {
        Some(rest.lines().next().unwrap_or("").trim().to_string())
    }
}

/// Strip code fences and surrounding quotes models wrap queries in.
fn strip_input_decoration(input: &str) -> String {
    let mut s = input.trim();
    if s.starts_with("```") {
        s = s.trim_start_matches("```");
        s = s.strip_prefix("sql").unwrap_or(s);
        if let Some(end) = s.find("```") {
            s = &s[..end];
        }
    }
    s.trim().trim_matches('"').trim_matches('`').trim().to_string()
}

/// First characters of the output for the error message. Counts chars,
/// not bytes, so multibyte model output never splits mid-character.
fn preview(output: &str) -> String {
    let trimmed = output.trim();
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(77).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
