//! Chat turn, agent response, and rendered view types for TableTalk.
//!
//! These model one interactive session: the turns held in the session
//! store, the tagged union an agent invocation produces, and the view
//! shape the renderer dispatches it into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a turn in the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message in the chat history.
///
/// Turns are chronological, insertion-order preserved, and owned
/// exclusively by the session store for the lifetime of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a user turn stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant turn stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// What an agent invocation produced, decided once at the agent-adapter
/// boundary so downstream code dispatches on a closed tag set.
///
/// `Table` carries ordered rows of cell strings; arity uniformity is the
/// renderer's concern, not the classifier's. `Unrecognized` covers any
/// shape that is neither prose nor rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentResponse {
    Text { content: String },
    Table { rows: Vec<Vec<String>> },
    Unrecognized,
}

impl AgentResponse {
    pub fn text(content: impl Into<String>) -> Self {
        AgentResponse::Text {
            content: content.into(),
        }
    }

    pub fn table(rows: Vec<Vec<String>>) -> Self {
        AgentResponse::Table { rows }
    }
}

/// The rendered form of an agent response, ready for a chat surface.
///
/// `Grid` headers are synthesized positional labels ("Column 1", ...) --
/// there is no semantic header inference. `Notice` is the non-fatal
/// degradation path for malformed shapes and per-query failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedView {
    /// Plain assistant message content.
    Message { content: String },
    /// A structured grid with synthesized column headers.
    Grid {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A visible, non-fatal notice.
    Notice { content: String },
}

impl RenderedView {
    /// Flatten the view into the text stored as an assistant turn.
    ///
    /// Grids become tab-separated lines under their header row so the
    /// `/history` scrollback stays readable without a table widget.
    pub fn as_turn_content(&self) -> String {
        match self {
            RenderedView::Message { content } => content.clone(),
            RenderedView::Grid { headers, rows } => {
                let mut out = headers.join("\t");
                for row in rows {
                    out.push('\n');
                    out.push_str(&row.join("\t"));
                }
                out
            }
            RenderedView::Notice { content } => content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_serde() {
        let role = TurnRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: TurnRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TurnRole::Assistant);
    }

    #[test]
    fn test_chat_turn_constructors() {
        let turn = ChatTurn::user("hello");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "hello");

        let turn = ChatTurn::assistant("hi");
        assert_eq!(turn.role, TurnRole::Assistant);
    }

    #[test]
    fn test_agent_response_serde_tag() {
        let resp = AgentResponse::text("42");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"kind\":\"text\""));

        let resp = AgentResponse::Unrecognized;
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"kind\":\"unrecognized\""));
    }

    #[test]
    fn test_grid_turn_content() {
        let view = RenderedView::Grid {
            headers: vec!["Column 1".into(), "Column 2".into()],
            rows: vec![
                vec!["1".into(), "a".into()],
                vec!["2".into(), "b".into()],
            ],
        };
        assert_eq!(
            view.as_turn_content(),
            "Column 1\tColumn 2\n1\ta\n2\tb"
        );
    }

    #[test]
    fn test_message_turn_content() {
        let view = RenderedView::Message {
            content: "42".into(),
        };
        assert_eq!(view.as_turn_content(), "42");
    }
}
