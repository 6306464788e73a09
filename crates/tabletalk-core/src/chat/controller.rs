//! The chat controller: one user utterance in, one rendered view out.
//!
//! A linear state machine (`Idle -> AwaitingResponse -> Idle`) with a
//! single error path: every failure during invocation or rendering is
//! converted into a visible notice scoped to that submission, the
//! corrupt turn is never appended, and the controller returns to
//! `Idle`. Nothing is retried automatically.

use tracing::{info, warn};

use tabletalk_types::chat::RenderedView;
use tabletalk_types::error::ConfigError;

use crate::agent::Agent;
use crate::render::render;

use super::session::SessionStore;

/// Where the controller is in its cycle. Observable for tests and
/// surfaces that want to reject overlapping submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AwaitingResponse,
}

/// The result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// What to show for this interaction.
    pub view: RenderedView,
    /// True when the view is an error notice rather than agent output.
    pub failed: bool,
}

/// Drives the query-and-render loop for one session.
///
/// Generic over [`Agent`] so chat surfaces and tests can inject stubs.
/// A controller without an agent (missing credential at startup) still
/// accepts submissions; each one records the user turn and yields a
/// config notice, so the surface stays usable.
pub struct ChatController<A> {
    agent: Option<A>,
    store: SessionStore,
    state: ControllerState,
    disabled_reason: Option<String>,
}

impl<A: Agent> ChatController<A> {
    /// Create a controller with a working agent.
    pub fn new(agent: A) -> Self {
        Self {
            agent: Some(agent),
            store: SessionStore::new(),
            state: ControllerState::Idle,
            disabled_reason: None,
        }
    }

    /// Create a controller whose agent could not be configured.
    pub fn without_agent(reason: &ConfigError) -> Self {
        Self {
            agent: None,
            store: SessionStore::new(),
            state: ControllerState::Idle,
            disabled_reason: Some(reason.to_string()),
        }
    }

    /// Current state of the cycle.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The session history.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Reset the history to the greeting turn.
    pub fn clear_history(&mut self) {
        self.store.clear();
    }

    /// Process one user utterance to completion.
    ///
    /// The user turn is always recorded. On success the rendered
    /// content is appended as an assistant turn; on failure only the
    /// notice is returned. Either way the controller ends `Idle`.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        self.store.push_user(input);

        let Some(agent) = &self.agent else {
            let reason = self
                .disabled_reason
                .as_deref()
                .unwrap_or("agent unavailable");
            return SubmitOutcome {
                view: RenderedView::Notice {
                    content: format!("An error occurred: {reason}"),
                },
                failed: true,
            };
        };

        self.state = ControllerState::AwaitingResponse;
        // History up to but not including the turn just recorded; the
        // agent receives the question separately.
        let prior = &self.store.turns()[..self.store.turns().len() - 1];
        let result = agent.ask(input, prior).await;
        self.state = ControllerState::Idle;

        match result {
            Ok(response) => {
                let view = render(response);
                self.store.push_assistant(view.as_turn_content());
                info!(session = %self.store.id(), "submission completed");
                SubmitOutcome {
                    view,
                    failed: false,
                }
            }
            Err(e) => {
                warn!(session = %self.store.id(), error = %e, "submission failed");
                SubmitOutcome {
                    view: RenderedView::Notice {
                        content: format!("An error occurred: {e}"),
                    },
                    failed: true,
                }
            }
        }
    }
}
