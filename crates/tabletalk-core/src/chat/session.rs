//! In-memory session store.
//!
//! One instance per interactive session, owning the chronological list
//! of chat turns. Process-lifetime only: nothing is persisted, and
//! clearing resets the store to its single greeting turn. An explicit
//! per-session object (not a process-wide singleton) keeps concurrent
//! sessions isolated.

use uuid::Uuid;

use tabletalk_types::chat::{ChatTurn, TurnRole};

/// Greeting the assistant opens every session with.
pub const GREETING: &str = "How can I help you?";

/// Ordered, in-memory chat history for one session.
#[derive(Debug)]
pub struct SessionStore {
    id: Uuid,
    turns: Vec<ChatTurn>,
}

impl SessionStore {
    /// Create a store seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            turns: vec![ChatTurn::assistant(GREETING)],
        }
    }

    /// Session identifier (time-sortable).
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::user(content));
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(content));
    }

    /// Reset the history to the single greeting turn. The session id
    /// is kept; only the turns are discarded.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.turns.push(ChatTurn::assistant(GREETING));
    }

    /// Number of turns with the given role.
    pub fn count_role(&self, role: &TurnRole) -> usize {
        self.turns.iter().filter(|t| &t.role == role).count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
