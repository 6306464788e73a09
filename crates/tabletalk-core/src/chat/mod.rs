//! Per-session chat state: the turn store and the controller that
//! drives one query-and-render cycle.

pub mod controller;
pub mod session;

pub use controller::{ChatController, ControllerState, SubmitOutcome};
pub use session::SessionStore;
