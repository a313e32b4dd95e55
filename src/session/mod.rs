//! Recording session lifecycle.
//!
//! This module owns the session state machine and the controller that drives
//! it:
//! - `machine`: the pure transition function and its effect lists
//! - `session`: the `RecordingSession` controller executing those effects
//! - `config`: the per-session configuration snapshot
//! - `listener`: the four lifecycle hooks delivered to the session's owner
//! - `stats`: the read-only status snapshot

mod config;
mod listener;
mod machine;
mod session;
mod stats;

pub use config::{RecordingConfig, SessionConfig};
pub use listener::SessionListener;
pub use machine::{Effect, Machine, SessionEvent, SessionState};
pub use session::RecordingSession;
pub use stats::SessionStats;
