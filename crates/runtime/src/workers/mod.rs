//! Worker tasks that back the runtime orchestration.
//!
//! The session worker serializes every command against the session driver;
//! the ticker and reveal tasks feed it timer signals.

mod session;
mod timers;

pub use session::{Command, SessionWorker};
