//! Port for structured debate logging.
//!
//! Defines the [`DebateLogger`] trait for recording debate events (phase
//! changes, prompts, arguments, scores, degradations) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! debate transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured debate event for logging.
pub struct DebateEvent {
    /// Event type identifier (e.g., "phase_started", "argument", "round_scored").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DebateEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging debate events to a structured log.
///
/// The `log` method is synchronous and non-fallible; a failed write must
/// not disturb the debate.
pub trait DebateLogger: Send + Sync {
    /// Record a debate event.
    fn log(&self, event: DebateEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDebateLogger;

impl DebateLogger for NoDebateLogger {
    fn log(&self, _event: DebateEvent) {}
}
