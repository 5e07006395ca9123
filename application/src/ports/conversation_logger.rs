//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording triage session
//! events (session start, tool calls, tool results, outcome) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! conversation transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload; the sink adds a UTC timestamp.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "triage_started", "tool_call", "triage_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    /// Create a new conversation event. The sink adds the timestamp.
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// `log` is synchronous and infallible; write failures are ignored.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_keeps_type_and_payload() {
        let event = ConversationEvent::new("tool_call", serde_json::json!({"tool": "search_issues"}));
        assert_eq!(event.event_type, "tool_call");
        assert_eq!(event.payload["tool"], "search_issues");
        NoConversationLogger.log(event);
    }
}
