//! Observable events for suggestd
//!
//! Every log line names exactly one of these events.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration resolved
    ConfigLoaded,
    /// HTTP listener bound, ready for requests
    ServerListening,
    /// Server stopped
    ShutdownComplete,

    // Reload cycle
    /// Reload cycle started
    ReloadStart,
    /// New generation installed
    ReloadInstalled,
    /// Reload cycle failed, previous generation kept
    ReloadFailed,
    /// Reload loop stopped
    ReloadStopped,

    // Request path
    /// Request rejected as invalid
    RequestRejected,
    /// Request exceeded its deadline
    RequestTimeout,
    /// Response could not be encoded
    RequestEncodingFailed,
    /// Work finished after its caller timed out
    LateResultDiscarded,
    /// Guarded work panicked
    WorkPanicked,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "SUGGESTD_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerListening => "SUGGESTD_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::ReloadStart => "RELOAD_BEGIN",
            Event::ReloadInstalled => "RELOAD_INSTALLED",
            Event::ReloadFailed => "RELOAD_FAILED",
            Event::ReloadStopped => "RELOAD_STOPPED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::RequestTimeout => "REQUEST_TIMEOUT",
            Event::RequestEncodingFailed => "REQUEST_ENCODING_FAILED",
            Event::LateResultDiscarded => "LATE_RESULT_DISCARDED",
            Event::WorkPanicked => "WORK_PANICKED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_upper_snake_case() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::ServerListening,
            Event::ShutdownComplete,
            Event::ReloadStart,
            Event::ReloadInstalled,
            Event::ReloadFailed,
            Event::ReloadStopped,
            Event::RequestRejected,
            Event::RequestTimeout,
            Event::RequestEncodingFailed,
            Event::LateResultDiscarded,
            Event::WorkPanicked,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }
}
