//! Observability for the catalog service
//!
//! Structured JSON line logging of typed events.
//!
//! # Usage
//!
//! ```ignore
//! use library_catalog::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::BookCreated, &[("book_id", "7")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Only verifies no panic
        log_event(Event::BootStart);
        log_event_with_fields(Event::ConfigLoaded, &[("path", "/tmp/library.json")]);
    }
}
