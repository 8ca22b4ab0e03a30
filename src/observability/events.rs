//! Observable catalog events
//!
//! Events are explicit and typed; each carries its own default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration file loaded and validated
    ConfigLoaded,
    /// Default configuration file written by `init`
    ConfigWritten,
    /// Catalog store opened
    StoreOpened,
    /// Category table checked against the fixed seed set
    CategoriesSeeded,
    /// HTTP listener bound, ready to serve
    ServerListening,
    /// Startup failed (FATAL)
    BootFailed,

    // Book writes
    /// Book created
    BookCreated,
    /// Book name, year and categories replaced
    BookUpdated,
    /// Book and its associations removed
    BookDeleted,
    /// Write rejected by validation or lookup
    BookRejected,
    /// Update lost to a concurrent writer
    UpdateConflict,

    // Failures
    /// Storage layer failed underneath a request
    StorageFailure,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "LIBCAT_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigWritten => "CONFIG_WRITTEN",
            Event::StoreOpened => "STORE_OPENED",
            Event::CategoriesSeeded => "CATEGORIES_SEEDED",
            Event::ServerListening => "LIBCAT_SERVING",
            Event::BootFailed => "LIBCAT_STARTUP_FAILED",

            Event::BookCreated => "BOOK_CREATED",
            Event::BookUpdated => "BOOK_UPDATED",
            Event::BookDeleted => "BOOK_DELETED",
            Event::BookRejected => "BOOK_REJECTED",
            Event::UpdateConflict => "BOOK_UPDATE_CONFLICT",

            Event::StorageFailure => "STORAGE_FAILURE",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::StorageFailure => Severity::Error,
            Event::BookRejected | Event::UpdateConflict => Severity::Warn,
            _ => Severity::Info,
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
    fn test_event_names_are_screaming_snake_case() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::ConfigWritten,
            Event::StoreOpened,
            Event::CategoriesSeeded,
            Event::ServerListening,
            Event::BootFailed,
            Event::BookCreated,
            Event::BookUpdated,
            Event::BookDeleted,
            Event::BookRejected,
            Event::UpdateConflict,
            Event::StorageFailure,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", s);
        }
    }

    #[test]
    fn test_severities() {
        assert_eq!(Event::BootFailed.severity(), Severity::Fatal);
        assert_eq!(Event::StorageFailure.severity(), Severity::Error);
        assert_eq!(Event::BookRejected.severity(), Severity::Warn);
        assert_eq!(Event::BookCreated.severity(), Severity::Info);
    }
}
