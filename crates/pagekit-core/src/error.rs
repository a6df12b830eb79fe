//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
///
/// Controllers never produce errors: every handler is a guard-clause no-op
/// when the event does not match. Errors only surface at the edges, where
/// fixtures, settings and headless commands are parsed.
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // ─────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Page fixture error: {message}")]
    Fixture { message: String },

    #[error("Page fixture not found: {path}")]
    FixtureNotFound { path: PathBuf },

    #[error("Unknown node handle: {id}")]
    UnknownNode { id: usize },

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Host/Runner Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid command: {message}")]
    Command { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }

    pub fn fixture_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FixtureNotFound { path: path.into() }
    }

    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// A bad headless command or a stale node handle only affects the
    /// current input line; the engine keeps running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Command { .. } | Error::UnknownNode { .. } | Error::Selector { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Fixture { .. }
                | Error::FixtureNotFound { .. }
                | Error::Toml(_)
        )
    }
}
