//! # Design
//!
//! - Keep error messages constant while carrying context fields for debugging.
//! - User-facing text is resolved at the status boundary, never inside the error value.

use thiserror::Error;

/// Result alias for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;

/// Failures surfaced by the download orchestrator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// The submitted URL was empty after trimming.
    #[error("download url is empty")]
    Validation {
        /// Localised message shown to the user.
        message: String,
    },
    /// The backend answered with a non-success status.
    #[error("download request rejected")]
    Request {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Server-supplied message, or the generic fallback.
        message: String,
    },
    /// The request could not be issued or its body could not be read.
    #[error("download transport failed")]
    Transport {
        /// Operation identifier.
        operation: &'static str,
        /// Diagnostic detail from the browser binding.
        detail: String,
    },
    /// The payload arrived but could not be handed to the browser for saving.
    #[error("saving the downloaded file failed")]
    Save {
        /// Diagnostic detail from the browser binding.
        detail: String,
    },
}

impl DownloadError {
    /// Transport failure for `operation`.
    #[must_use]
    pub fn transport(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            detail: detail.into(),
        }
    }

    /// Save failure.
    #[must_use]
    pub fn save(detail: impl Into<String>) -> Self {
        Self::Save {
            detail: detail.into(),
        }
    }

    /// Message carried for the user, when the error already holds one.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Validation { message } | Self::Request { message, .. } => Some(message),
            Self::Transport { .. } | Self::Save { .. } => None,
        }
    }
}

/// Errors raised while installing the logging pipeline.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Installing the tracing subscriber failed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}
