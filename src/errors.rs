//! Typed error definitions for careful-rm.
//! Every declined confirmation gate maps to its own process exit code so
//! shell callers can tell a refusal apart from a real failure.

use thiserror::Error;

/// Exit code when there was nothing to delete or recycle.
pub const EXIT_NOTHING_TO_DO: i32 = 22;

/// Exit code when the delete primitive reported failure on non-regular entries.
pub const EXIT_DELETE_FAILED: i32 = 1;

/// Which confirmation gate the user declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Declined to recursively delete the listed directories.
    RecursiveDelete,
    /// Declined the inline bulk-file confirmation.
    BulkDelete,
    /// Declined the columnar bulk-file confirmation.
    BulkDeleteList,
}

impl AbortReason {
    /// Exit code reported for this refusal.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::RecursiveDelete => 1,
            Self::BulkDelete => 6,
            Self::BulkDeleteList => 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum CarefulRmError {
    /// A confirmation gate was declined; nothing further is processed.
    #[error("aborted by user")]
    UserAborted(AbortReason),

    /// A prompt responder produced a choice outside the offered set even
    /// after retries. The input loop invariant was violated; unrecoverable.
    #[error("prompt returned an invalid choice: '{0}'")]
    InvalidChoice(String),

    /// Trash directory creation or metadata I/O failed.
    #[error("I/O error while accessing {path}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CarefulRmError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UserAborted(reason) => reason.exit_code(),
            Self::InvalidChoice(_) => 70,
            Self::Io { .. } => 1,
        }
    }

    pub fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CarefulRmError>;
