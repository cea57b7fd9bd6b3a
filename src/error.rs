//! Error types surfaced to the host
//!
//! The tick path never returns errors: missing collaborators and degenerate
//! geometry degrade to a skipped step. Only configuration edits can fail.

use thiserror::Error;

/// Errors from loading or editing throw configuration
#[derive(Debug, Error)]
pub enum ThrowError {
    /// Config JSON could not be parsed
    #[error("failed to parse throw config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config edits are rejected while an aim is in progress
    #[error("throw config cannot change while aiming")]
    ConfigLocked,
}
