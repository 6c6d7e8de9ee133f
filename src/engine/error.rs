// ABOUTME: Error types reported by the SMPP engine across the collaborator seam
// ABOUTME: Separates bind handshake failures from per-request submission failures

use crate::engine::types::CommandStatus;
use thiserror::Error;

/// Failure of a bind handshake.
///
/// Fatal to the `connect()` attempt that triggered it and surfaced to the
/// caller; never crashes the process.
#[derive(Debug, Error)]
pub enum BindError {
    /// TCP connect or transport setup failed before the handshake
    #[error("failed to connect to SMSC: {0}")]
    Connection(String),

    /// The SMSC rejected the bind (bad credentials, already bound, ...)
    #[error("bind rejected by SMSC: {0:?}")]
    Rejected(CommandStatus),

    /// No bind response within the engine's handshake window
    #[error("bind handshake timed out")]
    Timeout,
}

/// Failure of a single request on a live session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transport-level channel failure; the session is no longer usable
    #[error("channel failure: {0}")]
    Channel(String),

    /// No response from the SMSC within the request timeout
    #[error("request timed out awaiting SMSC response")]
    Timeout,

    /// The request was malformed or violated protocol limits
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The SMSC answered with an unrecoverable protocol error
    #[error("unrecoverable protocol error: {0:?}")]
    Unrecoverable(CommandStatus),

    /// Anything else the engine cannot classify
    #[error("request failed: {0}")]
    Other(String),
}

impl EngineError {
    /// Whether this failure indicates a broken transport channel.
    ///
    /// Channel failures are the only class the dispatcher reacts to with a
    /// reconnect; every other variant is a protocol or usage fault and is
    /// surfaced immediately.
    pub fn is_channel(&self) -> bool {
        matches!(self, EngineError::Channel(_))
    }
}
