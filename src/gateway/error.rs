// ABOUTME: Failure types surfaced by the gateway's outbound dispatch operations
// ABOUTME: Wraps bind, submission and segmentation faults into one caller-facing error

use crate::engine::{BindError, EngineError};
use thiserror::Error;

/// Failure of an outbound send operation.
///
/// The synchronous paths (`send_one`, `send_long`) surface this directly.
/// The concurrent paths (`send_many`, `send_bulk`) can only fail before
/// enqueueing, with [`SendError::Bind`] or [`SendError::PoolClosed`];
/// per-message failures inside the pool are logged, not returned.
#[derive(Debug, Error)]
pub enum SendError {
    /// Could not establish a bound session before submitting
    #[error("failed to bind before send: {0}")]
    Bind(#[from] BindError),

    /// The engine rejected the submission
    #[error("submission failed: {0}")]
    Submit(#[from] EngineError),

    /// The long-message payload could not be segmented
    #[error("message segmentation failed: {0}")]
    Segmentation(#[from] SegmentationError),

    /// The session went away between reconnect and retry
    #[error("session is unbound")]
    Unbound,

    /// The dispatch pool has been shut down
    #[error("dispatch pool is shut down")]
    PoolClosed,
}

/// Failure while splitting an oversized payload into concatenated parts.
///
/// Segmentation is pure arithmetic over the byte length, so the only way it
/// can fail is a payload too large for the single-byte UDH count fields.
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("payload requires {segments} segments, more than the {max} a concatenated message can carry")]
    TooManySegments { segments: usize, max: usize },
}
