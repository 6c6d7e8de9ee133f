// ABOUTME: Orchestration layer: session lifecycle, dispatch paths, segmentation and inbound handling
// ABOUTME: Exports the gateway facade and its supporting components

//! SMS Gateway Orchestration
//!
//! Everything stateful in the gateway lives in this module, layered over the
//! engine seam in [`crate::engine`]:
//!
//! * [`SessionManager`]: bind/unbind/reconnect lifecycle of the one
//!   transceiver session, serialized behind a single lock
//! * [`Dispatcher`]: single, long, multiple and bulk send paths with the
//!   bounded worker pool and reconnect-on-channel-failure handling
//! * [`segmenter`]: pure splitting of long payloads into concatenated parts
//! * [`InboundClassifier`]: delivery receipt vs. mobile-originated
//!   classification of inbound `deliver_sm` traffic
//! * [`SentMessageLedger`]: concurrent record of dispatched messages
//! * [`SmsGateway`]: the facade composing all of the above
//!
//! ## Delivery contracts
//!
//! The synchronous paths (`send_one`, `send_long`) wait for the SMSC
//! response; `send_one` retries once after a channel failure. The concurrent
//! paths (`send_many`, `send_bulk`) are fire-and-forget and best-effort: a
//! message hit by a transport failure is abandoned after triggering a
//! reconnect. The two contracts are deliberate and must not be conflated.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod facade;
pub mod inbound;
pub mod ledger;
pub mod segmenter;
pub mod session;

pub use config::GatewayConfig;
pub use dispatcher::Dispatcher;
pub use error::{SegmentationError, SendError};
pub use facade::SmsGateway;
pub use inbound::InboundClassifier;
pub use ledger::SentMessageLedger;
pub use segmenter::{split, MessageSegment, CONCAT_HEADER_LEN, MAX_SEGMENTS, MAX_SEGMENT_PAYLOAD};
pub use session::SessionManager;
