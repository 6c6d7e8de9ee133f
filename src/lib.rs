// ABOUTME: SMS gateway client crate: session orchestration and dispatch over an SMPP engine
// ABOUTME: Exposes the gateway facade, the engine trait seam and supporting types

//! # smpp-gateway
//!
//! An outbound/inbound SMS gateway client built on SMPP. The crate owns the
//! session orchestration and dispatch layer: bind/unbind lifecycle,
//! automatic reconnection, concurrent fan-out across a bounded worker pool,
//! segmentation of long messages into concatenated parts, window-controlled
//! bulk throughput and classification of inbound `deliver_sm` traffic into
//! delivery receipts and mobile-originated messages.
//!
//! The byte-level protocol stack (PDU codec, transport, windowing) is an
//! external collaborator behind the [`engine`] traits; any SMPP
//! implementation that can satisfy that surface plugs in.
//!
//! ## Sending a message
//!
//! ```rust,no_run
//! use smpp_gateway::{Engine, GatewayConfig, SmsGateway};
//!
//! # async fn example<E: Engine>(engine: E) -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::new("smsc.example.net", 2775, "system_id", "password");
//! let gateway = SmsGateway::new(engine, config);
//!
//! // Binds lazily on first send; connect() just fails fast at startup.
//! gateway.connect().await?;
//!
//! let message_id = gateway.send_one("Hello, World!", "12345", "54321", true).await?;
//! println!("Message sent with ID: {message_id}");
//!
//! // Long messages are segmented transparently.
//! gateway.send_long(&"a".repeat(400), "12345", "54321", true).await?;
//!
//! // Bulk fan-out across the worker pool, fire-and-forget.
//! let batch: Vec<String> = (0..100).map(|i| format!("Message {i}")).collect();
//! let enqueued = gateway.send_bulk(&batch, "12345", "54321").await?;
//! println!("{enqueued} messages enqueued, {} confirmed so far", gateway.sent_message_count());
//!
//! gateway.disconnect().await;
//! gateway.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod gateway;


// Re-export the engine seam for implementors and callers
pub use engine::{
    Address, BindConfig, BindError, BindType, CommandStatus, DeliverAck, Engine, EngineError,
    InboundHandler, InboundPdu, NumericPlanIndicator, Session, SubmitRequest, SubmitResponse,
    TypeOfNumber, ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT,
    REGISTERED_DELIVERY_SMSC_RECEIPT_REQUESTED,
};

// Re-export the gateway surface
pub use gateway::{
    GatewayConfig, InboundClassifier, MessageSegment, SegmentationError, SendError,
    SentMessageLedger, SmsGateway, MAX_SEGMENT_PAYLOAD,
};
