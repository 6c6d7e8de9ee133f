// ABOUTME: Trait seam to the external SMPP engine that owns transport and PDU codec
// ABOUTME: Defines the minimum bind/submit/inbound surface the orchestration layer consumes

//! SMPP Engine Seam
//!
//! The gateway does not speak SMPP on the wire itself. Byte-level PDU
//! encoding, the TCP transport, sequence-number bookkeeping and window
//! enforcement all live in an external engine behind the traits in this
//! module. The orchestration layer consumes exactly this surface:
//!
//! * [`Engine::bind`]: transceiver bind handshake, registering an
//!   [`InboundHandler`] for PDUs the SMSC pushes back
//! * [`Session::submit`]: synchronous submission awaiting the SMSC response
//! * [`Session::send_request_async`]: fire-and-forget submission used by the
//!   concurrent dispatch paths
//! * [`Session::unbind`] / [`Session::destroy`]: session teardown
//! * [`Session::set_window_size`]: outstanding-request window for bulk sends
//!
//! Trait methods return `impl Future + Send` rather than using `async fn`
//! sugar so that sessions can be driven from spawned worker tasks.
//!
//! Production deployments plug in a real protocol stack; the test suite uses
//! a scripted in-memory engine.

pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use error::{BindError, EngineError};
pub use types::{
    Address, BindConfig, BindType, CommandStatus, DeliverAck, InboundPdu, NumericPlanIndicator,
    SubmitRequest, SubmitResponse, TypeOfNumber, ESM_CLASS_MT_SMSC_DELIVERY_RECEIPT,
    REGISTERED_DELIVERY_SMSC_RECEIPT_REQUESTED,
};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Callback invoked by the engine for every PDU the SMSC pushes to a bound
/// transceiver session.
///
/// The handler runs synchronously on the engine's receive path and must be
/// cheap. Returning `None` instructs the engine not to acknowledge the PDU.
pub trait InboundHandler: Send + Sync {
    /// Classify one inbound PDU and produce its acknowledgement, if any.
    ///
    /// The engine may hand over `None` when it decoded a request it cannot
    /// represent; the handler answers that with no response as well.
    fn on_pdu(&self, pdu: Option<InboundPdu>) -> Option<DeliverAck>;
}

/// Factory for bound SMPP sessions.
pub trait Engine: Send + Sync + 'static {
    /// Session type produced by a successful bind.
    type Session: Session;

    /// Perform the bind handshake described by `config`.
    ///
    /// The returned session reports itself bound until the transport breaks
    /// or it is torn down. `handler` receives every inbound PDU for the
    /// lifetime of the session.
    fn bind(
        &self,
        config: &BindConfig,
        handler: Arc<dyn InboundHandler>,
    ) -> impl Future<Output = Result<Self::Session, BindError>> + Send;
}

/// One live bound session. Shared across dispatch workers, so every method
/// takes `&self`; implementations use interior mutability where needed.
pub trait Session: Send + Sync + 'static {
    /// Submit a request and wait up to `timeout` for the SMSC response.
    fn submit(
        &self,
        request: SubmitRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<SubmitResponse, EngineError>> + Send;

    /// Fire a request without waiting for the SMSC's response.
    ///
    /// `timeout` bounds only the write of the request itself. The eventual
    /// response (or its absence) is handled inside the engine's window.
    fn send_request_async(
        &self,
        request: SubmitRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), EngineError>> + Send;

    /// Issue an unbind and wait up to `timeout` for its acknowledgement.
    fn unbind(&self, timeout: Duration) -> impl Future<Output = Result<(), EngineError>> + Send;

    /// Release all transport resources. The session reports unbound afterwards.
    fn destroy(&self);

    /// Whether the session is currently bound.
    fn is_bound(&self) -> bool;

    /// Set the maximum number of outstanding unacknowledged submissions the
    /// engine may keep in flight on this session.
    fn set_window_size(&self, window: u32);
}
