// ABOUTME: Upward-facing gateway surface composing session manager, dispatcher and classifier
// ABOUTME: Exposes the send, inbound-simulation and observability operations callers consume

use crate::engine::{Address, BindError, DeliverAck, Engine, InboundHandler, InboundPdu};
use crate::gateway::config::GatewayConfig;
use crate::gateway::dispatcher::Dispatcher;
use crate::gateway::error::SendError;
use crate::gateway::inbound::InboundClassifier;
use crate::gateway::ledger::SentMessageLedger;
use crate::gateway::session::SessionManager;
use bytes::Bytes;
use std::sync::Arc;

/// The SMS gateway: one bound transceiver session, a dispatch pool and the
/// inbound classifier, wired together behind a small call surface.
///
/// Callers above this (an HTTP facade or similar) only need parameter
/// validation and status mapping; everything stateful lives here.
///
/// # Example
///
/// ```rust,no_run
/// use smpp_gateway::{GatewayConfig, SmsGateway};
/// # use smpp_gateway::Engine;
/// # async fn example<E: Engine>(engine: E) -> Result<(), Box<dyn std::error::Error>> {
/// let config = GatewayConfig::new("smsc.example.net", 2775, "system_id", "password");
/// let gateway = SmsGateway::new(engine, config);
///
/// gateway.connect().await?;
/// let message_id = gateway.send_one("Hello, World!", "12345", "54321", true).await?;
/// println!("sent: {message_id}, ledger: {}", gateway.sent_message_count());
///
/// gateway.disconnect().await;
/// gateway.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct SmsGateway<E: Engine> {
    sessions: Arc<SessionManager<E>>,
    dispatcher: Dispatcher<E>,
    classifier: Arc<InboundClassifier>,
    ledger: Arc<SentMessageLedger>,
}

impl<E: Engine> SmsGateway<E> {
    /// Creates a gateway over `engine`. The session starts unbound; the
    /// dispatch pool is spawned immediately.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, because the pool's
    /// worker tasks are spawned here.
    pub fn new(engine: E, config: GatewayConfig) -> Self {
        let classifier = Arc::new(InboundClassifier::new());
        let ledger = Arc::new(SentMessageLedger::new());
        let sessions = Arc::new(SessionManager::new(
            engine,
            config.clone(),
            Arc::clone(&classifier) as Arc<dyn InboundHandler>,
        ));
        let dispatcher = Dispatcher::new(Arc::clone(&sessions), Arc::clone(&ledger), config);
        Self {
            sessions,
            dispatcher,
            classifier,
            ledger,
        }
    }

    /// Binds to the SMSC. Send operations bind lazily on their own, so this
    /// is only needed to fail fast at startup.
    pub async fn connect(&self) -> Result<(), BindError> {
        self.sessions.connect().await
    }

    /// Best-effort unbind and teardown of the current session.
    pub async fn disconnect(&self) {
        self.sessions.disconnect().await;
    }

    /// Whether a bound session currently exists.
    pub async fn is_bound(&self) -> bool {
        self.sessions.is_bound().await
    }

    /// Sends a single message synchronously; returns the SMSC message id.
    pub async fn send_one(
        &self,
        text: &str,
        from: &str,
        to: &str,
        delivery_receipt: bool,
    ) -> Result<String, SendError> {
        self.dispatcher.send_one(text, from, to, delivery_receipt).await
    }

    /// Sends a message of any length, segmenting when needed; returns the
    /// number of parts submitted.
    pub async fn send_long(
        &self,
        text: &str,
        from: &str,
        to: &str,
        delivery_receipt: bool,
    ) -> Result<usize, SendError> {
        self.dispatcher.send_long(text, from, to, delivery_receipt).await
    }

    /// Fans the messages out across the dispatch pool; returns the number
    /// enqueued. Individual outcomes are observable only via
    /// [`sent_message_count`](Self::sent_message_count).
    pub async fn send_many(
        &self,
        messages: &[String],
        from: &str,
        to: &str,
    ) -> Result<usize, SendError> {
        self.dispatcher.send_many(messages, from, to).await
    }

    /// Like [`send_many`](Self::send_many) with the session window widened
    /// for throughput.
    pub async fn send_bulk(
        &self,
        messages: &[String],
        from: &str,
        to: &str,
    ) -> Result<usize, SendError> {
        self.dispatcher.send_bulk(messages, from, to).await
    }

    /// Injects a synthetic inbound PDU through the classifier, exactly as if
    /// the SMSC had pushed it. Diagnostic entry point; returns the
    /// acknowledgement the classifier produced, if any.
    pub fn simulate_inbound(
        &self,
        source: &str,
        dest: &str,
        text: &str,
        esm_class: u8,
    ) -> Option<DeliverAck> {
        let pdu = InboundPdu {
            sequence_number: 0,
            source: Address::international(source),
            dest: Address::international(dest),
            esm_class,
            payload: Bytes::copy_from_slice(text.as_bytes()),
        };
        self.classifier.on_pdu(Some(pdu))
    }

    /// Number of distinct message texts successfully dispatched so far.
    pub fn sent_message_count(&self) -> usize {
        self.ledger.count()
    }

    /// Drains the dispatch pool (bounded by the configured shutdown window)
    /// and stops the workers. The session, if any, is left to the caller's
    /// final [`disconnect`](Self::disconnect).
    pub async fn shutdown(self) {
        self.dispatcher.shutdown().await;
    }
}
