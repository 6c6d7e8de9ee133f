// ABOUTME: Owns the lifecycle of the single logical SMPP session over the engine
// ABOUTME: Serializes connect, disconnect and reconnect behind one lock around the session slot

use crate::engine::{BindError, Engine, InboundHandler, Session};
use crate::gateway::config::GatewayConfig;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Manager of the one live transceiver session.
///
/// At most one session exists per manager. The slot holding it is guarded by
/// a single async mutex; every operation that replaces or inspects the
/// session (`connect`, `disconnect`, `reconnect`, `ensure_bound`) runs under
/// that lock, so two dispatch workers racing on [`ensure_bound`] cannot both
/// attempt a bind, and a reconnect never leaves a half-replaced slot visible.
/// Sessions are replaced wholesale; dispatch code works on an `Arc`
/// snapshot and observes the replacement only by re-reading the slot.
///
/// [`ensure_bound`]: Self::ensure_bound
pub struct SessionManager<E: Engine> {
    engine: E,
    config: GatewayConfig,
    handler: Arc<dyn InboundHandler>,
    slot: Mutex<Option<Arc<E::Session>>>,
}

impl<E: Engine> SessionManager<E> {
    /// Creates a manager in the unbound state. `handler` is registered as
    /// the inbound PDU callback on every bind.
    pub fn new(engine: E, config: GatewayConfig, handler: Arc<dyn InboundHandler>) -> Self {
        Self {
            engine,
            config,
            handler,
            slot: Mutex::new(None),
        }
    }

    /// Opens a transceiver bind with the configured endpoint and credentials.
    ///
    /// On success any prior session is discarded. On failure the manager
    /// stays (or becomes) unbound and the [`BindError`] is surfaced.
    pub async fn connect(&self) -> Result<(), BindError> {
        let mut slot = self.slot.lock().await;
        self.connect_locked(&mut slot).await.map(|_| ())
    }

    /// If currently bound, issues an unbind with the configured bounded wait
    /// and releases all transport resources. No-op when unbound. Internal
    /// errors are logged and swallowed; disconnect is best-effort cleanup.
    pub async fn disconnect(&self) {
        let mut slot = self.slot.lock().await;
        self.disconnect_locked(&mut slot).await;
    }

    /// Disconnects then connects under one lock acquisition.
    ///
    /// Logs but never propagates failure: a failed reconnect leaves the
    /// manager unbound, discoverable by the next [`is_bound`](Self::is_bound)
    /// or [`ensure_bound`](Self::ensure_bound) call.
    pub async fn reconnect(&self) {
        info!("Attempting to reconnect...");
        let mut slot = self.slot.lock().await;
        self.disconnect_locked(&mut slot).await;
        match self.connect_locked(&mut slot).await {
            Ok(_) => info!("Reconnected to SMPP server"),
            Err(error) => error!("Failed to reconnect to SMPP server: {}", error),
        }
    }

    /// Whether a session exists and reports itself bound.
    pub async fn is_bound(&self) -> bool {
        let slot = self.slot.lock().await;
        slot.as_ref().is_some_and(|session| session.is_bound())
    }

    /// Returns the bound session, binding inline on the calling task first
    /// if necessary. Called before every outbound operation.
    pub async fn ensure_bound(&self) -> Result<Arc<E::Session>, BindError> {
        let mut slot = self.slot.lock().await;
        // Re-check under the lock: another caller may have bound while this
        // one waited.
        if let Some(session) = slot.as_ref() {
            if session.is_bound() {
                return Ok(Arc::clone(session));
            }
        }
        self.connect_locked(&mut slot).await
    }

    /// Snapshot of the current session without binding. Used by pool workers,
    /// which must never bind on their own.
    pub async fn current(&self) -> Option<Arc<E::Session>> {
        let slot = self.slot.lock().await;
        slot.as_ref().map(Arc::clone)
    }

    async fn connect_locked(
        &self,
        slot: &mut Option<Arc<E::Session>>,
    ) -> Result<Arc<E::Session>, BindError> {
        let session = Arc::new(
            self.engine
                .bind(&self.config.bind_config(), Arc::clone(&self.handler))
                .await?,
        );
        if let Some(old) = slot.replace(Arc::clone(&session)) {
            old.destroy();
        }
        info!(
            "Connected to SMPP server {}:{}",
            self.config.host, self.config.port
        );
        Ok(session)
    }

    async fn disconnect_locked(&self, slot: &mut Option<Arc<E::Session>>) {
        let Some(session) = slot.take() else {
            return;
        };
        if session.is_bound() {
            if let Err(error) = session.unbind(self.config.unbind_timeout).await {
                warn!("Unbind failed during disconnect: {}", error);
            }
        }
        session.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use crate::gateway::inbound::InboundClassifier;

    fn manager(engine: MockEngine) -> SessionManager<MockEngine> {
        let config = GatewayConfig::new("localhost", 2775, "id", "pass");
        SessionManager::new(engine, config, Arc::new(InboundClassifier::new()))
    }

    #[tokio::test]
    async fn connect_binds_and_reports_bound() {
        let engine = MockEngine::new();
        let manager = manager(engine.clone());

        assert!(!manager.is_bound().await);
        manager.connect().await.unwrap();
        assert!(manager.is_bound().await);
        assert_eq!(engine.bind_count(), 1);
        assert!(engine.handler().is_some(), "bind registers inbound handler");
    }

    #[tokio::test]
    async fn bind_failure_leaves_manager_unbound() {
        let engine = MockEngine::new();
        engine.fail_next_bind(BindError::Timeout);
        let manager = manager(engine.clone());

        assert!(manager.connect().await.is_err());
        assert!(!manager.is_bound().await);
    }

    #[tokio::test]
    async fn ensure_bound_binds_exactly_once() {
        let engine = MockEngine::new();
        let manager = manager(engine.clone());

        let first = manager.ensure_bound().await.unwrap();
        assert_eq!(engine.bind_count(), 1);

        // Already bound: no second handshake, same session handle
        let second = manager.ensure_bound().await.unwrap();
        assert_eq!(engine.bind_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn disconnect_unbinds_and_destroys() {
        let engine = MockEngine::new();
        let manager = manager(engine.clone());

        manager.connect().await.unwrap();
        manager.disconnect().await;
        assert!(!manager.is_bound().await);
        assert_eq!(engine.unbind_count(), 1);
        assert_eq!(engine.destroy_count(), 1);
    }

    #[tokio::test]
    async fn disconnect_when_unbound_is_a_noop() {
        let engine = MockEngine::new();
        let manager = manager(engine.clone());

        manager.disconnect().await;
        assert_eq!(engine.unbind_count(), 0);
        assert_eq!(engine.destroy_count(), 0);
    }

    #[tokio::test]
    async fn reconnect_replaces_the_session_wholesale() {
        let engine = MockEngine::new();
        let manager = manager(engine.clone());

        manager.connect().await.unwrap();
        let before = manager.current().await.unwrap();
        manager.reconnect().await;
        let after = manager.current().await.unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert!(manager.is_bound().await);
        assert_eq!(engine.bind_count(), 2);
        assert_eq!(engine.unbind_count(), 1);
    }

    #[tokio::test]
    async fn failed_reconnect_leaves_manager_unbound() {
        let engine = MockEngine::new();
        let manager = manager(engine.clone());

        manager.connect().await.unwrap();
        engine.fail_next_bind(BindError::Connection("refused".into()));
        manager.reconnect().await;

        assert!(!manager.is_bound().await);
        // Next ensure_bound recovers by binding again
        manager.ensure_bound().await.unwrap();
        assert!(manager.is_bound().await);
        assert_eq!(engine.bind_count(), 3);
    }
}
