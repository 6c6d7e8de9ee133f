// ABOUTME: Gateway configuration covering SMSC endpoint, credentials, timeouts and pool sizing
// ABOUTME: Provides builder-style construction with the defaults the dispatch contracts assume

use crate::engine::BindConfig;
use std::time::Duration;

/// Configuration for an [`SmsGateway`](crate::gateway::SmsGateway) instance.
///
/// Carries the SMSC endpoint and credentials plus every timing and sizing
/// knob the orchestration layer uses. The defaults match the documented
/// dispatch contracts: 30 s synchronous submit timeout, 5 s unbind wait,
/// a 10-worker dispatch pool with a 60 s drain window, and a bulk window
/// of 10 outstanding submissions.
///
/// # Example
///
/// ```rust
/// use smpp_gateway::GatewayConfig;
/// use std::time::Duration;
///
/// let config = GatewayConfig::new("smsc.example.net", 2775, "system_id", "password")
///     .with_system_type("SMSGW")
///     .with_submit_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// SMSC host name or address
    pub host: String,
    /// SMSC port
    pub port: u16,
    /// System identifier for the transceiver bind
    pub system_id: String,
    /// Password for the transceiver bind
    pub password: String,
    /// Optional system type forwarded in the bind PDU
    pub system_type: Option<String>,
    /// Timeout for synchronous submissions awaiting the SMSC response
    /// (default: 30 seconds)
    pub submit_timeout: Duration,
    /// Bounded wait for the unbind acknowledgement during disconnect
    /// (default: 5 seconds)
    pub unbind_timeout: Duration,
    /// Number of dispatch pool workers (default: 10)
    pub pool_size: usize,
    /// Graceful drain window before outstanding pool tasks are aborted at
    /// shutdown (default: 60 seconds)
    pub pool_shutdown_timeout: Duration,
    /// Window size applied to the session by bulk sends (default: 10)
    pub bulk_window_size: u32,
}

impl GatewayConfig {
    /// Creates a configuration for the given SMSC endpoint and credentials
    /// with default timing and sizing.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        system_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            system_id: system_id.into(),
            password: password.into(),
            system_type: None,
            submit_timeout: Duration::from_secs(30),
            unbind_timeout: Duration::from_secs(5),
            pool_size: 10,
            pool_shutdown_timeout: Duration::from_secs(60),
            bulk_window_size: 10,
        }
    }

    /// Set the system type forwarded in the bind PDU.
    pub fn with_system_type(mut self, system_type: impl Into<String>) -> Self {
        self.system_type = Some(system_type.into());
        self
    }

    /// Set the synchronous submit timeout.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Set the unbind acknowledgement wait.
    pub fn with_unbind_timeout(mut self, timeout: Duration) -> Self {
        self.unbind_timeout = timeout;
        self
    }

    /// Set the dispatch pool size.
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_size = size;
        self
    }

    /// Set the graceful drain window for pool shutdown.
    pub fn with_pool_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.pool_shutdown_timeout = timeout;
        self
    }

    /// Set the window size applied by bulk sends.
    pub fn with_bulk_window_size(mut self, window: u32) -> Self {
        self.bulk_window_size = window;
        self
    }

    /// The transceiver bind configuration handed to the engine.
    pub(crate) fn bind_config(&self) -> BindConfig {
        let mut config = BindConfig::transceiver(
            self.host.clone(),
            self.port,
            self.system_id.clone(),
            self.password.clone(),
        );
        config.system_type = self.system_type.clone();
        config
    }
}
