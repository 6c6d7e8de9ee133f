// ABOUTME: Scripted in-memory engine used by the test suite instead of a network stack
// ABOUTME: Records every bind, submit and window change and replays queued failure outcomes

use crate::engine::error::{BindError, EngineError};
use crate::engine::types::{BindConfig, CommandStatus, SubmitRequest, SubmitResponse};
use crate::engine::{Engine, InboundHandler, Session};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded submission, sync or fire-and-forget.
#[derive(Debug, Clone)]
pub(crate) struct SubmittedRequest {
    pub request: SubmitRequest,
    /// true for `submit`, false for `send_request_async`
    pub awaited: bool,
}

#[derive(Default)]
struct MockState {
    bind_outcomes: Mutex<VecDeque<Result<(), BindError>>>,
    submit_outcomes: Mutex<VecDeque<Result<String, EngineError>>>,
    submits: Mutex<Vec<SubmittedRequest>>,
    window_sizes: Mutex<Vec<u32>>,
    handler: Mutex<Option<Arc<dyn InboundHandler>>>,
    bind_count: AtomicUsize,
    unbind_count: AtomicUsize,
    destroy_count: AtomicUsize,
    next_message_id: AtomicUsize,
}

/// Test double for the engine seam.
///
/// Binds succeed and submissions answer with generated message ids unless a
/// failure has been queued with [`fail_next_bind`](Self::fail_next_bind) or
/// [`fail_next_submit`](Self::fail_next_submit). Cloning shares the recorded
/// state, so tests keep a clone while the gateway owns the original.
#[derive(Clone, Default)]
pub(crate) struct MockEngine {
    state: Arc<MockState>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_bind(&self, error: BindError) {
        self.state.bind_outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn fail_next_submit(&self, error: EngineError) {
        self.state.submit_outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn succeed_next_submit(&self, message_id: impl Into<String>) {
        self.state
            .submit_outcomes
            .lock()
            .unwrap()
            .push_back(Ok(message_id.into()));
    }

    pub fn bind_count(&self) -> usize {
        self.state.bind_count.load(Ordering::SeqCst)
    }

    pub fn unbind_count(&self) -> usize {
        self.state.unbind_count.load(Ordering::SeqCst)
    }

    pub fn destroy_count(&self) -> usize {
        self.state.destroy_count.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<SubmittedRequest> {
        self.state.submits.lock().unwrap().clone()
    }

    pub fn submit_count(&self) -> usize {
        self.state.submits.lock().unwrap().len()
    }

    pub fn window_sizes(&self) -> Vec<u32> {
        self.state.window_sizes.lock().unwrap().clone()
    }

    pub fn handler(&self) -> Option<Arc<dyn InboundHandler>> {
        self.state.handler.lock().unwrap().clone()
    }
}

impl Engine for MockEngine {
    type Session = MockSession;

    async fn bind(
        &self,
        _config: &BindConfig,
        handler: Arc<dyn InboundHandler>,
    ) -> Result<MockSession, BindError> {
        self.state.bind_count.fetch_add(1, Ordering::SeqCst);
        *self.state.handler.lock().unwrap() = Some(handler);
        if let Some(outcome) = self.state.bind_outcomes.lock().unwrap().pop_front() {
            outcome?;
        }
        Ok(MockSession {
            state: Arc::clone(&self.state),
            bound: AtomicBool::new(true),
        })
    }
}

/// Session produced by [`MockEngine`]; shares the engine's recorded state.
pub(crate) struct MockSession {
    state: Arc<MockState>,
    bound: AtomicBool,
}

impl MockSession {
    fn pop_outcome(&self) -> Result<String, EngineError> {
        if let Some(outcome) = self.state.submit_outcomes.lock().unwrap().pop_front() {
            return outcome;
        }
        let n = self.state.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("msg-{n}"))
    }
}

impl Session for MockSession {
    async fn submit(
        &self,
        request: SubmitRequest,
        _timeout: Duration,
    ) -> Result<SubmitResponse, EngineError> {
        self.state.submits.lock().unwrap().push(SubmittedRequest {
            request,
            awaited: true,
        });
        match self.pop_outcome() {
            Ok(message_id) => Ok(SubmitResponse {
                message_id,
                command_status: CommandStatus::Ok,
            }),
            Err(error) => {
                if error.is_channel() {
                    self.bound.store(false, Ordering::SeqCst);
                }
                Err(error)
            }
        }
    }

    async fn send_request_async(
        &self,
        request: SubmitRequest,
        _timeout: Duration,
    ) -> Result<(), EngineError> {
        self.state.submits.lock().unwrap().push(SubmittedRequest {
            request,
            awaited: false,
        });
        match self.pop_outcome() {
            Ok(_) => Ok(()),
            Err(error) => {
                if error.is_channel() {
                    self.bound.store(false, Ordering::SeqCst);
                }
                Err(error)
            }
        }
    }

    async fn unbind(&self, _timeout: Duration) -> Result<(), EngineError> {
        self.state.unbind_count.fetch_add(1, Ordering::SeqCst);
        self.bound.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn destroy(&self) {
        self.state.destroy_count.fetch_add(1, Ordering::SeqCst);
        self.bound.store(false, Ordering::SeqCst);
    }

    fn is_bound(&self) -> bool {
        self.bound.load(Ordering::SeqCst)
    }

    fn set_window_size(&self, window: u32) {
        self.state.window_sizes.lock().unwrap().push(window);
    }
}
