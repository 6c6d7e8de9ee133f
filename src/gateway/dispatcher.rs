// ABOUTME: Executes outbound submissions sequentially or across the bounded worker pool
// ABOUTME: Implements single, long, multiple and bulk send paths with reconnect handling

use crate::engine::{
    Engine, Session, SubmitRequest, REGISTERED_DELIVERY_SMSC_RECEIPT_REQUESTED,
};
use crate::gateway::config::GatewayConfig;
use crate::gateway::error::SendError;
use crate::gateway::ledger::SentMessageLedger;
use crate::gateway::segmenter::{self, MAX_SEGMENT_PAYLOAD};
use crate::gateway::session::SessionManager;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, info, warn};

/// One unit of work for the dispatch pool.
struct SubmitJob {
    request: SubmitRequest,
    text: String,
}

/// Fixed-size pool of worker tasks draining a shared job channel.
///
/// The tokio rendition of a fixed thread pool: `pool_size` tasks share one
/// receiver behind an async mutex, holding the lock only while awaiting the
/// next job, so up to `pool_size` submissions run concurrently.
struct DispatchPool {
    tx: mpsc::UnboundedSender<SubmitJob>,
    workers: Vec<JoinHandle<()>>,
}

impl DispatchPool {
    fn spawn<E: Engine>(
        size: usize,
        sessions: Arc<SessionManager<E>>,
        ledger: Arc<SentMessageLedger>,
        submit_timeout: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<SubmitJob>();
        let rx = Arc::new(Mutex::new(rx));
        let workers = (0..size)
            .map(|_| {
                let rx = Arc::clone(&rx);
                let sessions = Arc::clone(&sessions);
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move {
                    loop {
                        let job = {
                            let mut rx = rx.lock().await;
                            rx.recv().await
                        };
                        let Some(job) = job else {
                            // Channel closed: pool is shutting down
                            break;
                        };
                        run_submit_job(&sessions, &ledger, submit_timeout, job).await;
                    }
                })
            })
            .collect();
        Self { tx, workers }
    }

    fn enqueue(&self, job: SubmitJob) -> Result<(), SendError> {
        self.tx.send(job).map_err(|_| SendError::PoolClosed)
    }

    /// Close the channel, let the workers drain the backlog within `grace`,
    /// then abort whatever is still running. Aborted jobs are not retried
    /// and never reach the ledger.
    async fn shutdown(self, grace: Duration) {
        drop(self.tx);
        let deadline = Instant::now() + grace;
        let mut aborted = 0usize;
        for mut worker in self.workers {
            if timeout_at(deadline, &mut worker).await.is_err() {
                worker.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            warn!("Dispatch pool drain timed out; aborted {} workers", aborted);
        }
    }
}

/// Fire-and-forget submission executed by a pool worker.
///
/// At-most-once, best-effort: a channel failure triggers a reconnect for the
/// benefit of later traffic, but this job's message is abandoned, not
/// retried. Successes are recorded in the ledger by the worker itself.
async fn run_submit_job<E: Engine>(
    sessions: &SessionManager<E>,
    ledger: &SentMessageLedger,
    submit_timeout: Duration,
    job: SubmitJob,
) {
    debug!("Sending message: {}", job.text);
    let Some(session) = sessions.current().await else {
        warn!("No bound session; dropping message: {}", job.text);
        return;
    };
    match session.send_request_async(job.request, submit_timeout).await {
        Ok(()) => {
            debug!("Message sent: {}", job.text);
            ledger.record(&job.text);
        }
        Err(error) if error.is_channel() => {
            error!("Channel issue detected. Attempting to reconnect. {}", error);
            sessions.reconnect().await;
        }
        Err(error) => {
            error!("Failed to send message: {}: {}", job.text, error);
        }
    }
}

/// Executes outbound message requests against the current session.
///
/// Two delivery contracts coexist here and are deliberately different:
///
/// * [`send_one`](Self::send_one) and [`send_long`](Self::send_long) are
///   synchronous. `send_one` retries exactly once after a channel failure
///   (at-least-once with one retry); `send_long` is fail-fast.
/// * [`send_many`](Self::send_many) and [`send_bulk`](Self::send_bulk) are
///   fire-and-forget over the worker pool: at-most-once, best-effort. A
///   worker that hits a channel failure reconnects and abandons its own
///   message. The calls return once everything is enqueued, not completed.
pub struct Dispatcher<E: Engine> {
    sessions: Arc<SessionManager<E>>,
    ledger: Arc<SentMessageLedger>,
    config: GatewayConfig,
    pool: DispatchPool,
}

impl<E: Engine> Dispatcher<E> {
    /// Creates a dispatcher and spawns its worker pool. Must be called
    /// from within a tokio runtime.
    pub fn new(
        sessions: Arc<SessionManager<E>>,
        ledger: Arc<SentMessageLedger>,
        config: GatewayConfig,
    ) -> Self {
        let pool = DispatchPool::spawn(
            config.pool_size,
            Arc::clone(&sessions),
            Arc::clone(&ledger),
            config.submit_timeout,
        );
        Self {
            sessions,
            ledger,
            config,
            pool,
        }
    }

    /// Submits one message synchronously and returns the SMSC message id.
    ///
    /// Binds first if the session is down. A channel failure triggers one
    /// reconnect followed by exactly one retried submission on the
    /// replacement session; a second channel failure propagates. Protocol
    /// and timeout faults are never retried. On success the message is
    /// recorded in the sent-message ledger.
    pub async fn send_one(
        &self,
        text: &str,
        from: &str,
        to: &str,
        delivery_receipt: bool,
    ) -> Result<String, SendError> {
        let mut session = self.sessions.ensure_bound().await?;
        let request = SubmitRequest::international(
            from,
            to,
            Bytes::copy_from_slice(text.as_bytes()),
            registered_delivery(delivery_receipt),
        );

        // Bounded retry: at most one reconnect-and-resend
        let mut retried = false;
        loop {
            match session
                .submit(request.clone(), self.config.submit_timeout)
                .await
            {
                Ok(response) => {
                    info!("Message sent, message id: {}", response.message_id);
                    self.ledger.record(text);
                    return Ok(response.message_id);
                }
                Err(error) if error.is_channel() && !retried => {
                    retried = true;
                    error!("Channel issue detected. Attempting to reconnect. {}", error);
                    self.sessions.reconnect().await;
                    session = self
                        .sessions
                        .current()
                        .await
                        .ok_or(SendError::Unbound)?;
                }
                Err(error) => return Err(SendError::Submit(error)),
            }
        }
    }

    /// Submits a message of any length, segmenting it when the payload
    /// exceeds the single-segment limit.
    ///
    /// Segments are submitted strictly in index order on the calling task,
    /// each completing before the next begins. The first failure aborts the
    /// remaining segments; nothing compensates for already-sent parts.
    /// Returns the number of segments submitted. Payloads that fit in one
    /// segment delegate to [`send_one`](Self::send_one).
    pub async fn send_long(
        &self,
        text: &str,
        from: &str,
        to: &str,
        delivery_receipt: bool,
    ) -> Result<usize, SendError> {
        if text.len() <= MAX_SEGMENT_PAYLOAD {
            self.send_one(text, from, to, delivery_receipt).await?;
            return Ok(1);
        }

        let session = self.sessions.ensure_bound().await?;
        let segments = segmenter::split(Bytes::copy_from_slice(text.as_bytes()))?;
        for segment in &segments {
            let request = SubmitRequest::international(
                from,
                to,
                segment.encode(),
                registered_delivery(delivery_receipt),
            );
            let response = session
                .submit(request, self.config.submit_timeout)
                .await
                .map_err(SendError::Submit)?;
            info!(
                "Message part {}/{} sent, message id: {}",
                segment.index, segment.total, response.message_id
            );
        }
        Ok(segments.len())
    }

    /// Enqueues every message to the worker pool for concurrent
    /// fire-and-forget submission.
    ///
    /// Binds once up front, then returns as soon as all messages are
    /// enqueued; completion is asynchronous and unordered, observable only
    /// through the ledger count. Every message requests a delivery receipt.
    pub async fn send_many(
        &self,
        messages: &[String],
        from: &str,
        to: &str,
    ) -> Result<usize, SendError> {
        self.sessions.ensure_bound().await?;
        self.enqueue_all(messages, from, to)
    }

    /// Like [`send_many`](Self::send_many), but first widens the session's
    /// submission window so the engine may keep the configured number of
    /// unacknowledged submissions in flight.
    pub async fn send_bulk(
        &self,
        messages: &[String],
        from: &str,
        to: &str,
    ) -> Result<usize, SendError> {
        let session = self.sessions.ensure_bound().await?;
        session.set_window_size(self.config.bulk_window_size);
        self.enqueue_all(messages, from, to)
    }

    /// Drains and stops the worker pool.
    pub async fn shutdown(self) {
        self.pool.shutdown(self.config.pool_shutdown_timeout).await;
    }

    fn enqueue_all(&self, messages: &[String], from: &str, to: &str) -> Result<usize, SendError> {
        let started = std::time::Instant::now();
        for text in messages {
            let request = SubmitRequest::international(
                from,
                to,
                Bytes::copy_from_slice(text.as_bytes()),
                REGISTERED_DELIVERY_SMSC_RECEIPT_REQUESTED,
            );
            self.pool.enqueue(SubmitJob {
                request,
                text: text.clone(),
            })?;
        }
        info!(
            "All {} messages dispatched in {} ms",
            messages.len(),
            started.elapsed().as_millis()
        );
        Ok(messages.len())
    }
}

fn registered_delivery(receipt_requested: bool) -> u8 {
    if receipt_requested {
        REGISTERED_DELIVERY_SMSC_RECEIPT_REQUESTED
    } else {
        0
    }
}
