use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use insomniac_core::Request;
use insomniac_store::ResponseStore;
use tracing::{debug, error, info, warn};

use crate::executor::error::FatalError;
use crate::executor::events::{Event, EventBus, Subscription};
use crate::executor::record::{CompletionRecord, Status};
use crate::executor::sender::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegState {
    Pending,
    Waiting,
    Sending,
    Completed,
    Failed,
    Skipped,
}

impl LegState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LegState::Completed | LegState::Failed | LegState::Skipped
        )
    }
}

/// Run-wide collaborators shared by every leg of a batch.
pub(crate) struct LegContext {
    pub bus: Arc<EventBus>,
    pub sender: Arc<dyn Sender>,
    pub store: Arc<dyn ResponseStore>,
    pub environment_id: String,
    pub cascade_failures: bool,
}

enum Wait {
    Ready,
    Blocked { dependency: String },
    Abandoned,
}

/// Execution unit for one request of a batch.
pub(crate) struct Leg {
    request: Arc<Request>,
    pending: HashSet<String>,
    remaining: usize,
    delay: Duration,
    state: LegState,
    subscription: Option<Subscription>,
    ctx: Arc<LegContext>,
}

impl Leg {
    /// Subscribes to the bus immediately so no event published after setup
    /// can be missed.
    pub(crate) fn new(request: Arc<Request>, delay: Duration, ctx: Arc<LegContext>) -> Self {
        let pending: HashSet<String> = request.dependency_ids.iter().cloned().collect();
        let remaining = pending.len();
        let subscription = Some(ctx.bus.subscribe());
        Self {
            request,
            pending,
            remaining,
            delay,
            state: LegState::Pending,
            subscription,
            ctx,
        }
    }

    /// Drive the leg to a terminal state and return the state it ended in.
    ///
    /// A leg whose run is aborted or whose bus closes while it is still
    /// waiting returns early in `Waiting` (or `Pending`).
    pub(crate) async fn run(mut self) -> LegState {
        if let Err(err) = self.drive().await {
            error!(request_id = %self.request.id, error = %err, "unexpected error, aborting run");
            self.ctx.bus.publish(Event::Error(Arc::new(err)));
        }
        self.state
    }

    async fn drive(&mut self) -> Result<(), FatalError> {
        if !self.await_start().await {
            return Ok(());
        }

        if self.remaining == 0 {
            self.subscription = None;
            // Independent requests never wait on the configured delay.
            return self.send(Duration::ZERO).await;
        }

        self.state = LegState::Waiting;
        match self.await_dependencies().await {
            Wait::Ready => {
                self.subscription = None;
                self.send(self.delay).await
            }
            Wait::Blocked { dependency } => {
                self.subscription = None;
                self.skip(&dependency);
                Ok(())
            }
            Wait::Abandoned => {
                self.subscription = None;
                Ok(())
            }
        }
    }

    async fn await_start(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        while let Some(event) = subscription.recv().await {
            match event {
                Event::Start => return true,
                Event::Error(_) => return false,
                Event::RequestFinish(_) => {}
            }
        }
        false
    }

    async fn await_dependencies(&mut self) -> Wait {
        let Some(subscription) = self.subscription.as_mut() else {
            return Wait::Abandoned;
        };

        while let Some(event) = subscription.recv().await {
            let record = match event {
                Event::RequestFinish(record) => record,
                Event::Error(_) => return Wait::Abandoned,
                Event::Start => continue,
            };

            let finished = record.request_id();
            if !self.pending.contains(finished) {
                continue;
            }

            if record.error.is_some() {
                return Wait::Blocked {
                    dependency: finished.to_string(),
                };
            }

            self.pending.remove(finished);
            self.remaining -= 1;
            debug!(
                request = %self.request.name,
                finished,
                remaining = self.remaining,
                "dependency finished"
            );

            if self.remaining == 0 {
                return Wait::Ready;
            }
        }

        Wait::Abandoned
    }

    async fn send(&mut self, delay: Duration) -> Result<(), FatalError> {
        if !delay.is_zero() {
            debug!(request = %self.request.name, delay_ms = delay.as_millis() as u64, "delaying");
            tokio::time::sleep(delay).await;
        }

        self.state = LegState::Sending;
        info!(
            "executing request: {} {}",
            self.request.method_label(),
            self.request.name
        );

        let sent = self
            .ctx
            .sender
            .send(&self.request.id, &self.ctx.environment_id)
            .await;

        let patch = match sent {
            Ok(patch) => patch,
            Err(err) if err.is_fatal() => {
                self.state = LegState::Failed;
                return Err(FatalError::Send {
                    request_id: self.request.id.clone(),
                    source: err,
                });
            }
            Err(err) => {
                warn!(request = %self.request.name, error = %err, "error sending request");
                self.state = LegState::Failed;
                let error = self
                    .ctx
                    .cascade_failures
                    .then(|| format!("error sending request {}: {err}", self.request.id));
                self.finish(Status::Error, None, error);
                return Ok(());
            }
        };

        let response = match self.ctx.store.create(patch).await {
            Ok(response) => response,
            Err(source) => {
                self.state = LegState::Failed;
                return Err(FatalError::Store {
                    request_id: self.request.id.clone(),
                    source,
                });
            }
        };

        self.state = LegState::Completed;
        self.finish(Status::Code(response.status_code()), Some(response), None);
        Ok(())
    }

    fn skip(&mut self, dependency: &str) {
        debug!(request = %self.request.name, dependency, "dependency failed, not running");
        self.state = LegState::Skipped;
        let error = self
            .ctx
            .cascade_failures
            .then(|| format!("dependency {dependency} did not complete"));
        self.finish(Status::NotRun, None, error);
    }

    fn finish(
        &self,
        status: Status,
        response: Option<insomniac_store::StoredResponse>,
        error: Option<String>,
    ) {
        self.ctx
            .bus
            .publish(Event::RequestFinish(Arc::new(CompletionRecord {
                status,
                request: self.request.clone(),
                response,
                error,
            })));
    }
}
