use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::executor::error::FatalError;
use crate::executor::record::CompletionRecord;

/// Signals exchanged between the coordinator and its legs during one run.
#[derive(Debug, Clone)]
pub enum Event {
    /// Fired once, after every leg is listening.
    Start,
    /// A leg reached a terminal state. At most once per leg.
    RequestFinish(Arc<CompletionRecord>),
    /// Something outside the ordinary failure path went wrong; the run is over.
    Error(Arc<FatalError>),
}

/// In-process publish/subscribe channel scoped to a single run.
///
/// Each subscriber sees every event published after it subscribed, in
/// publish order. Nothing is replayed. Dropping a [`Subscription`]
/// unsubscribes it; the dead sender is pruned on the next publish.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Mutex<Subscribers>,
}

#[derive(Debug, Default)]
struct Subscribers {
    senders: Vec<mpsc::UnboundedSender<Event>>,
    closed: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subs = self.lock();
        if !subs.closed {
            subs.senders.push(tx);
        }
        Subscription { rx }
    }

    pub fn publish(&self, event: Event) {
        let mut subs = self.lock();
        subs.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Drop every subscriber. Pending `recv` calls return `None` once their
    /// buffered events are drained, and later publishes go nowhere.
    pub fn close(&self) {
        let mut subs = self.lock();
        subs.closed = true;
        subs.senders.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().senders.len()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        // The list stays consistent even if a holder panicked.
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Subscription {
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
