#![forbid(unsafe_code)]

//! Runs a request group in dependency order.
//!
//! Dependencies are never declared explicitly: each request's fields are
//! scanned for `{% ... %}` tags naming other request ids, and the resulting
//! lists form an implicit graph. Every request gets a leg that
//! waits on its dependencies over a per-run event bus.

pub mod executor;

pub use crate::executor::{
    Batch, CompletionMap, CompletionRecord, Coordinator, CoordinatorConfig, Event, EventBus,
    FatalError, HttpSender, LegState, RunError, SendError, Sender, SetupError, Status,
    Subscription,
};
