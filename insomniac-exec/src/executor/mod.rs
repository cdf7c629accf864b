mod coordinator;
mod error;
pub mod events;
pub mod http;
mod leg;
mod record;
mod sender;
mod types;

pub use coordinator::{Batch, Coordinator};
pub use error::{FatalError, RunError, SetupError};
pub use events::{Event, EventBus, Subscription};
pub use http::HttpSender;
pub use leg::LegState;
pub use record::{CompletionMap, CompletionRecord, Status};
pub use sender::{SendError, Sender};
pub use types::CoordinatorConfig;
