mod environment;
mod group;
mod request;

pub use environment::Environment;
pub use group::{RequestGroup, Workspace};
pub use request::{Header, Parameter, Request, RequestBody};
