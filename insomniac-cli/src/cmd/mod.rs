pub mod config;
pub mod groups;
pub mod plan;
pub mod progress;
pub mod run;
