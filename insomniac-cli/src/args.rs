use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Insomnia export file (JSON or YAML)
    pub source: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Request group to run; repeat to run several groups one after another
    #[arg(short = 'g', long = "request-groups", value_name = "GROUP", required = true)]
    pub request_groups: Vec<String>,
    /// Name of the environment to run against
    #[arg(short, long)]
    pub environment: String,
    /// Milliseconds to wait before sending a request whose dependencies finished
    #[arg(short, long, value_name = "MS", default_value_t = 0)]
    pub delay: u64,
    /// Report dependents of a failed request as NOT RUN instead of sending them
    #[arg(long)]
    pub skip_dependents_on_error: bool,
}
