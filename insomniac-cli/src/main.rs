use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(
    name = "insomniac",
    version,
    about = "Run Insomnia request groups in dependency order"
)]
struct Cli {
    /// Log at debug level unless INSOMNIAC_LOG, RUST_LOG or LOG_LEVEL is set
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = std::env::var("INSOMNIAC_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| default.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            source,
            batch,
            results,
            output,
        } => cmd::run::run_cmd(&source.source, &batch, results.as_deref(), output).await,
        Command::Plan {
            source,
            batch,
            output,
        } => cmd::plan::plan_cmd(&source.source, &batch, output).await,
        Command::Groups { source, output } => {
            cmd::groups::groups_cmd(&source.source, output).await
        }
    }
}
