use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use insomniac_exec::CompletionRecord;
use serde::Serialize;
use tracing::info;

use crate::cmd::config::{build_coordinator, load_export};
use crate::cmd::progress::Progress;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{BatchArgs, OutputArgs};

#[derive(Serialize)]
struct GroupResult {
    group: String,
    environment: String,
    elapsed_ms: u64,
    records: Vec<CompletionRecord>,
}

#[derive(Serialize)]
struct RunResult {
    groups: Vec<GroupResult>,
}

pub async fn run_cmd(
    source: &Path,
    batch: &BatchArgs,
    results: Option<&Path>,
    output: OutputArgs,
) -> i32 {
    let parsed = match load_export(source, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let coordinator = match build_coordinator(parsed, batch, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let delay = Duration::from_millis(batch.delay);
    let show_progress = output.format == OutputFormat::Text && !output.quiet;
    let mut groups = Vec::with_capacity(batch.request_groups.len());

    for group_name in &batch.request_groups {
        let prepared = match coordinator
            .setup(group_name, &batch.environment, delay)
            .await
        {
            Ok(b) => b,
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::SETUP_FAILED;
            }
        };

        info!(
            "Found {} requests. Highest number of dependencies: {}.",
            prepared.requests().len(),
            prepared.max_dependency_count()
        );

        let position: HashMap<String, usize> = prepared
            .requests()
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        let environment = prepared.environment().name.clone();
        let progress = show_progress
            .then(|| Progress::new(prepared.leg_count()).spawn(prepared.subscribe()));

        let started = Instant::now();
        let outcome = prepared.run().await;
        let elapsed = started.elapsed();
        if let Some(handle) = progress {
            let _ = handle.await;
        }

        let mut records = match outcome {
            Ok(records) => records,
            Err(e) => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("group {group_name}: {e}"),
                );
                return exit_codes::RUN_FAILED;
            }
        };
        records.sort_by_key(|r| position.get(r.request_id()).copied().unwrap_or(usize::MAX));

        info!(
            "Completed {} requests ({}) in {:.3} seconds.",
            records.len(),
            group_name,
            elapsed.as_secs_f64()
        );

        groups.push(GroupResult {
            group: group_name.clone(),
            environment,
            elapsed_ms: elapsed.as_millis() as u64,
            records,
        });
    }

    let result = RunResult { groups };

    if let Some(path) = results {
        if let Err(code) = write_results(path, &result, &output) {
            return code;
        }
    }

    if output.format == OutputFormat::Text && !output.quiet {
        print_report(&result);
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}

fn write_results(path: &Path, result: &RunResult, output: &OutputArgs) -> Result<(), i32> {
    let json = serde_json::to_string_pretty(result).map_err(|e| {
        print_error(output.format, output.quiet, &format!("failed to encode results: {e}"));
        exit_codes::RUNTIME_ERROR
    })?;
    std::fs::write(path, json).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to write {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })
}

fn print_report(result: &RunResult) {
    for group in &result.groups {
        if result.groups.len() > 1 {
            println!("{} ({})", group.group, group.environment);
        }
        println!("Status\tMethod\tRequest Name");
        for record in &group.records {
            println!(
                "{}\t{}\t{}",
                record.status,
                record.request.method_label(),
                record.request.name
            );
        }
    }
}
