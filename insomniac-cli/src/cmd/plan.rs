use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::cmd::config::{build_coordinator, load_export};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{BatchArgs, OutputArgs};

#[derive(Serialize)]
struct PlannedRequest {
    id: String,
    name: String,
    method: String,
    dependencies: Vec<String>,
}

#[derive(Serialize)]
struct PlannedGroup {
    group: String,
    environment: String,
    max_dependency_count: usize,
    requests: Vec<PlannedRequest>,
}

#[derive(Serialize)]
struct PlanResult {
    groups: Vec<PlannedGroup>,
}

pub async fn plan_cmd(source: &Path, batch: &BatchArgs, output: OutputArgs) -> i32 {
    let parsed = match load_export(source, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let coordinator = match build_coordinator(parsed, batch, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut groups = Vec::with_capacity(batch.request_groups.len());
    for group_name in &batch.request_groups {
        let prepared = match coordinator
            .setup(group_name, &batch.environment, Duration::ZERO)
            .await
        {
            Ok(b) => b,
            Err(e) => {
                print_error(output.format, output.quiet, &e.to_string());
                return exit_codes::SETUP_FAILED;
            }
        };

        groups.push(PlannedGroup {
            group: prepared.group().name.clone(),
            environment: prepared.environment().name.clone(),
            max_dependency_count: prepared.max_dependency_count(),
            requests: prepared
                .requests()
                .iter()
                .map(|r| PlannedRequest {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    method: r.method.clone(),
                    dependencies: r.dependency_ids.clone(),
                })
                .collect(),
        });
    }

    let result = PlanResult { groups };

    if output.format == OutputFormat::Text && !output.quiet {
        for group in &result.groups {
            println!(
                "{} ({}): {} requests",
                group.group,
                group.environment,
                group.requests.len()
            );
            for r in &group.requests {
                println!("  - {} {} [{}]", r.method, r.name, r.id);
                if !r.dependencies.is_empty() {
                    println!("    depends on: {}", r.dependencies.join(", "));
                }
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    exit_codes::SUCCESS
}
