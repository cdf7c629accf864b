use std::path::Path;

use insomniac_store::{Catalog, MemoryCatalog};
use serde::Serialize;

use crate::cmd::config::load_export;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct GroupInfo {
    id: String,
    name: String,
    request_count: usize,
}

#[derive(Serialize)]
struct GroupsResult {
    workspace: String,
    groups: Vec<GroupInfo>,
}

pub async fn groups_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match load_export(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let catalog = MemoryCatalog::from(parsed);

    let listed = match list_groups(&catalog).await {
        Ok(v) => v,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Request groups in {}:", listed.workspace);
        for g in &listed.groups {
            println!("  - {} ({} requests)", g.name, g.request_count);
        }
    } else {
        print_result(output.format, output.quiet, &listed);
    }

    exit_codes::SUCCESS
}

async fn list_groups(catalog: &dyn Catalog) -> Result<GroupsResult, insomniac_store::StoreError> {
    let workspace = catalog.workspace().await?;
    let mut groups = Vec::new();
    for group in catalog.request_groups().await? {
        let request_count = catalog.requests_by_parent(&group.id).await?.len();
        groups.push(GroupInfo {
            id: group.id,
            name: group.name,
            request_count,
        });
    }
    Ok(GroupsResult {
        workspace: workspace.name,
        groups,
    })
}
