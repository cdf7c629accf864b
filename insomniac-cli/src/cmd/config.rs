use std::path::Path;
use std::sync::Arc;

use insomniac_core::{parse_export_str, ExportFormat, ParsedExport};
use insomniac_exec::{Coordinator, CoordinatorConfig, HttpSender};
use insomniac_store::{Catalog, MemoryCatalog, MemoryResponseStore};
use tracing::debug;

use crate::exit_codes;
use crate::output::print_error;
use crate::{BatchArgs, OutputArgs};

/// Read and import an export file. On failure the error is already printed
/// and the exit code to use is returned.
pub fn load_export(path: &Path, output: &OutputArgs) -> Result<ParsedExport, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    match parse_export_str(&content, ExportFormat::Auto) {
        Ok(parsed) => {
            debug!(
                path = %path.display(),
                format = ?parsed.format,
                requests = parsed.requests.len(),
                "imported export"
            );
            Ok(parsed)
        }
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to import {}: {e}", path.display()),
            );
            Err(exit_codes::SETUP_FAILED)
        }
    }
}

pub fn build_coordinator_config(batch: &BatchArgs) -> CoordinatorConfig {
    CoordinatorConfig {
        cascade_failures: batch.skip_dependents_on_error,
    }
}

pub fn build_coordinator(
    parsed: ParsedExport,
    batch: &BatchArgs,
    output: &OutputArgs,
) -> Result<Coordinator, i32> {
    let catalog: Arc<dyn Catalog> = Arc::new(MemoryCatalog::from(parsed));
    let sender = HttpSender::new(catalog.clone()).map_err(|e| {
        print_error(output.format, output.quiet, &e.to_string());
        exit_codes::RUNTIME_ERROR
    })?;

    Ok(Coordinator::new(
        build_coordinator_config(batch),
        catalog,
        Arc::new(sender),
        Arc::new(MemoryResponseStore::new()),
    ))
}
