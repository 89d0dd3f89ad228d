use ecopack_core::config::LoadOptions;
use ecopack_core::MaterialProfile;
use serde::Serialize;

use crate::bootstrap;
use crate::commands::CommandResult;

const COMMAND: &str = "catalog";

#[derive(Debug, Serialize)]
struct CatalogReport<'a> {
    source: String,
    count: usize,
    materials: &'a [MaterialProfile],
    rejected: Vec<String>,
}

pub fn run(options: LoadOptions) -> CommandResult {
    let app = match bootstrap::bootstrap(options) {
        Ok(app) => app,
        Err(error) => return CommandResult::from_bootstrap_error(COMMAND, &error),
    };

    let report = CatalogReport {
        source: app.catalog_source(),
        count: app.catalog.len(),
        materials: app.catalog.materials(),
        rejected: app.catalog.rejected().iter().map(ToString::to_string).collect(),
    };
    CommandResult::json(COMMAND, &report)
}
