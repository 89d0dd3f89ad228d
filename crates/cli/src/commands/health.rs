use ecopack_core::config::LoadOptions;
use ecopack_core::domain::prediction::MODEL_VERSION;
use serde::Serialize;

use crate::bootstrap;
use crate::commands::CommandResult;

const COMMAND: &str = "health";

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    model_version: &'static str,
    strategy: &'static str,
    catalog_source: String,
    catalog_size: usize,
}

pub fn run(options: LoadOptions) -> CommandResult {
    let app = match bootstrap::bootstrap(options) {
        Ok(app) => app,
        Err(error) => return CommandResult::from_bootstrap_error(COMMAND, &error),
    };

    let report = HealthReport {
        status: "UP",
        model_version: MODEL_VERSION,
        strategy: app.config.engine.strategy.as_str(),
        catalog_source: app.catalog_source(),
        catalog_size: app.catalog.len(),
    };
    CommandResult::json(COMMAND, &report)
}
