use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use ecopack_core::config::LoadOptions;
use ecopack_core::{InterfaceError, RecommendationInput};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::bootstrap;
use crate::commands::{CommandResult, EXIT_INVALID};

const COMMAND: &str = "recommend";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadSource {
    File(PathBuf),
    Stdin,
    Inline(String),
}

pub fn run(options: LoadOptions, source: PayloadSource) -> CommandResult {
    let app = match bootstrap::bootstrap(options) {
        Ok(app) => app,
        Err(error) => return CommandResult::from_bootstrap_error(COMMAND, &error),
    };
    let correlation_id = format!("req-{}", Uuid::new_v4().simple());

    let raw = match read_payload(&source) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "input_unreadable",
                format!("{error:#}"),
                EXIT_INVALID,
            );
        }
    };
    let payload = match serde_json::from_str::<Value>(&raw) {
        Ok(payload) => payload,
        Err(error) => {
            let error = InterfaceError::BadRequest {
                kind: "malformed_json",
                message: format!("request body is not valid JSON: {error}"),
                correlation_id: correlation_id.clone(),
            };
            return CommandResult::from_interface_error(COMMAND, &error);
        }
    };

    info!(
        event_name = "cli.recommend.received",
        correlation_id = correlation_id.as_str(),
        strategy = app.config.engine.strategy.as_str(),
        "recommendation requested"
    );

    let input = RecommendationInput {
        catalog: &app.catalog,
        payload: &payload,
        correlation_id: &correlation_id,
    };
    match app.engine.recommend(input) {
        Ok(recommendation) => CommandResult::json(COMMAND, &recommendation),
        Err(error) => {
            let error = InterfaceError::from(error).with_correlation_id(correlation_id);
            CommandResult::from_interface_error(COMMAND, &error)
        }
    }
}

fn read_payload(source: &PayloadSource) -> anyhow::Result<String> {
    match source {
        PayloadSource::Inline(raw) => Ok(raw.clone()),
        PayloadSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request file `{}`", path.display())),
        PayloadSource::Stdin => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw).context("failed to read request from stdin")?;
            Ok(raw)
        }
    }
}
