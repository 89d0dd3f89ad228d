pub mod catalog;
pub mod config;
pub mod health;
pub mod recommend;

use ecopack_core::InterfaceError;
use serde::Serialize;

use crate::bootstrap::BootstrapError;

pub const EXIT_OK: u8 = 0;
pub const EXIT_INTERNAL: u8 = 1;
pub const EXIT_INVALID: u8 = 2;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            correlation_id: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Bad requests exit with `EXIT_INVALID`, everything else with
    /// `EXIT_INTERNAL`. The correlation id travels with the outcome.
    pub fn from_interface_error(command: &str, error: &InterfaceError) -> Self {
        let exit_code = match error {
            InterfaceError::BadRequest { .. } => EXIT_INVALID,
            InterfaceError::Internal { .. } => EXIT_INTERNAL,
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error.error_class().to_string()),
            message: format!("{} {error}", error.user_message()),
            correlation_id: Some(error.correlation_id().to_string()),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_bootstrap_error(command: &str, error: &BootstrapError) -> Self {
        Self::failure(command, error.error_class(), error.to_string(), EXIT_INVALID)
    }

    /// Successful command whose output is the serialized value itself.
    pub fn json(command: &str, value: &impl Serialize) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(output) => Self { exit_code: EXIT_OK, output },
            Err(error) => {
                Self::failure(command, "serialization", error.to_string(), EXIT_INTERNAL)
            }
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\
             \"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

#[cfg(test)]
mod tests {
    use ecopack_core::{InterfaceError, ValidationError};
    use serde_json::Value;

    use super::{CommandResult, EXIT_INTERNAL, EXIT_INVALID};

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).expect("outcome is JSON")
    }

    #[test]
    fn bad_request_outcome_carries_kind_and_correlation_id() {
        let error = InterfaceError::from(ValidationError::MissingField { field: "category" })
            .with_correlation_id("req-1");

        let result = CommandResult::from_interface_error("recommend", &error);

        assert_eq!(result.exit_code, EXIT_INVALID);
        let payload = parse(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "missing_field");
        assert_eq!(payload["correlation_id"], "req-1");
        let message = payload["message"].as_str().expect("message");
        assert!(message.contains("Missing required field: category"));
    }

    #[test]
    fn internal_outcome_exits_with_internal_code() {
        let error = InterfaceError::Internal {
            message: "boom".to_string(),
            correlation_id: "req-2".to_string(),
        };

        let result = CommandResult::from_interface_error("recommend", &error);

        assert_eq!(result.exit_code, EXIT_INTERNAL);
        assert_eq!(parse(&result.output)["error_class"], "internal");
    }

    #[test]
    fn failure_outcome_omits_correlation_id() {
        let result = CommandResult::failure("config", "config_validation", "bad level", 2);
        let payload = parse(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
        assert!(payload.get("correlation_id").is_none());
    }
}
