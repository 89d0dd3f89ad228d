use std::path::PathBuf;

use thiserror::Error;

/// Rejection of a caller payload before any computation runs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("{field} must be {expected}")]
    TypeError { field: &'static str, expected: &'static str },
    #[error("{field} {constraint}")]
    RangeError { field: &'static str, constraint: &'static str },
    #[error("Invalid {field} value `{value}` (expected one of {expected})")]
    InvalidEnum { field: &'static str, value: String, expected: &'static str },
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::TypeError { .. } => "type_error",
            Self::RangeError { .. } => "range_error",
            Self::InvalidEnum { .. } => "invalid_enum",
        }
    }
}

/// Data-integrity fault while evaluating a single material. The engine drops the
/// material from the result set and reports it as a warning.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ComputeError {
    #[error("material `{material}` violates profile invariants: {reason}")]
    InvalidProfile { material: String, reason: String },
    #[error("material `{material}` produced a non-finite {quantity}")]
    NonFinite { material: String, quantity: &'static str },
    #[error("material `{material}` produced a negative {quantity}")]
    Negative { material: String, quantity: &'static str },
    #[error("cost/co2 model failed for material `{material}`: {message}")]
    Model { material: String, message: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog must contain at least one material")]
    Empty,
    #[error("catalog lists material `{0}` more than once")]
    DuplicateMaterial(String),
    #[error("material `{material}` has unknown {table} key `{key}`")]
    UnknownKey { material: String, table: &'static str, key: String },
}

/// Caller-facing failure shape. Everything the engine or its bootstrap can raise
/// maps onto one of these variants.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { kind: &'static str, message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { kind, .. } => *kind,
            Self::Internal { .. } => "internal",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        let correlation_id = correlation_id.into();
        match &mut self {
            Self::BadRequest { correlation_id: id, .. }
            | Self::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        self
    }
}

impl From<ValidationError> for InterfaceError {
    fn from(value: ValidationError) -> Self {
        Self::BadRequest {
            kind: value.kind(),
            message: value.to_string(),
            correlation_id: "unassigned".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{InterfaceError, ValidationError};

    #[test]
    fn validation_error_maps_to_bad_request_with_kind() {
        let interface = InterfaceError::from(ValidationError::MissingField {
            field: "fragility_index",
        })
        .with_correlation_id("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { kind: "missing_field", ref correlation_id, .. }
                if correlation_id == "req-1"
        ));
        assert_eq!(interface.error_class(), "missing_field");
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn validation_message_names_the_field() {
        let error = ValidationError::MissingField { field: "shipping_type" };
        assert_eq!(error.to_string(), "Missing required field: shipping_type");

        let error = ValidationError::RangeError {
            field: "fragility_index",
            constraint: "must be between 0 and 1",
        };
        assert_eq!(error.kind(), "range_error");
        assert_eq!(error.to_string(), "fragility_index must be between 0 and 1");
    }
}
