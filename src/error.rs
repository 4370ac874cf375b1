use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type GenUiResult<T> = Result<T, GenUiError>;

/// A single field-level schema failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted JSON path, e.g. `tabs[1].label`
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenUiError {
    #[error("Unknown component type '{component_type}'")]
    UnknownComponentType { component_type: String },

    #[error("Invalid '{component_type}' component: {}", join_field_errors(.errors))]
    SchemaValidation {
        component_type: String,
        errors: Vec<FieldError>,
    },

    #[error("No renderer available for '{component_type}': {reason}")]
    RendererResolution {
        component_type: String,
        reason: String,
    },

    #[error("Rendering '{component_type}' in slot '{slot}' failed: {reason}")]
    ChildRender {
        component_type: String,
        slot: String,
        reason: String,
    },

    #[error("Invalid component tree: {reason}")]
    EmptyOrMalformedTree { reason: String },

    #[error("Maximum nesting depth ({max_depth}) exceeded")]
    MaxNestingDepthExceeded { max_depth: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),
}

impl GenUiError {
    /// Field errors carried by a schema failure; empty for every other variant.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            GenUiError::SchemaValidation { errors, .. } => errors,
            _ => &[],
        }
    }

    /// True for errors that indicate a broken deployment rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GenUiError::RendererResolution { .. } | GenUiError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for GenUiError {
    fn from(err: serde_json::Error) -> Self {
        GenUiError::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for GenUiError {
    fn from(err: serde_yaml::Error) -> Self {
        GenUiError::Yaml(err.to_string())
    }
}

/// Failure raised by a concrete renderer while building its widget.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid prop '{prop}': {reason}")]
    InvalidProp { prop: String, reason: String },

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Renderer panicked: {0}")]
    Panicked(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_field() {
        let err = GenUiError::SchemaValidation {
            component_type: "tabs".to_string(),
            errors: vec![
                FieldError::new("tabs", "is required"),
                FieldError::new("defaultTab", "expected a string"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid 'tabs' component: tabs: is required; defaultTab: expected a string"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn only_resolution_and_config_errors_are_fatal() {
        assert!(GenUiError::RendererResolution {
            component_type: "chart".to_string(),
            reason: "missing".to_string(),
        }
        .is_fatal());
        assert!(!GenUiError::UnknownComponentType {
            component_type: "x".to_string()
        }
        .is_fatal());
    }
}
