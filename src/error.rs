use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Literal cannot be coerced into the native type of the field.
    InvalidFilterValue {
        field: String,
        value: String,
        expected: String,
    },
    /// A token looks like an operator but is not one the field kind accepts.
    UnknownFilterOperator { field: String, value: String },
    /// A required operand is missing.
    EmptyFilterValue { field: String, value: String },
    UnknownField { entity: String, field: String },
    UnknownEntity(String),
    Configuration(String),
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidFilterValue {
                field,
                value,
                expected,
            } => write!(
                f,
                "Invalid filter value '{}' for field '{}': expected {}",
                value, field, expected
            ),
            AppError::UnknownFilterOperator { field, value } => {
                write!(f, "Unknown filter operator in '{}' for field '{}'", value, field)
            }
            AppError::EmptyFilterValue { field, value } => {
                write!(f, "Empty filter value in '{}' for field '{}'", value, field)
            }
            AppError::UnknownField { entity, field } => {
                write!(f, "Field '{}' is not an attribute of {}", field, entity)
            }
            AppError::UnknownEntity(name) => write!(f, "Unknown entity: {}", name),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::Yaml(e) => write!(f, "YAML error: {}", e),
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Yaml(e) => Some(e),
            AppError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Yaml(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_value(field: &str, value: &str, expected: impl Into<String>) -> Self {
        AppError::InvalidFilterValue {
            field: field.to_string(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    pub fn unknown_operator(field: &str, value: &str) -> Self {
        AppError::UnknownFilterOperator {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn empty_value(field: &str, value: &str) -> Self {
        AppError::EmptyFilterValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// True for the three errors raised while reading a filter string.
    pub fn is_filter_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFilterValue { .. }
                | AppError::UnknownFilterOperator { .. }
                | AppError::EmptyFilterValue { .. }
        )
    }

    /// Stable error code reported to API clients.
    pub fn code(&self) -> u16 {
        match self {
            AppError::EmptyFilterValue { .. } => 201,
            AppError::InvalidFilterValue { .. } => 202,
            AppError::UnknownFilterOperator { .. } => 203,
            AppError::UnknownField { .. } | AppError::UnknownEntity(_) => 207,
            _ => 301,
        }
    }

    /// Client-facing summary, independent of the offending input.
    pub fn message(&self) -> &'static str {
        match self {
            AppError::EmptyFilterValue { .. } => "Field value is empty.",
            AppError::InvalidFilterValue { .. } => "Field value is wrong.",
            AppError::UnknownFilterOperator { .. } => "Field contains a wrong operator.",
            AppError::UnknownField { .. } | AppError::UnknownEntity(_) => {
                "Field is not an attribute of model."
            }
            _ => "Internal error occurred, please contact your administrator.",
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::InvalidFilterValue { field, .. }
            | AppError::UnknownFilterOperator { field, .. }
            | AppError::EmptyFilterValue { field, .. }
            | AppError::UnknownField { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            AppError::InvalidFilterValue { value, .. }
            | AppError::UnknownFilterOperator { value, .. }
            | AppError::EmptyFilterValue { value, .. } => Some(value),
            AppError::UnknownEntity(name) => Some(name),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidFilterValue { .. }
            | AppError::UnknownFilterOperator { .. }
            | AppError::EmptyFilterValue { .. }
            | AppError::UnknownField { .. }
            | AppError::UnknownEntity(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> (StatusCode, Json<serde_json::Value>) {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let cause = if status.is_client_error() {
            Some(self.to_string())
        } else {
            None
        };

        (
            status,
            Json(json!({
                "code": self.code(),
                "message": self.message(),
                "field": self.field(),
                "value": self.value(),
                "cause": cause,
            })),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}
