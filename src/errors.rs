use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Error type for the translation API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Translation already exists for category='{category}', locale='{locale}', key='{key}'")]
    AlreadyExists {
        category: String,
        locale: String,
        key: String,
    },
    #[error("Translation not found for category='{category}', locale='{locale}', key='{key}'")]
    NotFound {
        category: String,
        locale: String,
        key: String,
    },
    #[error("Request validation failed: {0}")]
    Validation(String),
    #[error("Internal server error")]
    Internal { error_id: Uuid, context: String },
}

impl ApiError {
    pub fn already_exists(category: &str, locale: &str, key: &str) -> Self {
        Self::AlreadyExists {
            category: category.to_string(),
            locale: locale.to_string(),
            key: key.to_string(),
        }
    }

    pub fn not_found(category: &str, locale: &str, key: &str) -> Self {
        Self::NotFound {
            category: category.to_string(),
            locale: locale.to_string(),
            key: key.to_string(),
        }
    }
}

/// Build an `ApiError::Internal` carrying a fresh error id for log correlation.
pub fn internal_error(context: &str) -> ApiError {
    ApiError::Internal {
        error_id: Uuid::new_v4(),
        context: context.to_string(),
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{field} is invalid")),
                }
            }
        }
        messages.sort();
        Self::Validation(messages.join("; "))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            ApiError::AlreadyExists { .. } => (
                StatusCode::CONFLICT,
                "Translation Already Exists",
                self.to_string(),
            ),
            ApiError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                "Translation Not Found",
                self.to_string(),
            ),
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                "Validation Failed",
                details.clone(),
            ),
            // Internal errors never leak details to the client
            ApiError::Internal { error_id, context } => {
                tracing::error!(
                    error_id = %error_id,
                    context = %context,
                    "Internal server error occurred"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_names_the_triple() {
        let error = ApiError::already_exists("app", "en", "greeting");
        assert!(error.to_string().contains("category='app'"));
        assert!(error.to_string().contains("locale='en'"));
        assert!(error.to_string().contains("key='greeting'"));
    }

    #[test]
    fn internal_error_carries_error_id() {
        let first = internal_error("db down");
        let second = internal_error("db down");
        match (first, second) {
            (
                ApiError::Internal { error_id: a, .. },
                ApiError::Internal { error_id: b, .. },
            ) => assert_ne!(a, b),
            _ => unreachable!(),
        }
    }
}
