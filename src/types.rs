// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use poem_openapi::Object;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("You cannot view the page resource.")]
    Forbidden { status: u16 },
    #[error("No route was found matching the URL and request method.")]
    NoRoute { path: String },
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Forbidden error with the status chosen by the caller's authentication state.
    pub fn forbidden(authenticated: bool) -> Self {
        let status = if authenticated { 403 } else { 401 };
        ApiError::Forbidden { status }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Forbidden { .. } => "rest_forbidden",
            ApiError::NoRoute { .. } => "rest_no_route",
            ApiError::Internal { .. } => "rest_internal_error",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::Forbidden { status } => *status,
            ApiError::NoRoute { .. } => 404,
            ApiError::Internal { .. } => 500,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::Internal {
            message: error.to_string(),
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct ErrorData {
    pub status: u16,
}

/// Error body in the shape REST clients of the content platform expect.
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub data: ErrorData,
}

impl ErrorResponse {
    pub fn from_api_error(error: &ApiError) -> Self {
        ErrorResponse {
            code: error.error_code().to_string(),
            message: error.to_string(),
            data: ErrorData {
                status: error.http_status(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_status_follows_authentication() {
        assert_eq!(ApiError::forbidden(false).http_status(), 401);
        assert_eq!(ApiError::forbidden(true).http_status(), 403);
        assert_eq!(ApiError::forbidden(true).error_code(), "rest_forbidden");
    }

    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::from_api_error(&ApiError::forbidden(false));
        assert_eq!(response.code, "rest_forbidden");
        assert_eq!(response.message, "You cannot view the page resource.");
        assert_eq!(response.data.status, 401);

        let response = ErrorResponse::from_api_error(&ApiError::NoRoute {
            path: "/pages/abc".to_string(),
        });
        assert_eq!(response.code, "rest_no_route");
        assert_eq!(response.data.status, 404);
    }

    #[test]
    fn test_internal_from_anyhow() {
        let error: ApiError = anyhow::anyhow!("database is locked").into();
        assert_eq!(error.http_status(), 500);
        assert_eq!(error.to_string(), "Internal error: database is locked");
    }
}
