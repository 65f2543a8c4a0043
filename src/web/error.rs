//! HTTP error mapping for the site API.

use crate::site::{
    domain::{SiteId, SiteUrl},
    ports::SiteRepositoryError,
    services::{SiteCatalogError, SiteCheckError},
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by HTTP handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload failed validation.
    #[error("{0}")]
    InvalidInput(String),
    /// The request could not be decoded into the handler's input.
    #[error("{message}")]
    Rejected {
        /// Status chosen by the failing extractor.
        status: StatusCode,
        /// Rejection text.
        message: String,
    },
    /// The requested site does not exist.
    #[error("site {0} not found")]
    NotFound(SiteId),
    /// The submitted URL is already registered.
    #[error("site URL already registered: {0}")]
    Conflict(SiteUrl),
    /// Storage or another internal dependency failed.
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Internal(detail) => {
                error!(error = %detail, "request failed");
                "internal server error".to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<SiteRepositoryError> for ApiError {
    fn from(err: SiteRepositoryError) -> Self {
        match err {
            SiteRepositoryError::DuplicateUrl(url) => Self::Conflict(url),
            SiteRepositoryError::NotFound(id) => Self::NotFound(id),
            other @ (SiteRepositoryError::InvalidPersistedData(_)
            | SiteRepositoryError::Persistence(_)) => Self::Internal(other.to_string()),
        }
    }
}

impl From<SiteCatalogError> for ApiError {
    fn from(err: SiteCatalogError) -> Self {
        match err {
            SiteCatalogError::Domain(domain) => Self::InvalidInput(domain.to_string()),
            SiteCatalogError::Repository(repository) => repository.into(),
            SiteCatalogError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<SiteCheckError> for ApiError {
    fn from(err: SiteCheckError) -> Self {
        match err {
            SiteCheckError::Repository(repository) => repository.into(),
        }
    }
}
