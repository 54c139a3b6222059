use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("movie {0} not found")]
    NotFound(i32),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("movie database request failed: {0}")]
    Http(reqwest::Error),

    #[error("movie database returned an unusable response: {0}")]
    External(String),

    #[error("database error: {0}")]
    Database(DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Http(_) | AppError::External(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the browser. Server-side failures get a fixed message;
    /// their details only go to the log.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::BAD_GATEWAY => {
                "The movie database could not be reached or sent an unusable answer.".to_string()
            },
            status if status.is_server_error() => "Something went wrong.".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Drops the request URL, which carries the TMDB api key in its query.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(detail),
            _ => Self::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        let body = crate::templates::error_page(self.public_message());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
