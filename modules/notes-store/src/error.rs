//! Error type shared by the store and the route handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Note not found")]
    NotFound,

    #[error("Note already exists")]
    Conflict,

    #[error("Invalid note name")]
    InvalidName,

    #[error("Missing {0}")]
    MissingField(&'static str),

    #[error("filesystem error: {0}")]
    Internal(#[from] io::Error),
}

impl NoteError {
    pub fn status(&self) -> StatusCode {
        match self {
            NoteError::NotFound => StatusCode::NOT_FOUND,
            NoteError::Conflict | NoteError::InvalidName | NoteError::MissingField(_) => {
                StatusCode::BAD_REQUEST
            }
            NoteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            NoteError::Internal(e) => {
                log::error!("Request failed: {}", e);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

impl From<NoteError> for Response {
    fn from(e: NoteError) -> Self {
        e.into_response()
    }
}
