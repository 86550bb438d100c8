use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column {0}")]
    MissingColumn(&'static str),

    #[error("Invalid id {value:?} on line {line}")]
    InvalidId { value: String, line: u64 },

    #[error("Requested {requested} records but only {available} are loaded")]
    OutOfRange { requested: usize, available: usize },

    #[error("No record with id {0}")]
    NotFound(i64),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please provide both username and password parameters")]
    MissingCredentials,

    #[error("Please provide id parameter")]
    MissingId,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("ID not found in the dataset")]
    NotFound,

    #[error("Invalid JSON format: Expected a list")]
    MalformedInput,

    #[error("Invalid query string")]
    InvalidQuery,

    #[error("Processing error: {0}")]
    Processing(String),
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::NotFound(_) => AppError::NotFound,
            other => AppError::Processing(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredentials
            | AppError::MissingId
            | AppError::MalformedInput
            | AppError::InvalidQuery => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Processing(detail) => {
                tracing::error!("Error processing request: {}", detail);
                "An error occurred while processing the request".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": error_message }))).into_response()
    }
}
