use axum::{http::header, http::StatusCode, response::IntoResponse};

use crate::errors::AdmissionError;

#[derive(Debug)]
/// An error that can be returned by the API
/// and will be converted into a plain text response.
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl From<AdmissionError> for ApiError {
    fn from(error: AdmissionError) -> Self {
        Self {
            status: error.status_code(),
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string())],
            self.message,
        )
            .into_response()
    }
}
