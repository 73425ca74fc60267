use axum::http::StatusCode;
use thiserror::Error;

use crate::admission_review::GroupVersionResource;
use crate::codec::DecodeError;

pub type Result<T> = std::result::Result<T, AdmissionError>;

#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("incorrect request content-type: got {content_type:?}, expect 'application/json'")]
    UnsupportedMediaType { content_type: String },

    #[error("body is empty, expected AdmissionReview")]
    EmptyBody,

    #[error("request could not be decoded: {0}")]
    MalformedEnvelope(#[source] DecodeError),

    #[error("AdmissionReview does not contain a request")]
    MissingRequest,

    #[error("AdmissionRequest does not contain an object")]
    MissingObject,

    #[error("error while parsing VPA from request: {0}")]
    MalformedObject(#[source] DecodeError),

    #[error("found invalid resource, got {got}, want {want}")]
    UnsupportedResourceType {
        got: GroupVersionResource,
        want: GroupVersionResource,
    },

    #[error("cannot encode admission response: {0}")]
    EncodingFailure(#[from] serde_json::Error),
}

impl AdmissionError {
    /// Client mistakes are reported as 400, everything we fail to produce
    /// ourselves is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdmissionError::EncodingFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
