use axum::http::{header, HeaderMap};

use crate::admission_review::AdmissionReview;
use crate::codec::Decoder;
use crate::errors::{AdmissionError, Result};

/// Check the transport level preconditions of an admission request and decode
/// its AdmissionReview envelope.
pub(crate) fn read_admission_review(
    decoder: &dyn Decoder,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<AdmissionReview> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    if content_type != mime::APPLICATION_JSON.as_ref() {
        return Err(AdmissionError::UnsupportedMediaType { content_type });
    }

    if body.is_empty() {
        return Err(AdmissionError::EmptyBody);
    }

    decoder
        .decode_review(body)
        .map_err(AdmissionError::MalformedEnvelope)
}
