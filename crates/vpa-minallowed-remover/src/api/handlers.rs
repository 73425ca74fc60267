use std::sync::Arc;

use axum::{
    body::Bytes,
    extract,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, error, info, Span};

use crate::{
    admission_review::AdmissionRequest,
    api::{
        api_error::ApiError, response::encode_decision, state::ApiServerState,
        validation::read_admission_review,
    },
    decision::{decide, AdmissionDecision},
    errors::AdmissionError,
};

#[tracing::instrument(
    name = "mutation",
    fields(
        request_uid=tracing::field::Empty,
        host=crate::config::HOSTNAME.as_str(),
        name=tracing::field::Empty,
        namespace=tracing::field::Empty,
        operation=tracing::field::Empty,
        resource_group=tracing::field::Empty,
        resource_version=tracing::field::Empty,
        resource=tracing::field::Empty,
        allowed=tracing::field::Empty,
        mutated=tracing::field::Empty,
        patched_containers=tracing::field::Empty,
    ),
    skip_all)]
/// Review a VerticalPodAutoscaler and answer with the patch removing its
/// CPU minAllowed floors.
pub(crate) async fn mutate_handler(
    extract::State(state): extract::State<Arc<ApiServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let admission_review = read_admission_review(state.decoder.as_ref(), &headers, &body)
        .map_err(handle_admission_error)?;
    let request = admission_review
        .request
        .as_ref()
        .ok_or(AdmissionError::MissingRequest)
        .map_err(handle_admission_error)?;

    populate_span_with_admission_request_data(request);

    let decision = decide(state.decoder.as_ref(), request).map_err(handle_admission_error)?;

    populate_span_with_decision(&decision);
    if decision.patched_containers.is_empty() {
        debug!("no CPU minAllowed to remove");
    } else {
        info!(
            patched_containers = ?decision.patched_containers,
            "removing CPU minAllowed"
        );
    }

    let body = encode_decision(&admission_review, decision).map_err(handle_admission_error)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
        body,
    ))
}

pub(crate) async fn readiness_handler() -> StatusCode {
    StatusCode::OK
}

fn populate_span_with_admission_request_data(adm_req: &AdmissionRequest) {
    Span::current().record("request_uid", adm_req.uid.as_str());
    Span::current().record("name", adm_req.name.clone().unwrap_or_default().as_str());
    Span::current().record(
        "namespace",
        adm_req.namespace.clone().unwrap_or_default().as_str(),
    );
    Span::current().record("operation", adm_req.operation.as_str());
    Span::current().record("resource", adm_req.resource.resource.as_str());
    Span::current().record("resource_group", adm_req.resource.group.as_str());
    Span::current().record("resource_version", adm_req.resource.version.as_str());
}

fn populate_span_with_decision(decision: &AdmissionDecision) {
    Span::current().record("allowed", decision.allowed);
    Span::current().record("mutated", !decision.patches.is_empty());
    Span::current().record(
        "patched_containers",
        format!("{:?}", decision.patched_containers).as_str(),
    );
}

fn handle_admission_error(error: AdmissionError) -> ApiError {
    match &error {
        AdmissionError::EncodingFailure(_) => {
            error!(error = %error, "cannot build admission response")
        }
        _ => error!(error = %error, "cannot review admission request"),
    }
    ApiError::from(error)
}
