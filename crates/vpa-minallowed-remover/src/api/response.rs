use base64::{engine::general_purpose, Engine as _};

use crate::admission_review::{AdmissionResponse, AdmissionReview, PatchType};
use crate::decision::AdmissionDecision;
use crate::errors::Result;
use crate::patch;

/// Wrap the decision into an AdmissionReview envelope shaped after
/// `request_review` and serialize it.
pub(crate) fn encode_decision(
    request_review: &AdmissionReview,
    decision: AdmissionDecision,
) -> Result<Vec<u8>> {
    let patch = patch::encode(decision.patches)?;

    let response = AdmissionResponse {
        uid: decision.uid,
        allowed: decision.allowed,
        patch_type: Some(PatchType::JSONPatch),
        patch: Some(general_purpose::STANDARD.encode(patch)),
    };

    let review = AdmissionReview::new_with_response(request_review, response);
    Ok(serde_json::to_vec(&review)?)
}
