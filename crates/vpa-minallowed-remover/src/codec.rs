use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use thiserror::Error;

use crate::admission_review::AdmissionReview;
use crate::quantity::{self, QuantityError};
use crate::vpa::VerticalPodAutoscaler;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("container policy {index}: {field}.{resource}: {source}")]
    InvalidQuantity {
        index: usize,
        field: &'static str,
        resource: String,
        #[source]
        source: QuantityError,
    },
}

/// Turns wire data into typed objects. It is built once at startup and shared
/// by every request, so tests can swap in their own implementation.
pub trait Decoder: Send + Sync {
    fn decode_review(&self, raw: &[u8]) -> Result<AdmissionReview, DecodeError>;

    fn decode_vpa(&self, object: &RawExtension) -> Result<VerticalPodAutoscaler, DecodeError>;
}

/// Decodes JSON payloads and validates every resource quantity of the
/// VerticalPodAutoscaler container policies.
#[derive(Clone, Debug, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode_review(&self, raw: &[u8]) -> Result<AdmissionReview, DecodeError> {
        Ok(serde_json::from_slice(raw)?)
    }

    fn decode_vpa(&self, object: &RawExtension) -> Result<VerticalPodAutoscaler, DecodeError> {
        let vpa: VerticalPodAutoscaler = serde_json::from_value(object.0.clone())?;
        validate_quantities(&vpa)?;
        Ok(vpa)
    }
}

fn validate_quantities(vpa: &VerticalPodAutoscaler) -> Result<(), DecodeError> {
    for (index, policy) in vpa.container_policies().iter().enumerate() {
        let lists = [
            ("minAllowed", policy.min_allowed.as_ref()),
            ("maxAllowed", policy.max_allowed.as_ref()),
        ];
        for (field, list) in lists {
            for (resource, value) in list.into_iter().flatten() {
                quantity::validate(value).map_err(|source| DecodeError::InvalidQuantity {
                    index,
                    field,
                    resource: resource.clone(),
                    source,
                })?;
            }
        }
    }
    Ok(())
}
