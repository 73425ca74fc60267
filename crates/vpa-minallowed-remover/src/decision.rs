use json_patch::jsonptr::PointerBuf;
use json_patch::PatchOperation;
use tracing::debug;

use crate::admission_review::AdmissionRequest;
use crate::codec::{DecodeError, Decoder};
use crate::errors::{AdmissionError, Result};
use crate::patch::PatchBuilder;
use crate::quantity;
use crate::vpa::{self, VerticalPodAutoscaler};

/// Annotation recording which container policies lost their CPU floor.
pub const ANNOTATION_KEY: &str = "vpaMinallowedRemover";

/// Outcome of the review of a single AdmissionRequest. The webhook never
/// rejects a resource, it can only ask for it to be patched.
#[derive(Clone, Debug, PartialEq)]
pub struct AdmissionDecision {
    pub uid: String,
    pub allowed: bool,
    pub patches: Vec<PatchOperation>,
    /// Indexes of the container policies whose CPU floor is removed, ascending.
    pub patched_containers: Vec<usize>,
}

/// Decide which patches have to be applied to the VerticalPodAutoscaler
/// carried by `request`.
pub fn decide(decoder: &dyn Decoder, request: &AdmissionRequest) -> Result<AdmissionDecision> {
    let want = vpa::supported_resource();
    if request.resource != want {
        return Err(AdmissionError::UnsupportedResourceType {
            got: request.resource.clone(),
            want,
        });
    }

    let object = request.object.as_ref().ok_or(AdmissionError::MissingObject)?;
    let autoscaler = decoder
        .decode_vpa(object)
        .map_err(AdmissionError::MalformedObject)?;

    let (patches, patched_containers) = build_patches(&autoscaler)?;
    debug!(
        patches = patches.len(),
        ?patched_containers,
        "admission decision computed"
    );

    Ok(AdmissionDecision {
        uid: request.uid.clone(),
        allowed: true,
        patches,
        patched_containers,
    })
}

fn build_patches(
    autoscaler: &VerticalPodAutoscaler,
) -> Result<(Vec<PatchOperation>, Vec<usize>)> {
    let mut builder = PatchBuilder::new();
    let mut patched_containers = Vec::new();

    for (index, policy) in autoscaler.container_policies().iter().enumerate() {
        let Some(cpu) = policy.min_allowed_cpu() else {
            continue;
        };
        // a zero floor is what a previous review left behind
        let is_zero = quantity::is_zero(cpu).map_err(|source| {
            AdmissionError::MalformedObject(DecodeError::InvalidQuantity {
                index,
                field: "minAllowed",
                resource: vpa::RESOURCE_CPU.to_owned(),
                source,
            })
        })?;
        if is_zero {
            continue;
        }

        builder.remove(min_allowed_cpu_path(index));
        patched_containers.push(index);
    }

    if patched_containers.is_empty() {
        return Ok((builder.build(), patched_containers));
    }

    builder.add_map_entry(
        annotations_path(),
        autoscaler.metadata.annotations.is_some(),
        ANNOTATION_KEY,
        &annotation_message(&patched_containers),
    );

    Ok((builder.build(), patched_containers))
}

fn min_allowed_cpu_path(index: usize) -> PointerBuf {
    PointerBuf::from_tokens([
        "spec",
        "resourcePolicy",
        "containerPolicies",
        index.to_string().as_str(),
        "minAllowed",
        vpa::RESOURCE_CPU,
    ])
}

fn annotations_path() -> PointerBuf {
    PointerBuf::from_tokens(["metadata", "annotations"])
}

fn annotation_message(patched_containers: &[usize]) -> String {
    let containers: Vec<String> = patched_containers
        .iter()
        .map(|index| format!("container {index}"))
        .collect();
    format!("removed CPU minAllowed for {}", containers.join(", "))
}
