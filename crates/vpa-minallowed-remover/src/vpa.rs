//! The subset of the `autoscaling.k8s.io/v1` VerticalPodAutoscaler schema the
//! webhook needs to look at. Unknown fields are ignored while decoding: the
//! object is never re-serialized, mutations are expressed as JSON patches
//! against the original payload.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Deserializer, Serialize};

use crate::admission_review::GroupVersionResource;

pub const VPA_GROUP: &str = "autoscaling.k8s.io";
pub const VPA_VERSION: &str = "v1";
pub const VPA_RESOURCE: &str = "verticalpodautoscalers";

pub const RESOURCE_CPU: &str = "cpu";

/// The only resource this webhook knows how to review.
pub fn supported_resource() -> GroupVersionResource {
    GroupVersionResource::new(VPA_GROUP, VPA_VERSION, VPA_RESOURCE)
}

pub type ResourceList = BTreeMap<String, Quantity>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalPodAutoscaler {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// `metadata.annotations` stays `None` when the map is missing or
    /// `null`, which is not the same as an empty map when building patches.
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: VerticalPodAutoscalerSpec,
}

impl VerticalPodAutoscaler {
    /// Container policies in declaration order. The position of each entry is
    /// the index used inside of the patch paths.
    pub fn container_policies(&self) -> &[ContainerResourcePolicy] {
        self.spec
            .resource_policy
            .as_ref()
            .and_then(|rp| rp.container_policies.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalPodAutoscalerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_policy: Option<PodResourcePolicy>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodResourcePolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_policies: Option<Vec<ContainerResourcePolicy>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerResourcePolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_resource_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_allowed: Option<ResourceList>,

    #[serde(
        default,
        deserialize_with = "deserialize_resource_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_allowed: Option<ResourceList>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controlled_resources: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controlled_values: Option<String>,
}

impl ContainerResourcePolicy {
    pub fn min_allowed_cpu(&self) -> Option<&Quantity> {
        self.min_allowed.as_ref().and_then(|r| r.get(RESOURCE_CPU))
    }
}

/// CRD payloads are not normalized by the API server, so a quantity can reach
/// us as a bare JSON number (`cpu: 1`) instead of a string. A `null` quantity
/// is dropped from the list, as if the resource was not listed.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuantityOrNumber {
    Quantity(String),
    Number(serde_json::Number),
}

impl From<QuantityOrNumber> for Quantity {
    fn from(value: QuantityOrNumber) -> Self {
        match value {
            QuantityOrNumber::Quantity(q) => Quantity(q),
            QuantityOrNumber::Number(n) => Quantity(n.to_string()),
        }
    }
}

fn deserialize_resource_list<'de, D>(deserializer: D) -> Result<Option<ResourceList>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<QuantityOrNumber>>> =
        Option::deserialize(deserializer)?;
    Ok(raw.map(|list| {
        list.into_iter()
            .filter_map(|(name, quantity)| quantity.map(|q| (name, q.into())))
            .collect()
    }))
}
