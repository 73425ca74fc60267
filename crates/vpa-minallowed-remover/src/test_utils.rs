use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use serde_json::json;

use crate::admission_review::{AdmissionRequest, AdmissionReview};

pub(crate) fn build_admission_review() -> AdmissionReview {
    let input = r#"
            {
                "apiVersion": "admission.k8s.io/v1",
                "kind": "AdmissionReview",
                "request": {
                    "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
                    "kind": {"group":"autoscaling.k8s.io","version":"v1","kind":"VerticalPodAutoscaler"},
                    "resource": {"group":"autoscaling.k8s.io","version":"v1","resource":"verticalpodautoscalers"},
                    "requestKind": {"group":"autoscaling.k8s.io","version":"v1","kind":"VerticalPodAutoscaler"},
                    "requestResource": {"group":"autoscaling.k8s.io","version":"v1","resource":"verticalpodautoscalers"},
                    "name": "test-vpa",
                    "namespace": "my-namespace",
                    "operation": "CREATE",
                    "userInfo": {
                      "username": "admin",
                      "uid": "014fbff9a07c",
                      "groups": ["system:authenticated","my-admin-group"]
                    },
                    "object": {
                      "apiVersion": "autoscaling.k8s.io/v1",
                      "kind": "VerticalPodAutoscaler",
                      "metadata": {"name": "test-vpa", "namespace": "my-namespace"},
                      "spec": {
                        "targetRef": {"apiVersion": "apps/v1", "kind": "Deployment", "name": "web"},
                        "resourcePolicy": {
                          "containerPolicies": [
                            {"containerName": "container1", "minAllowed": {"cpu": "300m", "memory": "1024G"}},
                            {"containerName": "container2", "minAllowed": {"cpu": "300m", "memory": "1024G"}}
                          ]
                        }
                      }
                    },
                    "oldObject": null,
                    "options": {"apiVersion":"meta.k8s.io/v1","kind":"CreateOptions"},
                    "dryRun": false
                }
            }
        "#;

    serde_json::from_str(input).expect("deserialization should work")
}

/// A VerticalPodAutoscaler object with the given annotations (omitted when
/// `None`) and container policies.
pub(crate) fn vpa_object(
    annotations: Option<serde_json::Value>,
    container_policies: serde_json::Value,
) -> serde_json::Value {
    let mut metadata = json!({"name": "test-vpa"});
    if let Some(annotations) = annotations {
        metadata["annotations"] = annotations;
    }

    json!({
        "apiVersion": "autoscaling.k8s.io/v1",
        "kind": "VerticalPodAutoscaler",
        "metadata": metadata,
        "spec": {
            "resourcePolicy": {
                "containerPolicies": container_policies
            }
        }
    })
}

pub(crate) fn admission_request(uid: &str, object: serde_json::Value) -> AdmissionRequest {
    let mut request = build_admission_review()
        .request
        .expect("request should be set");
    request.uid = uid.to_owned();
    request.object = Some(RawExtension(object));
    request
}
