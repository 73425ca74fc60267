use std::net::SocketAddr;

use axum::Router;
use rcgen::{CertificateParams, KeyPair};
use serde_json::json;
use tempfile::TempDir;
use vpa_minallowed_remover::{
    config::{Config, TlsConfig},
    MinAllowedRemover,
};

pub(crate) fn default_test_config(cert_dir: &TempDir) -> Config {
    let key_pair = KeyPair::generate().unwrap();
    let cert = CertificateParams::new(vec!["vpa-minallowed-remover.svc".to_owned()])
        .unwrap()
        .self_signed(&key_pair)
        .unwrap();
    std::fs::write(cert_dir.path().join("tls.crt"), cert.pem()).unwrap();
    std::fs::write(cert_dir.path().join("tls.key"), key_pair.serialize_pem()).unwrap();

    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
        tls_config: TlsConfig::from_cert_dir(cert_dir.path(), "tls.crt", "tls.key"),
        log_level: "info".to_owned(),
        log_fmt: "json".to_owned(),
        log_no_color: false,
    }
}

pub(crate) async fn app() -> Router {
    // Starting from rustls 0.22, each application must set its default crypto provider.
    // This is done by the `main` function, which is not called by the tests.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cert_dir = tempfile::tempdir().unwrap();
    let config = default_test_config(&cert_dir);
    let server = MinAllowedRemover::new_from_config(config).await.unwrap();

    server.router()
}

pub(crate) fn vpa(
    annotations: Option<serde_json::Value>,
    container_policies: serde_json::Value,
) -> serde_json::Value {
    let mut metadata = json!({"name": "test-vpa", "namespace": "default"});
    if let Some(annotations) = annotations {
        metadata["annotations"] = annotations;
    }

    json!({
        "apiVersion": "autoscaling.k8s.io/v1",
        "kind": "VerticalPodAutoscaler",
        "metadata": metadata,
        "spec": {
            "targetRef": {"apiVersion": "apps/v1", "kind": "Deployment", "name": "web"},
            "updatePolicy": {"updateMode": "Auto"},
            "resourcePolicy": {
                "containerPolicies": container_policies
            }
        }
    })
}

pub(crate) fn two_containers() -> serde_json::Value {
    json!([
        {"containerName": "container1", "minAllowed": {"cpu": "300m", "memory": "1024G"}},
        {"containerName": "container2", "minAllowed": {"cpu": "300m", "memory": "1024G"}}
    ])
}

pub(crate) fn admission_review(
    uid: &str,
    resource: serde_json::Value,
    object: serde_json::Value,
) -> serde_json::Value {
    json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": uid,
            "kind": {"group": "autoscaling.k8s.io", "version": "v1", "kind": "VerticalPodAutoscaler"},
            "resource": resource,
            "name": "test-vpa",
            "namespace": "default",
            "operation": "CREATE",
            "userInfo": {"username": "admin", "groups": ["system:authenticated"]},
            "object": object,
            "dryRun": false
        }
    })
}

pub(crate) fn vpa_resource() -> serde_json::Value {
    json!({"group": "autoscaling.k8s.io", "version": "v1", "resource": "verticalpodautoscalers"})
}
