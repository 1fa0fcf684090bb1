//! Deployment rubric: replicas, container image, resources, probes,
//! and config/secret wiring. Worth 25 points.

use super::{parsed_or_gate, EvaluationOutcome, ManifestKind, ScoreCard};
use crate::manifest::nav;
use crate::manifest::ManifestSource;
use serde_yaml::Value;

const EXPECTED_IMAGE: &str = "k8s-challenge-app";
const HEALTH_PATH: &str = "/health";

pub fn evaluate(source: &ManifestSource) -> EvaluationOutcome {
    let doc = match parsed_or_gate(ManifestKind::Deployment, source) {
        Ok(doc) => doc,
        Err(outcome) => return outcome,
    };

    let mut card = ScoreCard::new();

    check_replicas(&mut card, doc);

    match nav::items_at(doc, &["spec", "template", "spec", "containers"]).first() {
        Some(container) => check_container(&mut card, container),
        None => card.fail("Container defined", "No containers found"),
    }

    card.into_outcome(ManifestKind::Deployment.max_points())
}

fn check_replicas(card: &mut ScoreCard, doc: &Value) {
    let replicas = nav::int_or(doc, &["spec", "replicas"], 0);
    if replicas >= 2 {
        card.pass("Replicas >= 2", format!("Found {replicas} replicas"), 5);
    } else {
        card.fail("Replicas >= 2", format!("Found {replicas}, need at least 2"));
    }
}

fn check_container(card: &mut ScoreCard, container: &Value) {
    check_image(card, container);
    check_resources(card, container);
    check_probe(card, container, "livenessProbe", "Liveness probe");
    check_probe(card, container, "readinessProbe", "Readiness probe");
    check_configmap_ref(card, container);
    check_secret_ref(card, container);
}

fn check_image(card: &mut ScoreCard, container: &Value) {
    let image = nav::str_at(container, &["image"]).unwrap_or("");
    if image.contains(EXPECTED_IMAGE) {
        card.pass("Correct image", image, 3);
    } else {
        card.fail(
            "Correct image",
            format!("Expected {EXPECTED_IMAGE}, got {image}"),
        );
    }
}

fn check_resources(card: &mut ScoreCard, container: &Value) {
    let has_limits = nav::truthy_at(container, &["resources", "limits"]);
    let has_requests = nav::truthy_at(container, &["resources", "requests"]);
    if has_limits && has_requests {
        card.pass("Resource limits", "Requests and limits defined", 5);
    } else {
        card.fail("Resource limits", "Missing requests or limits");
    }
}

fn check_probe(card: &mut ScoreCard, container: &Value, field: &str, label: &str) {
    if !nav::truthy_at(container, &[field]) {
        card.fail(label, "Not configured");
        return;
    }

    if nav::str_at(container, &[field, "httpGet", "path"]) == Some(HEALTH_PATH) {
        card.pass(label, format!("HTTP GET {HEALTH_PATH}"), 4);
    } else {
        card.fail(label, "Wrong path or type");
    }
}

fn check_configmap_ref(card: &mut ScoreCard, container: &Value) {
    let has_configmap = nav::items_at(container, &["envFrom"])
        .iter()
        .any(|entry| nav::truthy_at(entry, &["configMapRef"]));

    if has_configmap {
        card.pass("ConfigMap reference", "envFrom configured", 2);
    } else {
        card.fail("ConfigMap reference", "Missing envFrom configMapRef");
    }
}

fn check_secret_ref(card: &mut ScoreCard, container: &Value) {
    let has_secret = nav::items_at(container, &["env"])
        .iter()
        .any(|entry| nav::truthy_at(entry, &["valueFrom", "secretKeyRef"]));

    if has_secret {
        card.pass("Secret reference", "secretKeyRef configured", 2);
    } else {
        card.fail("Secret reference", "Missing secretKeyRef");
    }
}
