//! Service rubric: NodePort exposure with the expected selector and
//! port mapping. Worth 20 points.

use super::{parsed_or_gate, EvaluationOutcome, ManifestKind, ScoreCard};
use crate::manifest::nav;
use crate::manifest::ManifestSource;
use serde_yaml::{Mapping, Value};

const EXPECTED_TYPE: &str = "NodePort";
const EXPECTED_APP: &str = "k8s-challenge";
const EXPECTED_PORT: i64 = 80;
const EXPECTED_TARGET_PORT: i64 = 5000;

pub fn evaluate(source: &ManifestSource) -> EvaluationOutcome {
    let doc = match parsed_or_gate(ManifestKind::Service, source) {
        Ok(doc) => doc,
        Err(outcome) => return outcome,
    };

    let mut card = ScoreCard::new();

    check_type(&mut card, doc);
    check_selector(&mut card, doc);

    match nav::items_at(doc, &["spec", "ports"]).first() {
        Some(port) => {
            check_port_mapping(&mut card, port);
            check_node_port(&mut card, port);
        }
        None => card.fail("Ports defined", "No ports configured"),
    }

    card.into_outcome(ManifestKind::Service.max_points())
}

fn check_type(card: &mut ScoreCard, doc: &Value) {
    // Kubernetes defaults an unspecified service type to ClusterIP
    let svc_type = match nav::at(doc, &["spec", "type"]) {
        Some(value) => nav::display_scalar(value),
        None => "ClusterIP".to_string(),
    };

    if svc_type == EXPECTED_TYPE {
        card.pass("Service type", EXPECTED_TYPE, 5);
    } else {
        card.fail(
            "Service type",
            format!("Expected {EXPECTED_TYPE}, got {svc_type}"),
        );
    }
}

fn check_selector(card: &mut ScoreCard, doc: &Value) {
    if nav::str_at(doc, &["spec", "selector", "app"]) == Some(EXPECTED_APP) {
        card.pass("Selector matches", format!("app: {EXPECTED_APP}"), 5);
    } else {
        let empty = Mapping::new();
        let selector = nav::mapping_at(doc, &["spec", "selector"]).unwrap_or(&empty);
        card.fail(
            "Selector matches",
            format!(
                "Expected app: {EXPECTED_APP}, got {}",
                nav::display_mapping(selector)
            ),
        );
    }
}

fn check_port_mapping(card: &mut ScoreCard, port: &Value) {
    let port_number = nav::at(port, &["port"]).and_then(Value::as_i64);
    let target_port = nav::at(port, &["targetPort"]).and_then(Value::as_i64);

    if port_number == Some(EXPECTED_PORT) && target_port == Some(EXPECTED_TARGET_PORT) {
        card.pass(
            "Port mapping",
            format!("{EXPECTED_PORT} → {EXPECTED_TARGET_PORT}"),
            5,
        );
    } else {
        card.fail(
            "Port mapping",
            format!(
                "Expected {EXPECTED_PORT}→{EXPECTED_TARGET_PORT}, got {}→{}",
                nav::display_at(port, &["port"]),
                nav::display_at(port, &["targetPort"]),
            ),
        );
    }
}

fn check_node_port(card: &mut ScoreCard, port: &Value) {
    if nav::truthy_at(port, &["nodePort"]) {
        card.pass(
            "NodePort set",
            format!("Port {}", nav::display_at(port, &["nodePort"])),
            5,
        );
    } else {
        card.fail("NodePort set", "Not specified");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn evaluate_yaml(yaml: &str) -> EvaluationOutcome {
        evaluate(&ManifestSource::from_yaml_str(yaml))
    }

    const COMPLETE: &str = indoc! {"
        apiVersion: v1
        kind: Service
        spec:
          type: NodePort
          selector:
            app: k8s-challenge
          ports:
            - port: 80
              targetPort: 5000
              nodePort: 30080
    "};

    #[test]
    fn test_complete_service_scores_full_marks() {
        let outcome = evaluate_yaml(COMPLETE);
        assert_eq!(outcome.points, 20);
        assert_eq!(outcome.max_points, 20);
        assert!(outcome.checks.iter().all(|c| c.passed));
        assert_eq!(outcome.checks.len(), 4);
    }

    #[test]
    fn test_missing_type_defaults_to_clusterip() {
        let outcome = evaluate_yaml("spec:\n  selector:\n    app: k8s-challenge\n");
        let type_check = &outcome.checks[0];
        assert!(!type_check.passed);
        assert_eq!(type_check.detail, "Expected NodePort, got ClusterIP");
    }

    #[test]
    fn test_wrong_type_reported() {
        let outcome = evaluate_yaml("spec:\n  type: LoadBalancer\n");
        assert_eq!(outcome.checks[0].detail, "Expected NodePort, got LoadBalancer");
    }

    #[test]
    fn test_selector_failure_shows_observed_mapping() {
        let outcome = evaluate_yaml(indoc! {"
            spec:
              selector:
                app: wrong-app
        "});
        let selector = &outcome.checks[1];
        assert!(!selector.passed);
        assert_eq!(
            selector.detail,
            "Expected app: k8s-challenge, got {app: wrong-app}"
        );
    }

    #[test]
    fn test_missing_selector_shows_empty_mapping() {
        let outcome = evaluate_yaml("spec: {}\n");
        assert_eq!(
            outcome.checks[1].detail,
            "Expected app: k8s-challenge, got {}"
        );
    }

    #[test]
    fn test_wrong_ports_report_observed_mapping() {
        let outcome = evaluate_yaml(indoc! {"
            spec:
              ports:
                - port: 8080
                  targetPort: 9090
        "});
        let mapping = outcome
            .checks
            .iter()
            .find(|c| c.name == "Port mapping")
            .unwrap();
        assert_eq!(mapping.detail, "Expected 80→5000, got 8080→9090");

        let node_port = outcome
            .checks
            .iter()
            .find(|c| c.name == "NodePort set")
            .unwrap();
        assert!(!node_port.passed);
        assert_eq!(node_port.detail, "Not specified");

        // both port-level checks contribute nothing
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn test_missing_target_port_renders_null() {
        let outcome = evaluate_yaml(indoc! {"
            spec:
              ports:
                - port: 80
        "});
        let mapping = outcome
            .checks
            .iter()
            .find(|c| c.name == "Port mapping")
            .unwrap();
        assert_eq!(mapping.detail, "Expected 80→5000, got 80→null");
    }

    #[test]
    fn test_empty_ports_collapses_port_checks() {
        let outcome = evaluate_yaml(indoc! {"
            spec:
              type: NodePort
              selector:
                app: k8s-challenge
              ports: []
        "});
        assert_eq!(outcome.checks.len(), 3);
        assert_eq!(outcome.checks[2].name, "Ports defined");
        assert_eq!(outcome.checks[2].detail, "No ports configured");
        assert_eq!(outcome.points, 10);
    }

    #[test]
    fn test_string_target_port_is_not_numeric_match() {
        let outcome = evaluate_yaml(indoc! {"
            spec:
              ports:
                - port: 80
                  targetPort: \"5000\"
        "});
        let mapping = outcome
            .checks
            .iter()
            .find(|c| c.name == "Port mapping")
            .unwrap();
        assert!(!mapping.passed);
        assert_eq!(mapping.detail, "Expected 80→5000, got 80→5000");
    }

    #[test]
    fn test_node_port_pass_detail_shows_port() {
        let outcome = evaluate_yaml(COMPLETE);
        let node_port = outcome
            .checks
            .iter()
            .find(|c| c.name == "NodePort set")
            .unwrap();
        assert_eq!(node_port.detail, "Port 30080");
    }
}
