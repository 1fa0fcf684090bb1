//! ConfigMap rubric: naming, placeholder removal, and the three
//! required application keys. Worth 15 points.
//!
//! The key check awards literal partial credit of 3 points per key
//! found rather than scaling to the 10-point slot. That is the original
//! rubric's formula, preserved as-is.

use super::{parsed_or_gate, EvaluationOutcome, ManifestKind, ScoreCard};
use crate::manifest::nav;
use crate::manifest::ManifestSource;
use serde_yaml::Value;

const EXPECTED_NAME: &str = "k8s-challenge-config";
const PLACEHOLDER_KEY: &str = "PLACEHOLDER";
const REQUIRED_KEYS: [&str; 3] = ["FLASK_ENV", "LOG_LEVEL", "APP_NAME"];
const POINTS_PER_KEY: u32 = 3;

pub fn evaluate(source: &ManifestSource) -> EvaluationOutcome {
    let doc = match parsed_or_gate(ManifestKind::ConfigMap, source) {
        Ok(doc) => doc,
        Err(outcome) => return outcome,
    };

    let mut card = ScoreCard::new();

    check_name(&mut card, doc);
    check_placeholder_removed(&mut card, doc);
    check_required_keys(&mut card, doc);

    card.into_outcome(ManifestKind::ConfigMap.max_points())
}

fn check_name(card: &mut ScoreCard, doc: &Value) {
    let name = nav::str_at(doc, &["metadata", "name"]).unwrap_or("");
    if name == EXPECTED_NAME {
        card.pass("Correct name", name, 3);
    } else {
        card.fail("Correct name", format!("Expected {EXPECTED_NAME}, got {name}"));
    }
}

// Only the failing side of this rule is presented; a clean data mapping
// earns its points silently.
fn check_placeholder_removed(card: &mut ScoreCard, doc: &Value) {
    if nav::at(doc, &["data", PLACEHOLDER_KEY]).is_some() {
        card.fail("Remove placeholder", "PLACEHOLDER key still present");
    } else {
        card.award(2);
    }
}

fn check_required_keys(card: &mut ScoreCard, doc: &Value) {
    let found: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| nav::at(doc, &["data", key]).is_some())
        .collect();

    if found.len() == REQUIRED_KEYS.len() {
        card.pass("All config keys", found.join(", "), 10);
    } else {
        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !found.contains(key))
            .collect();
        card.fail(
            "All config keys",
            format!("Missing: {}", missing.join(", ")),
        );
        card.award(found.len() as u32 * POINTS_PER_KEY);
    }
}
