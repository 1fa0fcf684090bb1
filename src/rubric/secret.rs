//! Secret rubric: naming, Opaque type, and a real base64-encoded
//! api-key in place of the scaffold placeholder. Worth 15 points.

use super::{parsed_or_gate, EvaluationOutcome, ManifestKind, ScoreCard};
use crate::manifest::nav;
use crate::manifest::ManifestSource;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_yaml::Value;

const EXPECTED_NAME: &str = "k8s-challenge-secrets";
const EXPECTED_TYPE: &str = "Opaque";
const API_KEY_PLACEHOLDER: &str = "REPLACE-WITH-BASE64-ENCODED-VALUE";

pub fn evaluate(source: &ManifestSource) -> EvaluationOutcome {
    let doc = match parsed_or_gate(ManifestKind::Secret, source) {
        Ok(doc) => doc,
        Err(outcome) => return outcome,
    };

    let mut card = ScoreCard::new();

    check_name(&mut card, doc);
    check_type(&mut card, doc);
    check_api_key(&mut card, doc);

    card.into_outcome(ManifestKind::Secret.max_points())
}

fn check_name(card: &mut ScoreCard, doc: &Value) {
    let name = nav::str_at(doc, &["metadata", "name"]).unwrap_or("");
    if name == EXPECTED_NAME {
        card.pass("Correct name", name, 3);
    } else {
        card.fail("Correct name", format!("Expected {EXPECTED_NAME}, got {name}"));
    }
}

fn check_type(card: &mut ScoreCard, doc: &Value) {
    let secret_type = nav::str_at(doc, &["type"]).unwrap_or("");
    if secret_type == EXPECTED_TYPE {
        card.pass("Type Opaque", "", 2);
    } else {
        card.fail("Type Opaque", format!("Got {secret_type}"));
    }
}

fn check_api_key(card: &mut ScoreCard, doc: &Value) {
    let api_key = nav::str_at(doc, &["data", "api-key"]).unwrap_or("");

    if api_key.is_empty() || api_key == API_KEY_PLACEHOLDER {
        card.fail("api-key (base64)", "Not set or still placeholder");
        return;
    }

    match decode_utf8(api_key) {
        Some(decoded) if !decoded.is_empty() => {
            let length = decoded.chars().count();
            card.pass("api-key (base64)", format!("Valid ({length} chars decoded)"), 10);
        }
        Some(_) => card.fail("api-key (base64)", "Empty value"),
        None => card.fail("api-key (base64)", "Invalid base64 encoding"),
    }
}

// Invalid UTF-8 after a clean base64 decode counts as an encoding
// failure, same as a bad alphabet or padding.
fn decode_utf8(encoded: &str) -> Option<String> {
    let bytes = STANDARD.decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}
