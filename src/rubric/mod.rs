//! The fixed grading rubric: one evaluator per manifest kind.
//!
//! Evaluators are pure functions from a [`ManifestSource`] to an
//! [`EvaluationOutcome`]. They never error; malformed or missing data
//! fails individual checks instead.

pub mod configmap;
pub mod deployment;
pub mod secret;
pub mod service;

use crate::manifest::ManifestSource;
use serde::{Deserialize, Serialize};

/// One named rubric check with its verdict. Order of production is the
/// rubric's presentation order and is preserved everywhere downstream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: detail.into(),
        }
    }
}

/// The scored result of running one kind's rubric.
/// Invariant: `points <= max_points`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationOutcome {
    pub checks: Vec<CheckResult>,
    pub points: u32,
    pub max_points: u32,
}

impl EvaluationOutcome {
    pub fn is_perfect(&self) -> bool {
        self.points == self.max_points
    }
}

/// The four graded manifest kinds, in rubric order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    Deployment,
    Service,
    ConfigMap,
    Secret,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 4] = [
        ManifestKind::Deployment,
        ManifestKind::Service,
        ManifestKind::ConfigMap,
        ManifestKind::Secret,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ManifestKind::Deployment => "Deployment",
            ManifestKind::Service => "Service",
            ManifestKind::ConfigMap => "ConfigMap",
            ManifestKind::Secret => "Secret",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ManifestKind::Deployment => "deployment.yaml",
            ManifestKind::Service => "service.yaml",
            ManifestKind::ConfigMap => "configmap.yaml",
            ManifestKind::Secret => "secret.yaml",
        }
    }

    pub fn max_points(&self) -> u32 {
        match self {
            ManifestKind::Deployment => 25,
            ManifestKind::Service => 20,
            ManifestKind::ConfigMap => 15,
            ManifestKind::Secret => 15,
        }
    }

    /// Run this kind's rubric over a loaded manifest.
    pub fn evaluate(&self, source: &ManifestSource) -> EvaluationOutcome {
        match self {
            ManifestKind::Deployment => deployment::evaluate(source),
            ManifestKind::Service => service::evaluate(source),
            ManifestKind::ConfigMap => configmap::evaluate(source),
            ManifestKind::Secret => secret::evaluate(source),
        }
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accumulates checks and points while a rubric runs.
pub(crate) struct ScoreCard {
    checks: Vec<CheckResult>,
    points: u32,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            points: 0,
        }
    }

    pub fn pass(&mut self, name: &str, detail: impl Into<String>, points: u32) {
        self.checks.push(CheckResult::pass(name, detail));
        self.points += points;
    }

    pub fn fail(&mut self, name: &str, detail: impl Into<String>) {
        self.checks.push(CheckResult::fail(name, detail));
    }

    /// Award points with no accompanying check line. The rubric uses
    /// this where only the failing side of a rule is presented.
    pub fn award(&mut self, points: u32) {
        self.points += points;
    }

    pub fn into_outcome(self, max_points: u32) -> EvaluationOutcome {
        debug_assert!(self.points <= max_points);
        EvaluationOutcome {
            checks: self.checks,
            points: self.points.min(max_points),
            max_points,
        }
    }
}

/// Common gate shared by every evaluator: Absent and Malformed collapse
/// to a single failing check worth zero points. Returns the parsed
/// document otherwise.
pub(crate) fn parsed_or_gate(
    kind: ManifestKind,
    source: &ManifestSource,
) -> Result<&serde_yaml::Value, EvaluationOutcome> {
    match source {
        ManifestSource::Absent => Err(EvaluationOutcome {
            checks: vec![CheckResult::fail(
                format!("{} file exists", kind.display_name()),
                "File not found",
            )],
            points: 0,
            max_points: kind.max_points(),
        }),
        ManifestSource::Malformed(message) => Err(EvaluationOutcome {
            checks: vec![CheckResult::fail("Valid YAML", message.clone())],
            points: 0,
            max_points: kind.max_points(),
        }),
        ManifestSource::Parsed(doc) => Ok(doc),
    }
}
