//! Aggregates the four rubric outcomes into a scored report.
//!
//! Evaluation order is fixed: Deployment, Service, ConfigMap, Secret.
//! This module owns summation and presentation data only; all grading
//! logic lives in [`crate::rubric`].

use crate::manifest::{load_manifest, ManifestSource};
use crate::rubric::{EvaluationOutcome, ManifestKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TOTAL_MAX_POINTS: u32 = 75;
pub const BAR_CELLS: u32 = 20;

/// One graded manifest within a report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestScore {
    pub kind: ManifestKind,
    pub display_name: String,
    pub file: String,
    pub outcome: EvaluationOutcome,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub scores: Vec<ManifestScore>,
    pub total_points: u32,
    pub total_max: u32,
    pub percent: u32,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_percent(self.percent)
    }

    /// CI wrappers gating on completeness should treat this as success.
    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

/// Human-readable score tier.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Complete,
    AlmostThere,
    KeepGoing,
}

impl Verdict {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            100.. => Verdict::Complete,
            80..=99 => Verdict::AlmostThere,
            _ => Verdict::KeepGoing,
        }
    }
}

/// Grade every manifest in `manifest_dir`, in rubric order.
pub fn build_report(manifest_dir: &Path) -> Report {
    let sources = ManifestKind::ALL
        .iter()
        .map(|kind| (*kind, load_manifest(&manifest_dir.join(kind.file_name()))));
    grade(sources)
}

/// Aggregation over already-loaded manifests. Split out so tests can
/// grade in-memory sources without a filesystem.
pub fn grade(sources: impl IntoIterator<Item = (ManifestKind, ManifestSource)>) -> Report {
    let scores: Vec<ManifestScore> = sources
        .into_iter()
        .map(|(kind, source)| ManifestScore {
            kind,
            display_name: kind.display_name().to_string(),
            file: kind.file_name().to_string(),
            outcome: kind.evaluate(&source),
        })
        .collect();

    let total_points = scores.iter().map(|s| s.outcome.points).sum();
    let total_max = scores.iter().map(|s| s.outcome.max_points).sum();

    Report {
        scores,
        total_points,
        total_max,
        percent: percent(total_points, total_max),
        generated_at: Utc::now(),
    }
}

/// Floored integer percentage; zero when there is nothing to score.
pub fn percent(points: u32, max: u32) -> u32 {
    if max == 0 {
        0
    } else {
        points * 100 / max
    }
}

/// Filled and empty cell counts for the 20-cell score bar.
pub fn bar_fill(percent: u32) -> (u32, u32) {
    let filled = (percent / 5).min(BAR_CELLS);
    (filled, BAR_CELLS - filled)
}
