//! Manifest loading and the sentinel states the rubric grades against.

pub mod nav;

use log::debug;
use serde_yaml::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// A manifest as the rubric sees it: parsed, missing, or broken.
/// Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestSource {
    /// The file does not exist
    Absent,
    /// The file exists but could not be read or parsed; carries the
    /// parser's message verbatim
    Malformed(String),
    /// A parsed YAML document
    Parsed(Value),
}

impl ManifestSource {
    pub fn from_yaml_str(content: &str) -> Self {
        match serde_yaml::from_str::<Value>(content) {
            // An empty document grades the same as a missing file
            Ok(Value::Null) => ManifestSource::Absent,
            Ok(doc) => ManifestSource::Parsed(doc),
            Err(err) => ManifestSource::Malformed(err.to_string()),
        }
    }
}

/// Read and parse one manifest. Missing files and parse failures are
/// states, not errors; nothing here propagates to the caller.
pub fn load_manifest(path: &Path) -> ManifestSource {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("manifest not found: {}", path.display());
            return ManifestSource::Absent;
        }
        Err(err) => return ManifestSource::Malformed(err.to_string()),
    };

    ManifestSource::from_yaml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_absent() {
        let loaded = load_manifest(Path::new("/nonexistent/deployment.yaml"));
        assert_eq!(loaded, ManifestSource::Absent);
    }

    #[test]
    fn test_parse_failure_carries_message() {
        let loaded = ManifestSource::from_yaml_str("spec: [unclosed");
        match loaded {
            ManifestSource::Malformed(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_is_absent() {
        assert_eq!(ManifestSource::from_yaml_str(""), ManifestSource::Absent);
        assert_eq!(
            ManifestSource::from_yaml_str("# comments only\n"),
            ManifestSource::Absent
        );
    }

    #[test]
    fn test_valid_document_parses() {
        let loaded = ManifestSource::from_yaml_str("kind: Service\nspec:\n  type: NodePort\n");
        match loaded {
            ManifestSource::Parsed(doc) => {
                assert_eq!(nav::str_at(&doc, &["spec", "type"]), Some("NodePort"));
            }
            other => panic!("expected Parsed, got {:?}", other),
        }
    }
}
