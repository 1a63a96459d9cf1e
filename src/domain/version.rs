//! Version domain types.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Identifier of a version inside the registry.
///
/// The comparison service keys every uploaded revision by its filename, so
/// the filename doubles as the stable id on the client side.
pub type VersionId = String;

/// One uploaded revision of the tracked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Unique filename, assigned by the comparison service.
    pub filename: VersionId,
    /// Server-side storage path. Display only.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Unix timestamp in seconds of when the file landed on the server.
    pub created: f64,
    /// Unix timestamp in seconds of the last modification.
    pub modified: f64,
}

impl Version {
    /// Positional label ("V1", "V2", ...) for a 1-based position.
    pub fn position_label(position: usize) -> String {
        format!("V{position}")
    }

    /// Label shown in pickers and timelines: "V{n} - {filename}".
    pub fn display_label(&self, position: usize) -> String {
        format!("{} - {}", Self::position_label(position), self.filename)
    }

    /// Last modification as a local date-time, for timeline display.
    ///
    /// Returns `None` when the service reports a timestamp outside the
    /// representable range.
    pub fn modified_at(&self) -> Option<DateTime<Local>> {
        timestamp_from_secs(self.modified)
    }

    /// Creation time as a local date-time.
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        timestamp_from_secs(self.created)
    }
}

fn timestamp_from_secs(secs: f64) -> Option<DateTime<Local>> {
    if !secs.is_finite() {
        return None;
    }
    Local.timestamp_millis_opt((secs * 1000.0) as i64).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_deserializes_service_shape() {
        let json = r#"{
            "filename": "devis_v2.pdf",
            "path": "uploads/devis_v2.pdf",
            "size": 48213,
            "created": 1755936000.25,
            "modified": 1755939600.5
        }"#;

        let version: Version = serde_json::from_str(json).unwrap();
        assert_eq!(version.filename, "devis_v2.pdf");
        assert_eq!(version.size, 48213);
        assert!(version.modified_at().is_some());
    }

    #[test]
    fn test_display_label_is_positional() {
        let version = Version {
            filename: "devis_v1.pdf".to_string(),
            path: "uploads/devis_v1.pdf".to_string(),
            size: 1024,
            created: 1755936000.0,
            modified: 1755936000.0,
        };
        assert_eq!(version.display_label(1), "V1 - devis_v1.pdf");
        assert_eq!(Version::position_label(3), "V3");
    }

    #[test]
    fn test_non_finite_timestamp_is_rejected() {
        assert!(timestamp_from_secs(f64::NAN).is_none());
        assert!(timestamp_from_secs(1755936000.0).is_some());
    }
}
