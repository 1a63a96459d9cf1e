//! Diff result model, mirroring the comparison service's wire format.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::version::VersionId;

/// Diff opcode attached to every raw segment.
///
/// Wire values follow the diff-match-patch convention: -1 delete, 0 equal,
/// 1 insert. Any other opcode is a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    Delete,
    Equal,
    Insert,
}

impl DiffOp {
    pub fn code(self) -> i8 {
        match self {
            DiffOp::Delete => -1,
            DiffOp::Equal => 0,
            DiffOp::Insert => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(DiffOp::Delete),
            0 => Some(DiffOp::Equal),
            1 => Some(DiffOp::Insert),
            _ => None,
        }
    }
}

impl Serialize for DiffOp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(self.code())
    }
}

impl<'de> Deserialize<'de> for DiffOp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = i64::deserialize(deserializer)?;
        DiffOp::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown diff opcode: {code}")))
    }
}

/// One segment of the raw diff: an opcode and the affected text.
///
/// Serialized as the two-element array `[op, text]` the service emits.
/// Segments are text runs, not lines; a multi-line insertion is one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSegment(pub DiffOp, pub String);

impl DiffSegment {
    pub fn op(&self) -> DiffOp {
        self.0
    }

    pub fn text(&self) -> &str {
        &self.1
    }
}

/// Base64-encoded PNG payload for one side of a page row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageImage(String);

impl PageImage {
    pub fn new(base64: impl Into<String>) -> Self {
        Self(base64.into())
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// Decodes the payload into raw PNG bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.0.as_bytes())
    }

    /// Pixel dimensions of the decoded image, when it parses as one.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let bytes = self.decode().ok()?;
        let img = image::load_from_memory(&bytes).ok()?;
        Some((img.width(), img.height()))
    }
}

/// Annotated images for one page of the compared documents.
///
/// At least one side is expected to be present; a page missing from the
/// candidate carries only `img1`, a page added in the candidate only `img2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDiff {
    /// 1-based page number as reported by the service.
    pub page: u32,
    /// Reference side with deletions boxed in red.
    pub img1: Option<PageImage>,
    /// Candidate side with insertions boxed in green.
    pub img2: Option<PageImage>,
}

/// Complete result of one comparison.
///
/// The client never edits a result in place: a new comparison replaces the
/// whole value and a failed comparison clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Service-rendered HTML view of the text diff. Passed through verbatim,
    /// never re-escaped or re-diffed.
    pub html_diff: String,
    /// Raw diff segments, in service order.
    pub raw_diff: Vec<DiffSegment>,
    /// Annotated page images, in service order.
    pub visual_diff: Vec<PageDiff>,
    /// Filename of the reference (left) version.
    pub filename1: VersionId,
    /// Filename of the candidate (right) version.
    pub filename2: VersionId,
}

impl DiffResult {
    /// True when the result involves `filename` on either side.
    pub fn references(&self, filename: &str) -> bool {
        self.filename1 == filename || self.filename2 == filename
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_op_codes_round_trip() {
        assert_eq!(DiffOp::from_code(-1), Some(DiffOp::Delete));
        assert_eq!(DiffOp::from_code(0), Some(DiffOp::Equal));
        assert_eq!(DiffOp::from_code(1), Some(DiffOp::Insert));
        assert_eq!(DiffOp::from_code(2), None);
        assert_eq!(DiffOp::Insert.code(), 1);
    }

    #[test]
    fn test_segment_deserializes_as_pair() {
        let segment: DiffSegment = serde_json::from_str(r#"[-1, "ancien tarif"]"#).unwrap();
        assert_eq!(segment.op(), DiffOp::Delete);
        assert_eq!(segment.text(), "ancien tarif");
    }

    #[test]
    fn test_segment_rejects_unknown_opcode() {
        let result: Result<DiffSegment, _> = serde_json::from_str(r#"[2, "x"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_diff_result_deserializes_service_shape() {
        let json = r#"{
            "html_diff": "<span>diff</span>",
            "raw_diff": [[0, "Devis "], [1, "2024"], [-1, "2023"]],
            "visual_diff": [
                {"page": 1, "img1": "aGVsbG8=", "img2": "d29ybGQ="},
                {"page": 3, "img1": null, "img2": "d29ybGQ="}
            ],
            "filename1": "devis_v1.pdf",
            "filename2": "devis_v2.pdf"
        }"#;

        let result: DiffResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.raw_diff.len(), 3);
        assert_eq!(result.raw_diff[1].op(), DiffOp::Insert);
        assert_eq!(result.visual_diff.len(), 2);
        assert!(result.visual_diff[1].img1.is_none());
        assert!(result.references("devis_v1.pdf"));
        assert!(!result.references("devis_v3.pdf"));
    }

    #[test]
    fn test_page_image_decodes_base64() {
        let image = PageImage::new("aGVsbG8=");
        assert_eq!(image.decode().unwrap(), b"hello");
        assert!(PageImage::new("not base64!!").decode().is_err());
    }
}
