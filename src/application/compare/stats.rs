use crate::domain::{DiffOp, DiffSegment};

/// Summary statistics over a raw diff.
///
/// Counts segments, not lines or characters: a segment spanning several
/// lines still counts once. Equal segments never contribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn from_segments(segments: &[DiffSegment]) -> Self {
        let mut stats = DiffStats::default();
        for segment in segments {
            match segment.op() {
                DiffOp::Insert => stats.additions += 1,
                DiffOp::Delete => stats.deletions += 1,
                DiffOp::Equal => {}
            }
        }
        stats
    }

    /// Total modification count. Always derived, never stored.
    pub fn total(&self) -> usize {
        self.additions + self.deletions
    }
}
