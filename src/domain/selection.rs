//! Selection pair over the registry and its defaulting policy.

use serde::{Deserialize, Serialize};

use super::version::{Version, VersionId};

/// The pair of versions a comparison runs over.
///
/// `reference` is the left side (V1), `candidate` the right side (V2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub reference: Option<VersionId>,
    pub candidate: Option<VersionId>,
}

impl Selection {
    /// Both slots set and pointing at distinct versions.
    pub fn is_comparable(&self) -> bool {
        self.blocker().is_none()
    }

    /// Why a comparison cannot run right now, if it cannot.
    pub fn blocker(&self) -> Option<CompareBlocker> {
        match (&self.reference, &self.candidate) {
            (Some(reference), Some(candidate)) if reference == candidate => {
                Some(CompareBlocker::SameVersion)
            }
            (Some(_), Some(_)) => None,
            _ => Some(CompareBlocker::Incomplete),
        }
    }

    /// Drops any selected id that is not present in `versions`.
    pub fn retain_known(&mut self, versions: &[Version]) {
        let known = |id: &VersionId| versions.iter().any(|v| &v.filename == id);
        if self.reference.as_ref().is_some_and(|id| !known(id)) {
            self.reference = None;
        }
        if self.candidate.as_ref().is_some_and(|id| !known(id)) {
            self.candidate = None;
        }
    }
}

/// Reason the compare action is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareBlocker {
    /// One or both slots are unset.
    Incomplete,
    /// Both slots point at the same version.
    SameVersion,
}

/// Computes the selection after the registry's version count changed.
///
/// Fires only on a count change and only fills unset slots:
/// - crossing from fewer than two versions to two or more, the reference
///   defaults to the second-to-last version and the candidate to the last;
/// - reaching exactly one version, the reference defaults to that version.
///
/// Slots already set are never overwritten, and a mutation that leaves the
/// count unchanged never re-triggers the defaults.
pub fn default_selection(
    previous_count: usize,
    versions: &[Version],
    current: &Selection,
) -> Selection {
    let mut next = current.clone();
    if previous_count == versions.len() {
        return next;
    }
    if previous_count < 2 && versions.len() >= 2 {
        if next.reference.is_none() {
            next.reference = Some(versions[versions.len() - 2].filename.clone());
        }
        if next.candidate.is_none() {
            next.candidate = Some(versions[versions.len() - 1].filename.clone());
        }
    } else if versions.len() == 1 && next.reference.is_none() {
        next.reference = Some(versions[0].filename.clone());
    }
    next
}
