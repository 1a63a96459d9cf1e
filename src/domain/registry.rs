//! Ordered version registry owning the selection pair.

use log::debug;

use super::error::RegistryError;
use super::selection::{CompareBlocker, Selection, default_selection};
use super::version::{Version, VersionId};

/// Ordered list of uploaded versions plus the selected comparison pair.
///
/// Order is insertion order, which mirrors the service's list order. The
/// registry owns selection defaulting: every mutation that changes the
/// version count re-runs the defaulting policy over the new list.
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    versions: Vec<Version>,
    selection: Selection,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn get(&self, id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.filename == id)
    }

    /// 1-based position of `id`, for "V{n}" labels.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.versions
            .iter()
            .position(|v| v.filename == id)
            .map(|i| i + 1)
    }

    /// Looks up a version by 1-based position ("2") or by file name.
    pub fn resolve(&self, token: &str) -> Option<&Version> {
        if let Ok(position) = token.parse::<usize>() {
            return position.checked_sub(1).and_then(|i| self.versions.get(i));
        }
        self.get(token)
    }

    /// Appends a version. The filename must be new to the registry.
    pub fn insert(&mut self, version: Version) -> Result<(), RegistryError> {
        if self.get(&version.filename).is_some() {
            return Err(RegistryError::DuplicateVersion(version.filename));
        }
        let previous = self.versions.len();
        self.versions.push(version);
        self.apply_defaults(previous);
        Ok(())
    }

    /// Adopts the service's list wholesale, pruning stale selections first.
    pub fn replace_all(&mut self, versions: Vec<Version>) {
        let previous = self.versions.len();
        self.versions = versions;
        self.selection.retain_known(&self.versions);
        self.apply_defaults(previous);
    }

    /// Empties the list and the selection.
    pub fn clear(&mut self) {
        self.versions.clear();
        self.selection = Selection::default();
    }

    pub fn select_reference(&mut self, id: VersionId) -> Result<(), RegistryError> {
        if self.get(&id).is_none() {
            return Err(RegistryError::UnknownVersion(id));
        }
        self.selection.reference = Some(id);
        Ok(())
    }

    pub fn select_candidate(&mut self, id: VersionId) -> Result<(), RegistryError> {
        if self.get(&id).is_none() {
            return Err(RegistryError::UnknownVersion(id));
        }
        self.selection.candidate = Some(id);
        Ok(())
    }

    /// Why comparing is unavailable right now, if it is.
    pub fn compare_blocker(&self) -> Option<CompareBlocker> {
        self.selection.blocker()
    }

    fn apply_defaults(&mut self, previous_count: usize) {
        let next = default_selection(previous_count, &self.versions, &self.selection);
        if next != self.selection {
            debug!(
                "default selection applied: reference={:?} candidate={:?}",
                next.reference, next.candidate
            );
            self.selection = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(filename: &str) -> Version {
        Version {
            filename: filename.to_string(),
            path: format!("uploads/{filename}"),
            size: 2048,
            created: 1755936000.0,
            modified: 1755936000.0,
        }
    }

    #[test]
    fn test_insert_keeps_order_and_defaults_pair() {
        let mut registry = VersionRegistry::new();
        registry.insert(version("a.pdf")).unwrap();
        assert_eq!(registry.selection().reference.as_deref(), Some("a.pdf"));
        assert_eq!(registry.selection().candidate, None);

        registry.insert(version("b.pdf")).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.selection().reference.as_deref(), Some("a.pdf"));
        assert_eq!(registry.selection().candidate.as_deref(), Some("b.pdf"));

        registry.insert(version("c.pdf")).unwrap();
        assert_eq!(registry.selection().reference.as_deref(), Some("a.pdf"));
        assert_eq!(registry.selection().candidate.as_deref(), Some("b.pdf"));
        assert_eq!(registry.position_of("c.pdf"), Some(3));
    }

    #[test]
    fn test_duplicate_insert_is_a_conflict() {
        let mut registry = VersionRegistry::new();
        registry.insert(version("a.pdf")).unwrap();
        let err = registry.insert(version("a.pdf")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateVersion(name) if name == "a.pdf"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_replace_all_defaults_last_two() {
        let mut registry = VersionRegistry::new();
        registry.replace_all(vec![version("a.pdf"), version("b.pdf"), version("c.pdf")]);
        assert_eq!(registry.selection().reference.as_deref(), Some("b.pdf"));
        assert_eq!(registry.selection().candidate.as_deref(), Some("c.pdf"));
    }

    #[test]
    fn test_replace_all_prunes_stale_selection() {
        let mut registry = VersionRegistry::new();
        registry.replace_all(vec![version("a.pdf"), version("b.pdf")]);
        registry.select_candidate("b.pdf".to_string()).unwrap();

        registry.replace_all(vec![version("a.pdf"), version("c.pdf"), version("d.pdf")]);
        assert_eq!(registry.selection().reference.as_deref(), Some("a.pdf"));
        assert_eq!(registry.selection().candidate, None);
    }

    #[test]
    fn test_clear_empties_list_and_selection() {
        let mut registry = VersionRegistry::new();
        registry.replace_all(vec![version("a.pdf"), version("b.pdf")]);
        assert!(registry.compare_blocker().is_none());

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.selection(), &Selection::default());
        assert_eq!(
            registry.compare_blocker(),
            Some(CompareBlocker::Incomplete)
        );
    }

    #[test]
    fn test_resolve_by_position_or_name() {
        let mut registry = VersionRegistry::new();
        registry.replace_all(vec![version("a.pdf"), version("b.pdf")]);
        assert_eq!(
            registry.resolve("2").map(|v| v.filename.as_str()),
            Some("b.pdf")
        );
        assert_eq!(
            registry.resolve("a.pdf").map(|v| v.filename.as_str()),
            Some("a.pdf")
        );
        assert!(registry.resolve("0").is_none());
        assert!(registry.resolve("3").is_none());
        assert!(registry.resolve("z.pdf").is_none());
    }

    #[test]
    fn test_select_unknown_version_fails() {
        let mut registry = VersionRegistry::new();
        registry.insert(version("a.pdf")).unwrap();
        let err = registry.select_reference("nope.pdf".to_string()).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownVersion(name) if name == "nope.pdf"));
    }

    #[test]
    fn test_same_selection_blocks_compare() {
        let mut registry = VersionRegistry::new();
        registry.replace_all(vec![version("a.pdf"), version("b.pdf")]);
        registry.select_candidate("a.pdf".to_string()).unwrap();
        assert_eq!(
            registry.compare_blocker(),
            Some(CompareBlocker::SameVersion)
        );
    }
}
