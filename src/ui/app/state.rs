use crate::application::compare::pages::ZoomLevel;
use crate::domain::{DiffResult, VersionRegistry};

/// Lifecycle of the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Comparing,
    /// A failed operation, carrying the localized banner message. The banner
    /// is dismissible and new operations may start from here.
    Error(String),
}

impl Phase {
    /// True while a mutating request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Uploading | Phase::Comparing)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Which diff presentation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    Text,
    #[default]
    Visual,
}

/// All app state in one struct.
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: Phase,
    pub registry: VersionRegistry,
    /// Latest adopted comparison. Replaced wholesale, never patched.
    pub diff: Option<DiffResult>,
    pub view_mode: ViewMode,
    pub zoom: ZoomLevel,
    /// Reset armed, awaiting explicit confirmation.
    pub pending_reset: bool,
    /// Token of the most recently issued compare. Completions carrying an
    /// older token are stale and must be discarded.
    pub compare_token: u64,
}
