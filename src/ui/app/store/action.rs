use std::path::PathBuf;

use crate::domain::{DiffResult, Version, VersionId};
use crate::ui::app::state::ViewMode;

#[derive(Debug)]
pub enum Action {
    Registry(RegistryAction),
    Compare(CompareAction),
    View(ViewAction),
    Async(AsyncAction),
}

/// Intents that touch the version list or its selection.
#[derive(Debug)]
pub enum RegistryAction {
    Upload { path: PathBuf },
    Refresh,
    SelectReference(VersionId),
    SelectCandidate(VersionId),
    ResetRequested,
    ResetConfirmed,
    ResetCancelled,
}

#[derive(Debug)]
pub enum CompareAction {
    Run,
    DismissError,
}

#[derive(Debug)]
pub enum ViewAction {
    SetMode(ViewMode),
    ZoomIn,
    ZoomOut,
}

/// Results coming back from the service tasks.
#[derive(Debug)]
pub enum AsyncAction {
    UploadFinished(Result<(), String>),
    VersionsLoaded(Result<Vec<Version>, String>),
    CompareFinished {
        token: u64,
        result: Result<Box<DiffResult>, String>,
    },
    ResetFinished(Result<(), String>),
}
