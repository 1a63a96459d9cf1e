use log::{debug, warn};

use super::super::state::{AppState, Phase};
use super::action::{Action, AsyncAction, CompareAction, RegistryAction, ViewAction};
use super::command::Command;
use crate::application::compare::pages::ZoomLevel;

pub fn reduce(state: &mut AppState, action: Action) -> Vec<Command> {
    match action {
        Action::Registry(action) => reduce_registry(state, action),
        Action::Compare(action) => reduce_compare(state, action),
        Action::View(action) => reduce_view(state, action),
        Action::Async(action) => reduce_async(state, action),
    }
}

fn reduce_registry(state: &mut AppState, action: RegistryAction) -> Vec<Command> {
    match action {
        RegistryAction::Upload { path } => {
            if state.phase.is_busy() {
                warn!("upload rejected: an operation is already running");
                return Vec::new();
            }
            state.pending_reset = false;
            state.phase = Phase::Uploading;
            vec![Command::UploadFile { path }]
        }

        RegistryAction::Refresh => vec![Command::FetchVersions],

        RegistryAction::SelectReference(id) => {
            if let Err(e) = state.registry.select_reference(id) {
                warn!("selection ignored: {e}");
            }
            Vec::new()
        }

        RegistryAction::SelectCandidate(id) => {
            if let Err(e) = state.registry.select_candidate(id) {
                warn!("selection ignored: {e}");
            }
            Vec::new()
        }

        RegistryAction::ResetRequested => {
            if state.phase != Phase::Idle {
                warn!("reset is only available while idle");
                return Vec::new();
            }
            state.pending_reset = true;
            Vec::new()
        }

        RegistryAction::ResetConfirmed => {
            if !state.pending_reset {
                return Vec::new();
            }
            state.pending_reset = false;
            vec![Command::ResetService]
        }

        RegistryAction::ResetCancelled => {
            state.pending_reset = false;
            Vec::new()
        }
    }
}

fn reduce_compare(state: &mut AppState, action: CompareAction) -> Vec<Command> {
    match action {
        CompareAction::Run => {
            // A running compare may be superseded; a running upload may not.
            if state.phase == Phase::Uploading {
                warn!("comparison rejected: an upload is running");
                return Vec::new();
            }
            if let Some(blocker) = state.registry.compare_blocker() {
                debug!("comparison blocked: {blocker:?}");
                return Vec::new();
            }
            let selection = state.registry.selection().clone();
            let (Some(reference), Some(candidate)) = (selection.reference, selection.candidate)
            else {
                return Vec::new();
            };

            state.pending_reset = false;
            state.phase = Phase::Comparing;
            state.compare_token += 1;
            vec![Command::CompareVersions {
                reference,
                candidate,
                token: state.compare_token,
            }]
        }

        CompareAction::DismissError => {
            if matches!(state.phase, Phase::Error(_)) {
                state.phase = Phase::Idle;
            }
            Vec::new()
        }
    }
}

fn reduce_view(state: &mut AppState, action: ViewAction) -> Vec<Command> {
    match action {
        ViewAction::SetMode(mode) => {
            state.view_mode = mode;
        }
        ViewAction::ZoomIn => {
            state.zoom = state.zoom.zoom_in();
        }
        ViewAction::ZoomOut => {
            state.zoom = state.zoom.zoom_out();
        }
    }
    Vec::new()
}

fn reduce_async(state: &mut AppState, action: AsyncAction) -> Vec<Command> {
    match action {
        AsyncAction::UploadFinished(Ok(())) => {
            state.phase = Phase::Idle;
            vec![Command::FetchVersions]
        }

        AsyncAction::UploadFinished(Err(message)) => {
            // the previously displayed comparison stays on screen
            state.phase = Phase::Error(message);
            Vec::new()
        }

        AsyncAction::VersionsLoaded(Ok(versions)) => {
            state.registry.replace_all(versions);
            if let Some(diff) = &state.diff {
                let both_known = state.registry.get(&diff.filename1).is_some()
                    && state.registry.get(&diff.filename2).is_some();
                if !both_known {
                    debug!("dropping stale comparison after registry refresh");
                    state.diff = None;
                }
            }
            Vec::new()
        }

        AsyncAction::VersionsLoaded(Err(message)) => {
            state.phase = Phase::Error(message);
            Vec::new()
        }

        AsyncAction::CompareFinished { token, result } => {
            if token != state.compare_token {
                debug!("discarding stale comparison result (token {token})");
                return Vec::new();
            }
            match result {
                Ok(diff) => {
                    state.phase = Phase::Idle;
                    state.diff = Some(*diff);
                    state.zoom = ZoomLevel::default();
                }
                Err(message) => {
                    state.phase = Phase::Error(message);
                    state.diff = None;
                }
            }
            Vec::new()
        }

        AsyncAction::ResetFinished(Ok(())) => {
            state.registry.clear();
            state.diff = None;
            state.phase = Phase::Idle;
            Vec::new()
        }

        AsyncAction::ResetFinished(Err(message)) => {
            state.phase = Phase::Error(message);
            Vec::new()
        }
    }
}
