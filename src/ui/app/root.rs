//! Root application struct.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::infra::service::ComparisonService;

use super::state::AppState;
use super::store::Action;

/// Root application for DevisDiff.
///
/// Owns the state, the comparison service handle and the action channel the
/// runtime tasks report back on. Frontends mutate everything through
/// [`DevisDiffApp::dispatch`].
pub struct DevisDiffApp {
    pub state: AppState,

    pub service: Arc<dyn ComparisonService>,

    pub action_tx: mpsc::Sender<Action>,
    pub action_rx: mpsc::Receiver<Action>,
}

impl DevisDiffApp {
    pub fn new(service: Arc<dyn ComparisonService>) -> Self {
        let (action_tx, action_rx) = mpsc::channel(32);
        Self {
            state: AppState::default(),
            service,
            action_tx,
            action_rx,
        }
    }
}
