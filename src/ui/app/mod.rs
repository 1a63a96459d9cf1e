//! Application state and orchestration for DevisDiff.
//!
//! This module contains the store (actions, reducer, async runtime), the
//! application state and the polling helpers frontends drive.

mod polling;
mod root;
mod state;
mod store;

pub use root::DevisDiffApp;
pub use state::{AppState, Phase, ViewMode};
pub use store::{Action, AsyncAction, CompareAction, RegistryAction, ViewAction};
