//! Side-effect execution: service calls on tokio tasks.
//!
//! Each command spawns one task; the outcome comes back over the action
//! channel as an `Action::Async`. Failures carry the localized banner
//! message, the technical detail goes to the log.

use std::path::PathBuf;

use log::error;

use super::super::DevisDiffApp;
use super::action::{Action, AsyncAction};
use super::command::Command;
use crate::domain::VersionId;

pub fn run(app: &mut DevisDiffApp, command: Command) {
    match command {
        Command::UploadFile { path } => upload_file(app, path),
        Command::FetchVersions => fetch_versions(app),
        Command::CompareVersions {
            reference,
            candidate,
            token,
        } => compare_versions(app, reference, candidate, token),
        Command::ResetService => reset_service(app),
    }
}

fn upload_file(app: &mut DevisDiffApp, path: PathBuf) {
    let service = app.service.clone();
    let action_tx = app.action_tx.clone();

    tokio::spawn(async move {
        let result = service.upload(&path).await.map_err(|e| {
            error!("upload of {} failed: {e}", path.display());
            "Erreur lors de l'envoi du fichier".to_string()
        });
        let _ = action_tx
            .send(Action::Async(AsyncAction::UploadFinished(result)))
            .await;
    });
}

fn fetch_versions(app: &mut DevisDiffApp) {
    let service = app.service.clone();
    let action_tx = app.action_tx.clone();

    tokio::spawn(async move {
        let result = service.versions().await.map_err(|e| {
            error!("version list fetch failed: {e}");
            "Erreur lors du chargement des versions".to_string()
        });
        let _ = action_tx
            .send(Action::Async(AsyncAction::VersionsLoaded(result)))
            .await;
    });
}

fn compare_versions(app: &mut DevisDiffApp, reference: VersionId, candidate: VersionId, token: u64) {
    let service = app.service.clone();
    let action_tx = app.action_tx.clone();

    tokio::spawn(async move {
        let result = service
            .compare(&reference, &candidate)
            .await
            .map(Box::new)
            .map_err(|e| {
                error!("comparison of {reference} and {candidate} failed: {e}");
                "Erreur lors de la comparaison des fichiers".to_string()
            });
        let _ = action_tx
            .send(Action::Async(AsyncAction::CompareFinished { token, result }))
            .await;
    });
}

fn reset_service(app: &mut DevisDiffApp) {
    let service = app.service.clone();
    let action_tx = app.action_tx.clone();

    tokio::spawn(async move {
        let result = service.reset().await.map_err(|e| {
            error!("reset failed: {e}");
            "Erreur lors de la réinitialisation".to_string()
        });
        let _ = action_tx
            .send(Action::Async(AsyncAction::ResetFinished(result)))
            .await;
    });
}
