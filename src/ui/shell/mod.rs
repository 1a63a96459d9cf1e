//! Interactive console over the application store.
//!
//! Each input line is parsed into a [`ShellCommand`], dispatched as store
//! actions, and the shell then settles pending async work before rendering.
//! All user-facing text is French; see [`command`] for the grammar.

mod command;
mod render;

pub use command::ShellCommand;
pub use render::{blocker_message, text_view, timeline, visual_view};

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::compare::export::ComparisonExporter;
use crate::ui::app::{
    Action, CompareAction, DevisDiffApp, RegistryAction, ViewAction, ViewMode,
};

/// How long to keep waiting for trailing completions once the store is no
/// longer busy. Busy phases wait for their completion regardless.
const SETTLE_GRACE: Duration = Duration::from_millis(600);

pub async fn run(app: &mut DevisDiffApp) -> Result<()> {
    println!("DevisDiff : suivi et comparaison de versions de documents");
    println!("Tapez « aide » pour la liste des commandes.\n");

    app.dispatch(Action::Registry(RegistryAction::Refresh));
    app.settle(SETTLE_GRACE).await;
    print!("{}", render::timeline(&app.state.registry));
    print_banner(app);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        if app.pump() {
            print_banner(app);
        }
        if app.state.pending_reset {
            print!("Confirmer la suppression de toutes les versions ? (oui/non) ");
        } else {
            print!("devisdiff> ");
        }
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if app.state.pending_reset {
            confirm_reset(app, &line).await;
            continue;
        }

        let parsed = match command::parse(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if parsed == ShellCommand::Quitter {
            break;
        }
        execute(app, parsed).await?;
    }

    Ok(())
}

async fn execute(app: &mut DevisDiffApp, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::Aide => println!("{}", render::help()),
        ShellCommand::Versions => {
            app.dispatch(Action::Registry(RegistryAction::Refresh));
            app.settle(SETTLE_GRACE).await;
            print!("{}", render::timeline(&app.state.registry));
            print_banner(app);
        }
        ShellCommand::Ajouter(path) => {
            if !path.exists() {
                println!("Fichier introuvable : {}", path.display());
                return Ok(());
            }
            println!("Envoi du fichier...");
            app.dispatch(Action::Registry(RegistryAction::Upload { path }));
            app.settle(SETTLE_GRACE).await;
            if app.state.phase.error_message().is_none() {
                println!("Version ajoutée.");
                print!("{}", render::timeline(&app.state.registry));
            }
            print_banner(app);
        }
        ShellCommand::Reference(token) => select(app, &token, true),
        ShellCommand::Candidate(token) => select(app, &token, false),
        ShellCommand::Comparer => {
            if let Some(blocker) = app.state.registry.compare_blocker() {
                println!("{}", render::blocker_message(blocker));
                return Ok(());
            }
            println!("Comparaison en cours...");
            app.dispatch(Action::Compare(CompareAction::Run));
            app.settle(SETTLE_GRACE).await;
            if app.state.phase.error_message().is_none() {
                print_active_view(app);
            }
            print_banner(app);
        }
        ShellCommand::Vue(mode) => {
            app.dispatch(Action::View(ViewAction::SetMode(mode)));
            print_active_view(app);
        }
        ShellCommand::ZoomIn => {
            app.dispatch(Action::View(ViewAction::ZoomIn));
            println!("Zoom : {}", app.state.zoom);
        }
        ShellCommand::ZoomOut => {
            app.dispatch(Action::View(ViewAction::ZoomOut));
            println!("Zoom : {}", app.state.zoom);
        }
        ShellCommand::Exporter(dir) => {
            let Some(diff) = &app.state.diff else {
                println!("Aucune comparaison à exporter. Lancez « comparer » d'abord.");
                return Ok(());
            };
            match ComparisonExporter::export_to_html(diff)
                .and_then(|result| result.write_to(&dir))
            {
                Ok(path) => println!("Rapport écrit dans {}", path.display()),
                Err(error) => println!("Erreur : {error:#}"),
            }
        }
        ShellCommand::Effacer => {
            app.dispatch(Action::Registry(RegistryAction::ResetRequested));
            if !app.state.pending_reset {
                println!("Impossible d'effacer pendant une opération en cours.");
            }
        }
        ShellCommand::Fermer => {
            if app.state.phase.error_message().is_some() {
                app.dispatch(Action::Compare(CompareAction::DismissError));
            } else {
                println!("Aucune erreur à masquer.");
            }
        }
        // handled by the caller before execute()
        ShellCommand::Quitter => {}
    }
    Ok(())
}

async fn confirm_reset(app: &mut DevisDiffApp, line: &str) {
    let answer = line.trim().to_lowercase();
    if answer == "oui" || answer == "o" {
        app.dispatch(Action::Registry(RegistryAction::ResetConfirmed));
        app.settle(SETTLE_GRACE).await;
        if app.state.phase.error_message().is_none() {
            println!("Toutes les versions ont été supprimées.");
        }
        print_banner(app);
    } else {
        app.dispatch(Action::Registry(RegistryAction::ResetCancelled));
        println!("Réinitialisation annulée.");
    }
}

/// Resolves `v1 <arg>` / `v2 <arg>`: a 1-based position or a file name.
fn select(app: &mut DevisDiffApp, token: &str, reference: bool) {
    let resolved = app
        .state
        .registry
        .resolve(token)
        .map(|version| version.filename.clone());
    let Some(id) = resolved else {
        println!("Version inconnue : {token}");
        return;
    };
    let action = if reference {
        RegistryAction::SelectReference(id)
    } else {
        RegistryAction::SelectCandidate(id)
    };
    app.dispatch(Action::Registry(action));
    print!("{}", render::timeline(&app.state.registry));
}

fn print_active_view(app: &DevisDiffApp) {
    let Some(diff) = &app.state.diff else {
        println!("Aucune comparaison disponible.");
        return;
    };
    match app.state.view_mode {
        ViewMode::Text => print!("{}", render::text_view(diff)),
        ViewMode::Visual => print!("{}", render::visual_view(diff, app.state.zoom)),
    }
}

fn print_banner(app: &DevisDiffApp) {
    if let Some(message) = app.state.phase.error_message() {
        println!("Erreur : {message} (tapez « fermer » pour masquer)");
    }
}
