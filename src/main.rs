//! DevisDiff entry point.
//!
//! Without a subcommand the binary opens the interactive shell. Subcommands
//! run a single operation against the comparison service and exit, which is
//! what scripts and CI want.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::error;

use devisdiff::application::compare::export::ComparisonExporter;
use devisdiff::domain::DiffResult;
use devisdiff::infra::app_config::{AppConfig, load_config, save_config};
use devisdiff::infra::service::{ComparisonService, HttpComparisonService};
use devisdiff::ui::app::{Action, CompareAction, DevisDiffApp, RegistryAction};
use devisdiff::ui::shell;

/// One-shot commands wait longer than the shell: there is no next prompt to
/// catch a late completion.
const CLI_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser, Debug)]
#[command(name = "devisdiff")]
#[command(version)]
#[command(about = "Suivi et comparaison de versions de documents", long_about = None)]
struct Args {
    /// URL du service de comparaison (prioritaire sur la configuration)
    #[arg(long)]
    service: Option<String>,

    /// Délai maximal des requêtes, en secondes
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Liste les versions connues du service
    Versions,

    /// Envoie une nouvelle version au service
    Ajouter {
        /// Fichier à envoyer
        fichier: PathBuf,
    },

    /// Compare deux versions déjà envoyées
    Comparer {
        /// Version de référence (numéro ou nom de fichier)
        v1: Option<String>,
        /// Version à comparer (numéro ou nom de fichier)
        v2: Option<String>,
        /// Écrit le rapport HTML dans ce dossier
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Compare deux fichiers locaux sans les conserver sur le service
    ComparerFichiers {
        fichier1: PathBuf,
        fichier2: PathBuf,
        /// Écrit le rapport HTML dans ce dossier
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Supprime toutes les versions du service
    Effacer {
        /// Confirme la suppression
        #[arg(long)]
        oui: bool,
    },

    /// Mémorise --service et --timeout dans le fichier de configuration
    Configurer,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Erreur : {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = load_config();
    if let Some(service) = args.service {
        config.service_url = Some(service);
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = Some(timeout);
    }

    let service: Arc<dyn ComparisonService> = Arc::new(HttpComparisonService::new(&config)?);

    match args.command {
        None => {
            let mut app = DevisDiffApp::new(service);
            shell::run(&mut app).await
        }
        Some(command) => run_command(service, &config, command).await,
    }
}

async fn run_command(
    service: Arc<dyn ComparisonService>,
    config: &AppConfig,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Versions => {
            let app = refreshed_app(service).await?;
            print!("{}", shell::timeline(&app.state.registry));
        }
        Commands::Ajouter { fichier } => {
            let mut app = DevisDiffApp::new(service);
            app.dispatch(Action::Registry(RegistryAction::Upload { path: fichier }));
            app.settle(CLI_GRACE).await;
            fail_on_banner(&app)?;
            println!("Version ajoutée.");
            print!("{}", shell::timeline(&app.state.registry));
        }
        Commands::Comparer { v1, v2, export } => {
            let mut app = refreshed_app(service).await?;
            if let Some(token) = v1 {
                select_version(&mut app, &token, true)?;
            }
            if let Some(token) = v2 {
                select_version(&mut app, &token, false)?;
            }
            if let Some(blocker) = app.state.registry.compare_blocker() {
                bail!("{}", shell::blocker_message(blocker));
            }

            app.dispatch(Action::Compare(CompareAction::Run));
            app.settle(CLI_GRACE).await;
            fail_on_banner(&app)?;
            let Some(diff) = &app.state.diff else {
                bail!("Une erreur inconnue est survenue");
            };
            print!("{}", shell::text_view(diff));
            write_report(diff, export.as_deref())?;
        }
        Commands::ComparerFichiers {
            fichier1,
            fichier2,
            export,
        } => {
            let diff = service
                .compare_files(&fichier1, &fichier2)
                .await
                .context("Erreur lors de la comparaison des fichiers")?;
            print!("{}", shell::text_view(&diff));
            write_report(&diff, export.as_deref())?;
        }
        Commands::Effacer { oui } => {
            if !oui {
                bail!("Suppression refusée : ajoutez --oui pour confirmer.");
            }
            let mut app = DevisDiffApp::new(service);
            app.dispatch(Action::Registry(RegistryAction::ResetRequested));
            app.dispatch(Action::Registry(RegistryAction::ResetConfirmed));
            app.settle(CLI_GRACE).await;
            fail_on_banner(&app)?;
            println!("Toutes les versions ont été supprimées.");
        }
        Commands::Configurer => {
            save_config(config).context("Impossible d'enregistrer la configuration")?;
            println!("Configuration enregistrée.");
        }
    }
    Ok(())
}

/// Builds the store and loads the version list before anything else runs.
async fn refreshed_app(service: Arc<dyn ComparisonService>) -> Result<DevisDiffApp> {
    let mut app = DevisDiffApp::new(service);
    app.dispatch(Action::Registry(RegistryAction::Refresh));
    app.settle(CLI_GRACE).await;
    fail_on_banner(&app)?;
    Ok(app)
}

fn select_version(app: &mut DevisDiffApp, token: &str, reference: bool) -> Result<()> {
    let Some(id) = app
        .state
        .registry
        .resolve(token)
        .map(|version| version.filename.clone())
    else {
        bail!("Version inconnue : {token}");
    };
    let action = if reference {
        RegistryAction::SelectReference(id)
    } else {
        RegistryAction::SelectCandidate(id)
    };
    app.dispatch(Action::Registry(action));
    Ok(())
}

fn write_report(diff: &DiffResult, dir: Option<&std::path::Path>) -> Result<()> {
    let Some(dir) = dir else {
        return Ok(());
    };
    let path = ComparisonExporter::export_to_html(diff)?.write_to(dir)?;
    println!("Rapport écrit dans {}", path.display());
    Ok(())
}

fn fail_on_banner(app: &DevisDiffApp) -> Result<()> {
    match app.state.phase.error_message() {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}
