//! Command grammar of the interactive shell.

use std::path::PathBuf;

use crate::ui::app::ViewMode;

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Aide,
    Versions,
    Ajouter(PathBuf),
    Reference(String),
    Candidate(String),
    Comparer,
    Vue(ViewMode),
    ZoomIn,
    ZoomOut,
    Exporter(PathBuf),
    Effacer,
    Fermer,
    Quitter,
}

/// Parses one input line. Empty lines parse to `None`; errors carry the
/// French usage message to print.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut tokens = line.split_whitespace();
    let Some(word) = tokens.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = tokens.collect();

    let command = match word {
        "aide" | "?" => ShellCommand::Aide,
        "versions" => ShellCommand::Versions,
        "ajouter" => ShellCommand::Ajouter(PathBuf::from(joined(&rest, "ajouter <fichier>")?)),
        "v1" => ShellCommand::Reference(joined(&rest, "v1 <numéro|fichier>")?),
        "v2" => ShellCommand::Candidate(joined(&rest, "v2 <numéro|fichier>")?),
        "comparer" => ShellCommand::Comparer,
        "vue" => match rest.as_slice() {
            ["texte"] => ShellCommand::Vue(ViewMode::Text),
            ["visuelle"] => ShellCommand::Vue(ViewMode::Visual),
            _ => return Err("Usage : vue texte|visuelle".to_string()),
        },
        "zoom" => match rest.as_slice() {
            ["+"] => ShellCommand::ZoomIn,
            ["-"] => ShellCommand::ZoomOut,
            _ => return Err("Usage : zoom +|-".to_string()),
        },
        "exporter" => ShellCommand::Exporter(PathBuf::from(joined(&rest, "exporter <dossier>")?)),
        "effacer" => ShellCommand::Effacer,
        "fermer" => ShellCommand::Fermer,
        "quitter" | "q" => ShellCommand::Quitter,
        other => return Err(format!("Commande inconnue : {other}. Tapez « aide ».")),
    };
    Ok(Some(command))
}

// File names may contain spaces, so trailing tokens are glued back together.
fn joined(rest: &[&str], usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(format!("Usage : {usage}"));
    }
    Ok(rest.join(" "))
}
