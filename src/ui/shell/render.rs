//! Plain-text rendering of the application state.
//!
//! Every function builds a `String` rather than printing, so the output can
//! be asserted on directly.

use crate::application::compare::pages::{PageDisposition, ZoomLevel, page_rows};
use crate::application::compare::stats::DiffStats;
use crate::domain::{CompareBlocker, DiffOp, DiffResult, PageImage, VersionRegistry};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31;9m";
const RESET: &str = "\x1b[0m";

pub fn help() -> String {
    [
        "Commandes :",
        "  aide                 affiche cette aide",
        "  versions             recharge et affiche la liste des versions",
        "  ajouter <fichier>    envoie une nouvelle version au service",
        "  v1 <numéro|fichier>  choisit la version de référence (gauche)",
        "  v2 <numéro|fichier>  choisit la version à comparer (droite)",
        "  comparer             lance la comparaison des deux versions choisies",
        "  vue texte|visuelle   change la présentation du résultat",
        "  zoom +|-             ajuste le zoom de la vue visuelle (50 % à 200 %)",
        "  exporter <dossier>   écrit le rapport HTML et ses images",
        "  effacer              supprime toutes les versions (avec confirmation)",
        "  fermer               masque le bandeau d'erreur",
        "  quitter              quitte l'application",
    ]
    .join("\n")
}

/// Version list with selection markers and a one-line readiness footer.
pub fn timeline(registry: &VersionRegistry) -> String {
    if registry.is_empty() {
        return "Aucune version. Utilisez « ajouter <fichier> » pour commencer.\n".to_string();
    }

    let selection = registry.selection();
    let mut out = String::from("Versions :\n");
    for (index, version) in registry.versions().iter().enumerate() {
        let mut markers = String::new();
        if selection.reference.as_deref() == Some(version.filename.as_str()) {
            markers.push_str("  [référence]");
        }
        if selection.candidate.as_deref() == Some(version.filename.as_str()) {
            markers.push_str("  [comparée]");
        }
        let date = version
            .modified_at()
            .map(|stamp| stamp.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| "date inconnue".to_string());
        out.push_str(&format!(
            "  {}  ({}, modifié le {}){}\n",
            version.display_label(index + 1),
            format_size(version.size),
            date,
            markers
        ));
    }

    out.push_str(&readiness(registry));
    out.push('\n');
    out
}

fn readiness(registry: &VersionRegistry) -> String {
    match registry.compare_blocker() {
        Some(CompareBlocker::Incomplete) if registry.len() < 2 => {
            "Ajoutez au moins deux versions pour comparer.".to_string()
        }
        Some(blocker) => blocker_message(blocker).to_string(),
        None => "Prêt à comparer (commande « comparer »).".to_string(),
    }
}

/// The warning matching a compare blocker.
pub fn blocker_message(blocker: CompareBlocker) -> &'static str {
    match blocker {
        CompareBlocker::SameVersion => "Sélectionnez deux versions différentes pour comparer.",
        CompareBlocker::Incomplete => "Sélectionnez deux versions pour comparer.",
    }
}

pub fn format_size(bytes: u64) -> String {
    format!("{:.1} Ko", bytes as f64 / 1024.0)
}

/// Text comparison: the summary block followed by the inline diff.
pub fn text_view(diff: &DiffResult) -> String {
    let stats = DiffStats::from_segments(&diff.raw_diff);
    let mut out = String::new();
    out.push_str("Résumé des modifications\n");
    out.push_str(&format!("  Ajouts : {}\n", stats.additions));
    out.push_str(&format!("  Suppressions : {}\n", stats.deletions));
    out.push_str(&format!("  Total {} modifications\n", stats.total()));
    out.push_str(&format!(
        "\nLégende : vert = ajouté dans {}, rouge barré = supprimé de {}\n\n",
        diff.filename2, diff.filename1
    ));
    out.push_str(&inline_segments(diff));
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn inline_segments(diff: &DiffResult) -> String {
    let mut out = String::new();
    for segment in &diff.raw_diff {
        match segment.op() {
            DiffOp::Equal => out.push_str(segment.text()),
            DiffOp::Insert => {
                out.push_str(GREEN);
                out.push_str(segment.text());
                out.push_str(RESET);
            }
            DiffOp::Delete => {
                out.push_str(RED);
                out.push_str(segment.text());
                out.push_str(RESET);
            }
        }
    }
    out
}

/// Visual comparison: one block per page, in service order.
pub fn visual_view(diff: &DiffResult, zoom: ZoomLevel) -> String {
    let rows = page_rows(&diff.visual_diff);
    let mut out = format!(
        "Comparaison visuelle : {} page(s), zoom {zoom}\n",
        rows.len()
    );
    for row in &rows {
        let note = match row.disposition {
            Some(PageDisposition::Added) => " (page ajoutée)",
            Some(PageDisposition::Removed) => " (page supprimée)",
            Some(PageDisposition::Modified) => "",
            None => " (aucune image)",
        };
        out.push_str(&format!("\nPage {}{}\n", row.page, note));
        if let Some(image) = row.reference {
            out.push_str(&format!(
                "  {} (Suppressions en rouge){}\n",
                diff.filename1,
                dimensions_note(image, zoom)
            ));
        }
        if let Some(image) = row.candidate {
            out.push_str(&format!(
                "  {} (Ajouts en vert){}\n",
                diff.filename2,
                dimensions_note(image, zoom)
            ));
        }
    }
    out
}

fn dimensions_note(image: &PageImage, zoom: ZoomLevel) -> String {
    match image.dimensions() {
        Some((width, height)) => format!(
            " : {width}x{height} px, affiché {}x{}",
            zoom.scale(width),
            zoom.scale(height)
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiffSegment, PageDiff, Version, VersionRegistry};

    fn version(filename: &str) -> Version {
        Version {
            filename: filename.to_string(),
            path: format!("/data/{filename}"),
            size: 2048,
            created: 1_700_000_000.0,
            modified: 1_700_000_000.0,
        }
    }

    fn registry_with(names: &[&str]) -> VersionRegistry {
        let mut registry = VersionRegistry::new();
        registry.replace_all(names.iter().map(|name| version(name)).collect());
        registry
    }

    #[test]
    fn test_timeline_marks_the_selected_pair() {
        let rendered = timeline(&registry_with(&["a.pdf", "b.pdf", "c.pdf"]));
        assert!(rendered.contains("V1 - a.pdf"));
        assert!(rendered.contains("V2 - b.pdf  (2.0 Ko"));
        assert!(rendered.contains("[référence]"));
        assert!(rendered.contains("[comparée]"));
        assert!(rendered.contains("Prêt à comparer"));
    }

    #[test]
    fn test_timeline_explains_what_is_missing() {
        assert!(timeline(&VersionRegistry::new()).contains("Aucune version"));
        assert!(timeline(&registry_with(&["a.pdf"])).contains("Ajoutez au moins deux versions"));

        let mut registry = registry_with(&["a.pdf", "b.pdf"]);
        registry.select_candidate("a.pdf".to_string()).unwrap();
        assert!(
            timeline(&registry).contains("Sélectionnez deux versions différentes pour comparer.")
        );
    }

    #[test]
    fn test_text_view_counts_and_replays_segments() {
        let diff = DiffResult {
            html_diff: "<span>ignored here</span>".to_string(),
            raw_diff: vec![
                DiffSegment(DiffOp::Equal, "Total : ".to_string()),
                DiffSegment(DiffOp::Delete, "100".to_string()),
                DiffSegment(DiffOp::Insert, "120".to_string()),
            ],
            visual_diff: vec![],
            filename1: "avant.pdf".to_string(),
            filename2: "après.pdf".to_string(),
        };
        let rendered = text_view(&diff);
        assert!(rendered.contains("Ajouts : 1"));
        assert!(rendered.contains("Suppressions : 1"));
        assert!(rendered.contains("Total 2 modifications"));
        assert!(rendered.contains("Total : "));
        assert!(rendered.contains("120"));
        assert!(!rendered.contains("ignored here"));
    }

    #[test]
    fn test_visual_view_labels_one_sided_pages() {
        let diff = DiffResult {
            html_diff: String::new(),
            raw_diff: vec![],
            visual_diff: vec![
                PageDiff {
                    page: 1,
                    img1: Some(PageImage::new("aGVsbG8=".to_string())),
                    img2: None,
                },
                PageDiff {
                    page: 2,
                    img1: None,
                    img2: Some(PageImage::new("d29ybGQ=".to_string())),
                },
            ],
            filename1: "avant.pdf".to_string(),
            filename2: "après.pdf".to_string(),
        };
        let rendered = visual_view(&diff, ZoomLevel::default());
        assert!(rendered.contains("Page 1 (page supprimée)"));
        assert!(rendered.contains("Page 2 (page ajoutée)"));
        assert!(rendered.contains("avant.pdf (Suppressions en rouge)"));
        assert!(rendered.contains("après.pdf (Ajouts en vert)"));
    }
}
