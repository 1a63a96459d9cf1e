use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{DiffResult, PageImage};

use super::pages::{PageDisposition, page_rows};
use super::stats::DiffStats;

/// Files produced by an export: one HTML document plus decoded page images.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub html: String,
    pub assets: HashMap<String, Vec<u8>>,
}

impl ExportResult {
    /// Writes the document and its assets into `dir`, creating it if needed.
    /// Returns the path of the HTML document.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("création du dossier {} impossible", dir.display()))?;
        let html_path = dir.join("comparaison.html");
        std::fs::write(&html_path, &self.html)
            .with_context(|| format!("écriture de {} impossible", html_path.display()))?;
        for (name, bytes) in &self.assets {
            let path = dir.join(name);
            std::fs::write(&path, bytes)
                .with_context(|| format!("écriture de {} impossible", path.display()))?;
        }
        Ok(html_path)
    }
}

pub struct ComparisonExporter;

impl ComparisonExporter {
    /// Builds a standalone HTML report for `diff`.
    ///
    /// The service's `html_diff` is embedded byte-for-byte; page images are
    /// decoded into `assets` and referenced by relative file name.
    pub fn export_to_html(diff: &DiffResult) -> Result<ExportResult> {
        let stats = DiffStats::from_segments(&diff.raw_diff);
        let mut html = String::new();
        let mut assets: HashMap<String, Vec<u8>> = HashMap::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>Comparaison : {} / {}</title>\n",
            diff.filename1, diff.filename2
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str("<h1>Comparaison de versions</h1>\n");
        html.push_str(&format!(
            "<p>Référence : {} · Version comparée : {}</p>\n",
            diff.filename1, diff.filename2
        ));

        html.push_str("<h2>Résumé des modifications</h2>\n<ul>\n");
        html.push_str(&format!("<li>Ajouts : {}</li>\n", stats.additions));
        html.push_str(&format!("<li>Suppressions : {}</li>\n", stats.deletions));
        html.push_str(&format!("<li>Total {} modifications</li>\n", stats.total()));
        html.push_str("</ul>\n");

        html.push_str("<h2>Comparaison du texte</h2>\n<div class=\"diff-texte\">\n");
        html.push_str(&diff.html_diff);
        html.push_str("\n</div>\n");

        let rows = page_rows(&diff.visual_diff);
        if !rows.is_empty() {
            html.push_str("<h2>Comparaison visuelle</h2>\n");
        }
        for (index, row) in rows.iter().enumerate() {
            let note = match row.disposition {
                Some(PageDisposition::Added) => " (page ajoutée)",
                Some(PageDisposition::Removed) => " (page supprimée)",
                _ => "",
            };
            html.push_str(&format!("<h3>Page {}{}</h3>\n", row.page, note));

            if let Some(image) = row.reference {
                let caption = format!("{} (Suppressions en rouge)", diff.filename1);
                Self::push_image(
                    &mut html, &mut assets, image, row.page, index, "reference", &caption,
                )?;
            }
            if let Some(image) = row.candidate {
                let caption = format!("{} (Ajouts en vert)", diff.filename2);
                Self::push_image(
                    &mut html, &mut assets, image, row.page, index, "candidate", &caption,
                )?;
            }
        }

        html.push_str("</body>\n</html>\n");

        Ok(ExportResult { html, assets })
    }

    fn push_image(
        html: &mut String,
        assets: &mut HashMap<String, Vec<u8>>,
        image: &PageImage,
        page: u32,
        index: usize,
        side: &str,
        caption: &str,
    ) -> Result<()> {
        let bytes = image
            .decode()
            .with_context(|| format!("image de la page {page} ({side}) illisible"))?;
        let name = Self::asset_name(assets, page, index, side);
        html.push_str(&format!(
            "<figure>\n<img src=\"{name}\" alt=\"Page {page}\">\n<figcaption>{caption}</figcaption>\n</figure>\n"
        ));
        assets.insert(name, bytes);
        Ok(())
    }

    fn asset_name(
        assets: &HashMap<String, Vec<u8>>,
        page: u32,
        index: usize,
        side: &str,
    ) -> String {
        let name = format!("page-{page}-{side}.png");
        if assets.contains_key(&name) {
            // duplicate page numbers are rendered as sent; only the files
            // need disambiguation
            format!("page-{page}-{index}-{side}.png")
        } else {
            name
        }
    }
}
