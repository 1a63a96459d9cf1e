use crate::application::compare::export::*;
use crate::application::compare::pages::*;
use crate::application::compare::stats::*;
use crate::domain::*;

fn sample_diff_result() -> DiffResult {
    DiffResult {
        html_diff: "<span>Devis </span><ins>2024</ins><del>2023</del>".to_string(),
        raw_diff: vec![
            DiffSegment(DiffOp::Equal, "Devis ".to_string()),
            DiffSegment(DiffOp::Insert, "2024".to_string()),
            DiffSegment(DiffOp::Delete, "2023".to_string()),
            DiffSegment(DiffOp::Insert, "Remise 5%\nsur le lot".to_string()),
        ],
        visual_diff: vec![
            PageDiff {
                page: 1,
                img1: Some(PageImage::new("aGVsbG8=")),
                img2: Some(PageImage::new("d29ybGQ=")),
            },
            PageDiff {
                page: 2,
                img1: Some(PageImage::new("aGVsbG8=")),
                img2: None,
            },
            PageDiff {
                page: 3,
                img1: None,
                img2: Some(PageImage::new("d29ybGQ=")),
            },
        ],
        filename1: "devis_v1.pdf".to_string(),
        filename2: "devis_v2.pdf".to_string(),
    }
}

#[test]
fn test_stats_match_sample() {
    let diff = sample_diff_result();
    let stats = DiffStats::from_segments(&diff.raw_diff);
    assert_eq!(stats.additions, 2);
    assert_eq!(stats.deletions, 1);
    assert_eq!(stats.total(), 3);
}

#[test]
fn test_rows_cover_every_page_side() {
    let diff = sample_diff_result();
    let rows = page_rows(&diff.visual_diff);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].disposition, Some(PageDisposition::Modified));
    assert_eq!(rows[1].disposition, Some(PageDisposition::Removed));
    assert_eq!(rows[2].disposition, Some(PageDisposition::Added));
}

#[test]
fn test_export_embeds_html_diff_verbatim() {
    let diff = sample_diff_result();
    let result = ComparisonExporter::export_to_html(&diff).unwrap();

    assert!(result.html.contains(&diff.html_diff));
    assert!(result.html.contains("Résumé des modifications"));
    assert!(result.html.contains("Ajouts : 2"));
    assert!(result.html.contains("Suppressions : 1"));
    assert!(result.html.contains("Total 3 modifications"));
    assert!(result.html.contains("devis_v1.pdf (Suppressions en rouge)"));
    assert!(result.html.contains("devis_v2.pdf (Ajouts en vert)"));
    assert!(result.html.contains("Page 2 (page supprimée)"));
    assert!(result.html.contains("Page 3 (page ajoutée)"));
}

#[test]
fn test_export_decodes_page_assets() {
    let diff = sample_diff_result();
    let result = ComparisonExporter::export_to_html(&diff).unwrap();

    assert_eq!(result.assets.len(), 4);
    assert_eq!(
        result.assets.get("page-1-reference.png").map(Vec::as_slice),
        Some(b"hello".as_slice())
    );
    assert_eq!(
        result.assets.get("page-3-candidate.png").map(Vec::as_slice),
        Some(b"world".as_slice())
    );
    assert!(result.html.contains("src=\"page-2-reference.png\""));
}

#[test]
fn test_export_disambiguates_duplicate_pages() {
    let mut diff = sample_diff_result();
    diff.visual_diff = vec![
        PageDiff {
            page: 1,
            img1: Some(PageImage::new("aGVsbG8=")),
            img2: None,
        },
        PageDiff {
            page: 1,
            img1: Some(PageImage::new("d29ybGQ=")),
            img2: None,
        },
    ];

    let result = ComparisonExporter::export_to_html(&diff).unwrap();
    assert_eq!(result.assets.len(), 2);
    assert!(result.assets.contains_key("page-1-reference.png"));
    assert!(result.assets.contains_key("page-1-1-reference.png"));
}

#[test]
fn test_export_surfaces_decode_errors() {
    let mut diff = sample_diff_result();
    diff.visual_diff[0].img1 = Some(PageImage::new("pas du base64 !!"));

    let err = ComparisonExporter::export_to_html(&diff).unwrap_err();
    assert!(err.to_string().contains("page 1"));
}

#[test]
fn test_export_writes_document_and_assets() {
    let diff = sample_diff_result();
    let result = ComparisonExporter::export_to_html(&diff).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("rapport");
    let html_path = result.write_to(&target).unwrap();

    assert_eq!(html_path, target.join("comparaison.html"));
    let written = std::fs::read_to_string(&html_path).unwrap();
    assert!(written.contains(&diff.html_diff));
    assert_eq!(
        std::fs::read(target.join("page-1-candidate.png")).unwrap(),
        b"world"
    );
}
