use std::fmt;

use log::warn;

use crate::domain::{PageDiff, PageImage};

pub const ZOOM_MIN: u16 = 50;
pub const ZOOM_MAX: u16 = 200;
pub const ZOOM_STEP: u16 = 10;

/// Zoom percentage for the visual view of one comparison.
///
/// Clamped to [50, 200] in steps of 10. The level belongs to a single
/// presenter instance; a new comparison starts over at 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel(u16);

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(100)
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl ZoomLevel {
    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self((self.0 + ZOOM_STEP).min(ZOOM_MAX))
    }

    pub fn zoom_out(self) -> Self {
        Self(self.0.saturating_sub(ZOOM_STEP).max(ZOOM_MIN))
    }

    /// Scales a pixel length by the zoom factor.
    pub fn scale(self, length: u32) -> u32 {
        (length as u64 * self.0 as u64 / 100) as u32
    }
}

/// How one page row should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDisposition {
    /// Both sides present: regular side-by-side row.
    Modified,
    /// Candidate side only: the page was added in the newer version.
    Added,
    /// Reference side only: the page was removed in the newer version.
    Removed,
}

/// One renderable row of the visual view.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRow<'a> {
    pub page: u32,
    pub disposition: Option<PageDisposition>,
    pub reference: Option<&'a PageImage>,
    pub candidate: Option<&'a PageImage>,
}

/// Builds the rows of the visual view.
///
/// Service order is kept verbatim: no re-sorting, no deduplication. A row
/// with no image on either side violates the service contract; it is kept
/// imageless and logged rather than dropped.
pub fn page_rows(visual_diff: &[PageDiff]) -> Vec<PageRow<'_>> {
    visual_diff
        .iter()
        .map(|page| {
            let disposition = match (&page.img1, &page.img2) {
                (Some(_), Some(_)) => Some(PageDisposition::Modified),
                (None, Some(_)) => Some(PageDisposition::Added),
                (Some(_), None) => Some(PageDisposition::Removed),
                (None, None) => {
                    warn!("page {} has no image on either side", page.page);
                    None
                }
            };
            PageRow {
                page: page.page,
                disposition,
                reference: page.img1.as_ref(),
                candidate: page.img2.as_ref(),
            }
        })
        .collect()
}
