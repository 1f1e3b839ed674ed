//! Scroll offset to page position mapping.

use crate::catalog::CategoryId;

use super::category::CategoryModel;

/// Scroll metrics reported by one category's page list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollReport {
    /// Category whose page list produced the report.
    pub category: CategoryId,
    /// Current scroll offset.
    pub offset: u32,
    /// Visible extent.
    pub extent: u32,
    /// Total scroll range.
    pub range: u32,
    /// First completely visible page position (negative when none).
    pub first_fully_visible: i64,
    /// First at least partially visible page position (negative when none).
    pub first_partially_visible: i64,
}

/// Fractional page position for the page indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageProgress {
    /// Page count the position was computed against.
    pub page_count: usize,
    /// Whole pages scrolled past.
    pub whole_page: usize,
    /// Fraction of the next page scrolled into view, in `[0, 1)`.
    pub fraction: f32,
}

/// Stateless mapper from scroll metrics to page positions.
pub struct PageProgressMapper;

impl PageProgressMapper {
    /// What: Convert scroll metrics into a whole page and a fractional remainder.
    ///
    /// Inputs:
    /// - `offset`, `extent`, `range`: Scroll metrics of the page list.
    /// - `page_count`: Pages of the reporting category.
    ///
    /// Output:
    /// - `PageProgress` with `percentage = offset / (range - extent)` clamped to `[0, 1]`,
    ///   `whole_page = floor(percentage * page_count)` and the remainder as `fraction`.
    ///
    /// Details:
    /// - `range <= extent` counts as percentage 0.
    /// - Uses integer arithmetic for the product, so exact page boundaries land on the
    ///   integer (offset 50 over 450 with 9 pages is page 1, fraction 0).
    /// - At the very end (`percentage == 1`) `whole_page` equals `page_count`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn progress(offset: u32, extent: u32, range: u32, page_count: usize) -> PageProgress {
        let denom = u64::from(range.saturating_sub(extent));
        if denom == 0 || page_count == 0 {
            return PageProgress {
                page_count,
                whole_page: 0,
                fraction: 0.0,
            };
        }
        let offset = u64::from(offset).min(denom);
        let pages = u64::try_from(page_count).unwrap_or(u64::MAX);
        let scaled = offset.saturating_mul(pages);
        let whole = scaled / denom;
        let remainder = scaled % denom;
        PageProgress {
            page_count,
            whole_page: usize::try_from(whole).unwrap_or(page_count),
            fraction: (remainder as f64 / denom as f64) as f32,
        }
    }

    /// What: Commit a scroll report to the model if it comes from the current category.
    ///
    /// Inputs:
    /// - `model`: Category model to update.
    /// - `report`: Scroll metrics plus visible item positions.
    ///
    /// Output:
    /// - `Some(PageProgress)` for the indicator; `None` when the report was stale.
    ///
    /// Details:
    /// - Reports from a page list other than the current category are discarded.
    /// - The committed page is the first fully visible position when positive, else the first
    ///   partially visible one; the model clamps it.
    pub fn apply(model: &mut CategoryModel, report: &ScrollReport) -> Option<PageProgress> {
        if report.category != model.current_category_id() {
            tracing::trace!(
                reported = %report.category,
                current = %model.current_category_id(),
                "dropping stale scroll report"
            );
            return None;
        }
        let progress = Self::progress(
            report.offset,
            report.extent,
            report.range,
            model.current_page_count(),
        );
        let page = if report.first_fully_visible > 0 {
            report.first_fully_visible
        } else {
            report.first_partially_visible
        };
        model.set_current_page_index(page);
        Some(progress)
    }
}
