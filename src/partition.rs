//! Partition planner: deterministic sheet and page boundaries.
//!
//! A dataset of `total` records is split into sheets of at most
//! [`SHEET_SIZE`](crate::config::SHEET_SIZE) records, and each sheet into
//! sub-pages of at most [`PAGE_SIZE`](crate::config::PAGE_SIZE) records.
//! Because `SHEET_SIZE` is a multiple of `PAGE_SIZE`, a page never straddles
//! a sheet boundary, and the global page index can be derived from the sheet
//! number and the within-sheet sub-page number alone.
//!
//! Sheet count is ceiling division: `total == SHEET_SIZE` yields exactly one
//! full sheet, `total == 0` yields no sheets.

use crate::config::{PAGE_SIZE, SHEET_SIZE};
use serde::Serialize;

/// Pagination request handed to a page-fetch callback.
///
/// `index` is the 1-based global page index; the callback can derive its own
/// slice from `offset()` and `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// 1-based global page index.
    pub index: usize,
    /// Maximum records in this page (always `PAGE_SIZE`).
    pub size: usize,
    /// Total records across the whole dataset.
    pub total: usize,
}

impl PageRequest {
    /// 0-based record offset of the first record in this page.
    pub fn offset(&self) -> usize {
        (self.index - 1) * self.size
    }

    /// Number of records this page actually holds.
    pub fn len(&self) -> usize {
        self.total.saturating_sub(self.offset()).min(self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One sub-page of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    /// 1-based sub-page number within the sheet.
    pub sub_page: usize,
    /// 1-based global page index, contiguous across all sheets.
    pub global_index: usize,
}

/// One sheet of the partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    /// 1-based sheet number.
    pub number: usize,
    /// Records in this sheet; `SHEET_SIZE` except possibly for the last.
    pub size: usize,
    /// Sub-pages covering this sheet, in order.
    pub pages: Vec<PagePlan>,
}

impl SheetPlan {
    /// Deterministic worksheet name for this sheet.
    pub fn name(&self) -> String {
        format!("Sheet {}", self.number)
    }

    /// 0-based record offset of the sheet's first record in the dataset.
    pub fn offset(&self) -> usize {
        (self.number - 1) * SHEET_SIZE
    }

    /// Page request for one of this sheet's sub-pages.
    pub fn page_request(&self, page: &PagePlan, total: usize) -> PageRequest {
        PageRequest {
            index: page.global_index,
            size: PAGE_SIZE,
            total,
        }
    }
}

/// Number of sheets needed for `total` records.
pub fn sheet_count(total: usize) -> usize {
    total.div_ceil(SHEET_SIZE)
}

/// Compute the full sheet/page partition for `total` records.
pub fn plan_sheets(total: usize) -> Vec<SheetPlan> {
    let pages_per_full_sheet = SHEET_SIZE / PAGE_SIZE;
    let sheets = sheet_count(total);

    (1..=sheets)
        .map(|number| {
            let size = if number == sheets {
                total - SHEET_SIZE * (number - 1)
            } else {
                SHEET_SIZE
            };
            let page_count = size.div_ceil(PAGE_SIZE);
            let pages = (1..=page_count)
                .map(|sub_page| PagePlan {
                    sub_page,
                    global_index: pages_per_full_sheet * (number - 1) + sub_page,
                })
                .collect();
            SheetPlan {
                number,
                size,
                pages,
            }
        })
        .collect()
}
