//! Scroll position → item index mapping.
//!
//! Item heights vary with content, so the mapping is a binary search over the offset table
//! rather than a division. Both searches assume offsets are non-decreasing, which
//! [`HeightTable::recompute_offsets`] guarantees.

use core::cmp;

use crate::{HeightTable, VisibleRange};

/// Returns the smallest index whose bottom edge is below `scroll_top`
/// (`offset[i] + height[i] > scroll_top`).
///
/// When every item ends at or above `scroll_top` the last index is returned. An empty table
/// yields `0`.
pub fn find_start(table: &HeightTable, scroll_top: u64) -> usize {
    let offsets = table.offsets();
    let heights = table.heights();
    let n = cmp::min(offsets.len(), heights.len());
    if n == 0 {
        return 0;
    }

    let mut low = 0usize;
    let mut high = n - 1;
    while low < high {
        let mid = low + (high - low) / 2;
        let bottom = offsets[mid].saturating_add(heights[mid] as u64);
        if bottom <= scroll_top {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    low
}

/// Returns the largest index whose top edge is above `viewport_bottom`
/// (`offset[i] < viewport_bottom`).
///
/// When no item qualifies, `0` is returned.
pub fn find_end(table: &HeightTable, viewport_bottom: u64) -> usize {
    let offsets = table.offsets();
    if offsets.is_empty() {
        return 0;
    }

    let mut low = 0usize;
    let mut high = offsets.len() - 1;
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if offsets[mid] < viewport_bottom {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

/// Resolves the overscanned window for a scroll position and viewport.
///
/// Returns `None` when the table is empty.
pub fn resolve(
    table: &HeightTable,
    scroll_top: u64,
    viewport_height: u32,
    overscan: usize,
) -> Option<VisibleRange> {
    let visible = resolve_visible(table, scroll_top, viewport_height)?;
    let last_index = table.len() - 1;
    Some(VisibleRange {
        first: visible.first.saturating_sub(overscan),
        last: cmp::min(last_index, visible.last.saturating_add(overscan)),
    })
}

/// Resolves the strictly visible window (no overscan).
pub fn resolve_visible(
    table: &HeightTable,
    scroll_top: u64,
    viewport_height: u32,
) -> Option<VisibleRange> {
    if table.is_empty() {
        return None;
    }
    debug_assert!(
        !table.needs_recompute(),
        "resolve called with stale offsets"
    );
    let viewport_bottom = scroll_top.saturating_add(viewport_height as u64);
    let first = find_start(table, scroll_top);
    let last = cmp::max(first, find_end(table, viewport_bottom));
    Some(VisibleRange { first, last })
}
