use alloc::vec::Vec;
use core::cmp;

use crate::resolver;
use crate::{
    Align, FrameState, HeightTable, ItemLayout, LayoutOptions, ScrollState, ViewportState,
    VisibleRange,
};

/// Layout state of one virtualized list: the height table plus the scroll position and viewport
/// it is being viewed through.
///
/// This type holds no UI objects. The adapter feeds it viewport heights, scroll offsets, item
/// counts and measurements, and asks it which indexes to realize and where.
#[derive(Clone, Debug)]
pub struct ListLayout {
    table: HeightTable,
    overscan: usize,
    scroll_top: u64,
    viewport_height: u32,
}

impl ListLayout {
    /// Creates a layout and seeds the height table from `options`.
    pub fn new(options: LayoutOptions) -> Self {
        vdebug!(
            count = options.count,
            estimated_item_height = options.estimated_item_height,
            overscan = options.overscan,
            "ListLayout::new"
        );
        let mut table = HeightTable::new(options.estimated_item_height);
        table.initialize(options.count, options.estimated_item_height);
        Self {
            table,
            overscan: options.overscan,
            scroll_top: options.initial_offset,
            viewport_height: options.initial_viewport_height,
        }
    }

    pub fn heights(&self) -> &HeightTable {
        &self.table
    }

    /// Mutable access for batched measurement. Callers that use [`HeightTable::set_height`]
    /// directly must call [`HeightTable::recompute_offsets`] before querying ranges.
    pub fn heights_mut(&mut self) -> &mut HeightTable {
        &mut self.table
    }

    pub fn count(&self) -> usize {
        self.table.len()
    }

    /// Adjusts the item count, keeping measurements of retained items.
    pub fn set_count(&mut self, count: usize) {
        if count == self.table.len() {
            return;
        }
        vtrace!(from = self.table.len(), to = count, "ListLayout::set_count");
        if count == 0 {
            self.table.clear();
        } else {
            self.table.resize(count);
        }
    }

    /// Discards every measurement and reseeds `count` items with the estimate.
    pub fn reset(&mut self, count: usize) {
        let estimate = self.table.estimated_height();
        self.table.initialize(count, estimate);
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    pub fn estimated_item_height(&self) -> u32 {
        self.table.estimated_height()
    }

    /// Changes the seed used for items added from now on.
    pub fn set_estimated_item_height(&mut self, estimated_item_height: u32) {
        self.table.set_estimated_height(estimated_item_height);
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, viewport_height: u32) {
        self.viewport_height = viewport_height;
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: u64) {
        self.scroll_top = scroll_top;
    }

    pub fn set_scroll_top_clamped(&mut self, scroll_top: u64) {
        self.scroll_top = self.clamp_scroll_offset(scroll_top);
    }

    /// Shifts the scroll position by a signed delta, saturating at zero.
    pub fn scroll_by(&mut self, delta: i64) -> u64 {
        self.scroll_top = if delta >= 0 {
            self.scroll_top.saturating_add(delta as u64)
        } else {
            self.scroll_top.saturating_sub(delta.unsigned_abs())
        };
        self.scroll_top
    }

    pub fn total_height(&self) -> u64 {
        self.table.total_height()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Records a measured height and rebuilds offsets. Returns the applied delta.
    pub fn measure(&mut self, index: usize, height: u32) -> i64 {
        let delta = self.table.set_height(index, height);
        if delta != 0 {
            self.table.recompute_offsets();
        }
        delta
    }

    /// Records several measurements with a single offset rebuild. Returns the summed delta.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) -> i64 {
        let mut total = 0i64;
        for (index, height) in measurements {
            total += self.table.set_height(index, height);
        }
        if self.table.needs_recompute() {
            self.table.recompute_offsets();
        }
        total
    }

    /// First index whose bottom edge lies below the current scroll position.
    pub fn first_visible_index(&self) -> usize {
        resolver::find_start(&self.table, self.scroll_top)
    }

    /// Overscanned window for the current scroll position.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.scroll_top, self.viewport_height)
    }

    pub fn visible_range_for(&self, scroll_top: u64, viewport_height: u32) -> Option<VisibleRange> {
        resolver::resolve(&self.table, scroll_top, viewport_height, self.overscan)
    }

    /// Strictly visible window (no overscan) for the current scroll position.
    pub fn strict_visible_range(&self) -> Option<VisibleRange> {
        resolver::resolve_visible(&self.table, self.scroll_top, self.viewport_height)
    }

    pub fn item(&self, index: usize) -> Option<ItemLayout> {
        Some(ItemLayout {
            index,
            top: self.table.offset(index)?,
            height: self.table.height(index)?,
        })
    }

    /// Calls `f` for each item of the overscanned window, top to bottom.
    pub fn for_each_item(&self, mut f: impl FnMut(ItemLayout)) {
        let Some(range) = self.visible_range() else {
            return;
        };
        for index in range.indexes() {
            if let Some(item) = self.item(index) {
                f(item);
            }
        }
    }

    /// Collects the overscanned window into `out` (clears `out` first).
    pub fn collect_items(&self, out: &mut Vec<ItemLayout>) {
        out.clear();
        self.for_each_item(|it| out.push(it));
    }

    /// Maps an absolute offset to the item covering it, clamped to the last item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.table.is_empty() {
            return None;
        }
        Some(resolver::find_start(&self.table, offset))
    }

    /// Computes the (clamped) scroll offset that brings `index` into view.
    ///
    /// Returns `None` for out-of-range indexes.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Option<u64> {
        let item = self.item(index)?;
        let view = self.viewport_height as u64;

        let target = match align {
            Align::Start => item.top,
            Align::End => item.bottom().saturating_sub(view),
            Align::Center => {
                let center = item.top.saturating_add(item.height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.scroll_top;
                let cur_end = cur.saturating_add(view);
                if item.top >= cur && item.bottom() <= cur_end {
                    cur
                } else if item.top < cur {
                    item.top
                } else {
                    item.bottom().saturating_sub(view)
                }
            }
        };

        Some(self.clamp_scroll_offset(target))
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            height: self.viewport_height,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_top,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores a snapshot. The offset is clamped against the current content height.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.viewport_height = frame.viewport.height;
        self.scroll_top = cmp::min(frame.scroll.offset, self.max_scroll_offset());
    }
}
