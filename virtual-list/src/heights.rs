use alloc::vec::Vec;

/// Height changes at or below this magnitude are treated as layout rounding noise.
pub const SUB_PIXEL_TOLERANCE: u32 = 1;

/// Per-item heights plus their cumulative top offsets.
///
/// Heights start at an estimate and are replaced by measurements as items are rendered.
/// Offsets are derived (`offset[0] = 0`, `offset[i] = offset[i - 1] + height[i - 1]`) and are
/// rebuilt in one linear pass by [`Self::recompute_offsets`]. Single-height updates leave the
/// offsets stale until the caller recomputes, so a resize batch pays for one rebuild instead of
/// one per item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeightTable {
    heights: Vec<u32>,
    offsets: Vec<u64>,
    total: u64,
    estimate: u32,
    stale: bool,
}

impl HeightTable {
    pub fn new(estimated_height: u32) -> Self {
        Self {
            estimate: estimated_height,
            ..Self::default()
        }
    }

    /// Builds a table from known heights, e.g. measurements restored from a previous session.
    pub fn from_heights(estimated_height: u32, heights: impl IntoIterator<Item = u32>) -> Self {
        let mut table = Self {
            heights: heights.into_iter().collect(),
            ..Self::new(estimated_height)
        };
        table.recompute_offsets();
        table
    }

    /// Seeds `item_count` entries with `estimated_height`, discarding previous measurements.
    pub fn initialize(&mut self, item_count: usize, estimated_height: u32) {
        vdebug!(item_count, estimated_height, "HeightTable::initialize");
        self.estimate = estimated_height;
        self.heights.clear();
        self.heights.resize(item_count, estimated_height);
        self.recompute_offsets();
    }

    /// Updates one entry and returns the signed delta that was applied.
    ///
    /// Deltas within [`SUB_PIXEL_TOLERANCE`] are ignored and report `0`, as do out-of-range
    /// indexes.
    pub fn set_height(&mut self, index: usize, new_height: u32) -> i64 {
        let Some(cur) = self.heights.get_mut(index) else {
            return 0;
        };
        let delta = new_height as i64 - *cur as i64;
        if delta.unsigned_abs() <= SUB_PIXEL_TOLERANCE as u64 {
            return 0;
        }
        *cur = new_height;
        self.stale = true;
        vtrace!(index, new_height, delta, "HeightTable::set_height");
        delta
    }

    /// Rebuilds the offset table and the total height.
    pub fn recompute_offsets(&mut self) {
        self.offsets.clear();
        self.offsets.reserve_exact(self.heights.len());
        let mut top = 0u64;
        for &h in &self.heights {
            self.offsets.push(top);
            top = top.saturating_add(h as u64);
        }
        self.total = top;
        self.stale = false;
    }

    /// Extends the table to `new_len`, seeding new entries with the estimate.
    pub fn grow_to(&mut self, new_len: usize) {
        if new_len <= self.heights.len() {
            return;
        }
        self.heights.resize(new_len, self.estimate);
        self.recompute_offsets();
    }

    /// Truncates the table to `new_len`, keeping measurements of retained entries.
    pub fn shrink_to(&mut self, new_len: usize) {
        if new_len >= self.heights.len() {
            return;
        }
        self.heights.truncate(new_len);
        self.recompute_offsets();
    }

    /// Grows or shrinks to `new_len`.
    pub fn resize(&mut self, new_len: usize) {
        if new_len > self.heights.len() {
            self.grow_to(new_len);
        } else {
            self.shrink_to(new_len);
        }
    }

    pub fn clear(&mut self) {
        self.heights.clear();
        self.offsets.clear();
        self.total = 0;
        self.stale = false;
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn estimated_height(&self) -> u32 {
        self.estimate
    }

    pub fn set_estimated_height(&mut self, estimated_height: u32) {
        self.estimate = estimated_height;
    }

    /// `true` after a [`Self::set_height`] that has not been followed by a recompute.
    pub fn needs_recompute(&self) -> bool {
        self.stale
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    pub fn offset(&self, index: usize) -> Option<u64> {
        self.offsets.get(index).copied()
    }

    /// Bottom edge of an item (`offset + height`).
    pub fn bottom(&self, index: usize) -> Option<u64> {
        let top = self.offset(index)?;
        let height = self.height(index)?;
        Some(top.saturating_add(height as u64))
    }

    /// Total content height, used to size the scrollable spacer.
    pub fn total_height(&self) -> u64 {
        self.total
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }
}
