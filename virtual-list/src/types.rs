use core::ops::RangeInclusive;

/// Where a scrolled-to item should land in the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset when the item is fully visible, otherwise scroll the least.
    Auto,
}

/// An inclusive window of item indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize, // inclusive
}

impl VisibleRange {
    /// Number of indexes in the range. Never zero: an empty list has no range at all.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.last.saturating_sub(self.first).saturating_add(1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.first && index <= self.last
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Vertical placement of one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    pub index: usize,
    pub top: u64,
    pub height: u32,
}

impl ItemLayout {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}
