/// Default seed height for unmeasured items, in logical pixels.
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: u32 = 400;
/// Default number of extra items realized on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Configuration for [`crate::ListLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    pub count: usize,
    /// Height assumed for an item until it is measured.
    ///
    /// A poor estimate shows up as scroll corrections once real heights arrive.
    pub estimated_item_height: u32,
    pub overscan: usize,
    /// Scroll offset applied by `ListLayout::new`.
    pub initial_offset: u64,
    /// Viewport height applied by `ListLayout::new`.
    pub initial_viewport_height: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            count: 0,
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            initial_offset: 0,
            initial_viewport_height: 0,
        }
    }
}

impl LayoutOptions {
    /// Creates options for `count` items seeded with `estimated_item_height`.
    pub fn new(count: usize, estimated_item_height: u32) -> Self {
        Self {
            count,
            estimated_item_height,
            ..Self::default()
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_viewport_height(mut self, viewport_height: u32) -> Self {
        self.initial_viewport_height = viewport_height;
        self
    }
}
