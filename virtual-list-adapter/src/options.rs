use alloc::sync::Arc;

use coho_virtual_list::{DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_OVERSCAN};

use crate::{
    ConfigError, DEFAULT_LOAD_MORE_THRESHOLD, DEFAULT_MAX_SCROLL_COMPENSATION,
    DEFAULT_SMOOTH_SCROLL_MS, Easing, OversizedCompensation,
};

/// Renders one item into boundary content.
pub type RenderItemCallback<T, C> = Arc<dyn Fn(&T, usize) -> C + Send + Sync>;

/// Extracts an item's stable key.
pub type KeyCallback<T, K> = Arc<dyn Fn(&T) -> K + Send + Sync>;

/// Fired when the end-of-list sentinel comes into range.
pub type LoadMoreCallback = Arc<dyn Fn() + Send + Sync>;

/// Plain-data list settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Height assumed for items that have not been measured yet.
    pub estimated_item_height: u32,
    /// Items realized beyond each edge of the viewport.
    pub overscan: usize,
    /// Distance from the end of the content at which more items are requested.
    pub load_more_threshold: u32,
    pub max_scroll_compensation: u64,
    pub oversized_compensation: OversizedCompensation,
    pub smooth_scroll_ms: u64,
    pub easing: Easing,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            load_more_threshold: DEFAULT_LOAD_MORE_THRESHOLD,
            max_scroll_compensation: DEFAULT_MAX_SCROLL_COMPENSATION,
            oversized_compensation: OversizedCompensation::Discard,
            smooth_scroll_ms: DEFAULT_SMOOTH_SCROLL_MS,
            easing: Easing::SmoothStep,
        }
    }
}

impl ListConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.estimated_item_height == 0 {
            return Err(ConfigError::ZeroEstimatedItemHeight);
        }
        Ok(())
    }

    pub fn with_estimated_item_height(mut self, estimated_item_height: u32) -> Self {
        self.estimated_item_height = estimated_item_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_load_more_threshold(mut self, load_more_threshold: u32) -> Self {
        self.load_more_threshold = load_more_threshold;
        self
    }

    pub fn with_max_scroll_compensation(mut self, max_scroll_compensation: u64) -> Self {
        self.max_scroll_compensation = max_scroll_compensation;
        self
    }

    pub fn with_oversized_compensation(mut self, policy: OversizedCompensation) -> Self {
        self.oversized_compensation = policy;
        self
    }

    pub fn with_smooth_scroll(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.smooth_scroll_ms = duration_ms;
        self.easing = easing;
        self
    }
}

/// Configuration for [`crate::VirtualList`].
///
/// Cheap to clone: the callbacks are `Arc`s.
pub struct VirtualListOptions<T, K, C> {
    pub config: ListConfig,
    pub render_item: RenderItemCallback<T, C>,
    pub key_fn: KeyCallback<T, K>,
    pub on_load_more: Option<LoadMoreCallback>,
}

impl<T, K, C> Clone for VirtualListOptions<T, K, C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            render_item: Arc::clone(&self.render_item),
            key_fn: Arc::clone(&self.key_fn),
            on_load_more: self.on_load_more.clone(),
        }
    }
}

impl<T, K, C> VirtualListOptions<T, K, C> {
    pub fn new(
        render_item: impl Fn(&T, usize) -> C + Send + Sync + 'static,
        key_fn: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            config: ListConfig::default(),
            render_item: Arc::new(render_item),
            key_fn: Arc::new(key_fn),
            on_load_more: None,
        }
    }

    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_on_load_more(
        mut self,
        on_load_more: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_load_more = on_load_more.map(|f| Arc::new(f) as LoadMoreCallback);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()
    }
}

impl<T, K, C> core::fmt::Debug for VirtualListOptions<T, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("config", &self.config)
            .field("on_load_more", &self.on_load_more.is_some())
            .finish_non_exhaustive()
    }
}
