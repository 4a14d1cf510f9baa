use alloc::vec::Vec;

use coho_virtual_list::{Align, LayoutOptions, ListLayout, SUB_PIXEL_TOLERANCE, VisibleRange};

use crate::anchor::{self, ScrollAnchor};
use crate::frame::FrameThrottle;
use crate::load_more::sentinel_intersects;
use crate::{
    ConfigError, ItemPool, LoadMoreTrigger, PoolKey, RenderBoundary, ResizeController,
    ScrollBehavior, ScrollContainer, SizeChange, SyncStats, SyncTarget, Tween,
    VirtualListOptions,
};

/// Lifecycle of a [`VirtualList`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListState {
    /// Constructed, not connected yet.
    #[default]
    Uninitialized,
    /// Connected; the height table is seeded.
    Initialized,
    /// At least one sync ran. Stays here until disconnected.
    Syncing,
    /// Connected without a scroll container. Every event is ignored.
    Inert,
    /// Torn down. Terminal.
    Disconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Animation {
    /// Starts on the next frame, from wherever the container is then.
    Pending { to: u64 },
    Running(Tween),
}

/// A virtualized list component.
///
/// Holds the items, the layout, the pool of realized nodes and the load-more guard. The host
/// forwards its events (scroll, animation frame, viewport and item resizes, sentinel
/// intersection) and the list updates the render boundary and the scroll container in
/// response. Only the overscanned window around the viewport is ever realized.
pub struct VirtualList<T, K, B, S>
where
    B: RenderBoundary<K>,
{
    options: VirtualListOptions<T, K, B::Content>,
    items: Vec<T>,
    layout: ListLayout,
    pool: ItemPool<K, B::Node>,
    boundary: B,
    container: Option<S>,
    resize: ResizeController,
    load_more: LoadMoreTrigger,
    frame: FrameThrottle,
    animation: Option<Animation>,
    /// Last scroll position the list wrote itself, to tell it apart from user scrolling.
    programmatic_top: Option<u64>,
    content_height: Option<u64>,
    sentinel_visible: bool,
    recheck_sentinel: bool,
    targets: Vec<SyncTarget<K>>,
    last_sync: SyncStats,
    state: ListState,
}

impl<T, K, B, S> VirtualList<T, K, B, S>
where
    K: PoolKey,
    B: RenderBoundary<K>,
    S: ScrollContainer,
{
    pub fn new(
        options: VirtualListOptions<T, K, B::Content>,
        boundary: B,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let config = options.config;
        vdebug!(
            estimated_item_height = config.estimated_item_height,
            overscan = config.overscan,
            load_more_threshold = config.load_more_threshold,
            "VirtualList::new"
        );
        Ok(Self {
            layout: ListLayout::new(
                LayoutOptions::new(0, config.estimated_item_height)
                    .with_overscan(config.overscan),
            ),
            resize: ResizeController::new(
                config.max_scroll_compensation,
                config.oversized_compensation,
            ),
            options,
            items: Vec::new(),
            pool: ItemPool::new(),
            boundary,
            container: None,
            load_more: LoadMoreTrigger::new(),
            frame: FrameThrottle::default(),
            animation: None,
            programmatic_top: None,
            content_height: None,
            sentinel_visible: false,
            recheck_sentinel: false,
            targets: Vec::new(),
            last_sync: SyncStats::default(),
            state: ListState::Uninitialized,
        })
    }

    /// Attaches the scroll container, seeds the height table and runs the first sync.
    ///
    /// Without a container the list becomes [`ListState::Inert`].
    pub fn connect(&mut self, container: Option<S>) {
        if self.state != ListState::Uninitialized {
            vwarn!(state = ?self.state, "VirtualList::connect: already connected");
            return;
        }
        let Some(container) = container else {
            vwarn!("VirtualList::connect: no scroll container, list stays inert");
            self.state = ListState::Inert;
            return;
        };

        self.layout.set_viewport_height(container.viewport_height());
        self.layout.reset(self.items.len());
        self.layout.set_scroll_top(container.scroll_top());
        self.container = Some(container);
        self.state = ListState::Initialized;
        vdebug!(
            items = self.items.len(),
            viewport_height = self.layout.viewport_height(),
            "VirtualList::connect"
        );
        self.sync();
    }

    /// Tears the list down: cancels the pending frame, destroys every node and drops the
    /// container.
    pub fn disconnect(&mut self) {
        if self.state == ListState::Disconnected {
            return;
        }
        if self.frame.cancel() {
            if let Some(container) = self.container.as_mut() {
                container.cancel_frame();
            }
        }
        self.pool.clear(&mut self.boundary);
        self.layout.reset(0);
        self.container = None;
        self.animation = None;
        self.load_more.reset();
        self.state = ListState::Disconnected;
        vdebug!("VirtualList::disconnect");
    }

    /// Replaces the items.
    ///
    /// Retained indexes keep their measured heights, new indexes start at the estimate, and
    /// nodes of indexes past the new end are destroyed before the window is re-synced.
    pub fn set_items(&mut self, items: Vec<T>) {
        if self.state == ListState::Disconnected {
            return;
        }
        let old_len = self.layout.count();
        self.items = items;
        if !self.is_active() {
            return;
        }

        let new_len = self.items.len();
        vdebug!(old_len, new_len, "VirtualList::set_items");
        self.layout.set_count(new_len);
        if new_len < old_len {
            self.pool.remove_from(&mut self.boundary, new_len);
        }
        self.recheck_sentinel = true;
        self.sync();
    }

    /// Records the host's loading flag. Dropping it re-arms the load-more trigger and re-checks
    /// the sentinel, so a page too short to scroll still asks for more.
    pub fn set_loading(&mut self, loading: bool) {
        if self.load_more.set_host_loading(loading) && self.is_active() {
            self.recheck_sentinel = true;
            self.observe_sentinel();
        }
    }

    /// Scroll event from the container. The sync itself runs on the next frame.
    pub fn on_scroll(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.frame.is_scroll_suppressed() {
            vtrace!("VirtualList::on_scroll: suppressed");
            return;
        }
        let Some(container) = self.container.as_mut() else {
            return;
        };
        if self.animation.is_some() && self.programmatic_top != Some(container.scroll_top()) {
            vtrace!("VirtualList::on_scroll: user scroll cancels animation");
            self.animation = None;
        }
        if self.frame.schedule_sync() {
            container.request_frame();
        }
    }

    /// Animation frame callback.
    pub fn on_frame(&mut self, now_ms: u64) {
        if !self.is_active() {
            return;
        }
        let mut sync_due = self.frame.begin_frame();
        if self.step_animation(now_ms) {
            sync_due = true;
        }
        if sync_due {
            if let Some(container) = self.container.as_ref() {
                self.layout.set_scroll_top(container.scroll_top());
            }
            vtrace!(now_ms, scroll_top = self.layout.scroll_top(), "VirtualList::on_frame");
            self.sync();
        }
        if self.animation.is_some() {
            self.request_frame();
        }
    }

    /// The container's viewport height changed.
    pub fn on_viewport_resize(&mut self, viewport_height: u32) {
        if !self.is_active() {
            return;
        }
        if viewport_height.abs_diff(self.layout.viewport_height()) <= SUB_PIXEL_TOLERANCE {
            return;
        }
        vtrace!(viewport_height, "VirtualList::on_viewport_resize");
        self.layout.set_viewport_height(viewport_height);
        self.refresh_scroll_top();
        self.sync();
    }

    /// A batch of measured item heights.
    ///
    /// Height changes above the first visible item scroll the container by the same amount so
    /// the visible content does not move. Scroll events are ignored until the next frame
    /// afterwards.
    pub fn on_item_resize(&mut self, changes: &[SizeChange<K>]) {
        if !self.is_active() {
            return;
        }
        self.refresh_scroll_top();
        let outcome = self
            .resize
            .apply_batch(&mut self.layout, &self.pool, changes);
        if !outcome.heights_changed {
            return;
        }

        self.pool
            .reposition_all(&mut self.boundary, self.layout.heights());
        self.publish_content_height();

        if outcome.compensation != 0 {
            if let Some(container) = self.container.as_mut() {
                container.scroll_by(outcome.compensation);
                let top = container.scroll_top();
                self.layout.set_scroll_top(top);
                self.programmatic_top = Some(top);
                if self.frame.suppress_scroll() {
                    container.request_frame();
                }
            }
        }
        if self.frame.schedule_sync() {
            self.request_frame();
        }
        self.observe_sentinel();
    }

    /// Sentinel intersection event, from a native observer or the built-in geometric one.
    pub fn on_sentinel_intersection(&mut self, is_intersecting: bool) {
        if !self.is_active() {
            return;
        }
        let host_loading = self.load_more.host_loading();
        if self
            .load_more
            .on_intersection(is_intersecting, self.items.len(), host_loading)
        {
            if let Some(on_load_more) = self.options.on_load_more.as_ref() {
                on_load_more();
            }
        }
    }

    /// Scrolls so item `index` is at the top of the viewport. Out-of-range indexes are ignored.
    pub fn scroll_to_index(&mut self, index: usize, behavior: ScrollBehavior) {
        self.scroll_to_index_aligned(index, Align::Start, behavior);
    }

    pub fn scroll_to_index_aligned(&mut self, index: usize, align: Align, behavior: ScrollBehavior) {
        if !self.is_active() || index >= self.items.len() {
            return;
        }
        if let Some(target) = self.layout.scroll_to_index_offset(index, align) {
            self.scroll_to_offset(target, behavior);
        }
    }

    pub fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        if self.is_active() {
            self.scroll_to_offset(0, behavior);
        }
    }

    /// Current scroll position of the container, `0` when there is none.
    pub fn scroll_top(&self) -> u64 {
        self.container.as_ref().map_or(0, |c| c.scroll_top())
    }

    /// Jumps to `position` and syncs immediately.
    pub fn set_scroll_top(&mut self, position: u64) {
        if self.is_active() {
            self.scroll_to_offset(position, ScrollBehavior::Instant);
        }
    }

    /// Anchors on the first visible item. See [`ScrollAnchor`].
    pub fn capture_anchor(&self) -> Option<ScrollAnchor<K>> {
        let key_fn = &self.options.key_fn;
        anchor::capture_anchor(&self.layout, |index| self.items.get(index).map(|it| key_fn(it)))
    }

    /// Restores a captured anchor against the current items. Returns `false` when the anchor
    /// item is gone.
    pub fn apply_anchor(&mut self, anchor: &ScrollAnchor<K>) -> bool {
        if !self.is_active() {
            return false;
        }
        let key_fn = &self.options.key_fn;
        let items = &self.items;
        let Some(top) = anchor::apply_anchor(&mut self.layout, anchor, |key| {
            items.iter().position(|it| key_fn(it) == *key)
        }) else {
            return false;
        };
        self.animation = None;
        self.write_scroll_top(top);
        self.sync();
        true
    }

    pub fn scroll_container(&self) -> Option<&S> {
        self.container.as_ref()
    }

    pub fn scroll_container_mut(&mut self) -> Option<&mut S> {
        self.container.as_mut()
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut B {
        &mut self.boundary
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn layout(&self) -> &ListLayout {
        &self.layout
    }

    pub fn pool(&self) -> &ItemPool<K, B::Node> {
        &self.pool
    }

    pub fn options(&self) -> &VirtualListOptions<T, K, B::Content> {
        &self.options
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    /// A load-more signal fired and the host has not finished loading yet.
    pub fn is_loading_more(&self) -> bool {
        self.load_more.is_in_flight()
    }

    /// Whether a loading indicator belongs below the items.
    pub fn shows_loading_indicator(&self) -> bool {
        self.load_more.host_loading() || self.load_more.is_in_flight()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Realized window as of the last sync.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        if !self.is_active() {
            return None;
        }
        self.layout.visible_range()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn total_height(&self) -> u64 {
        self.layout.total_height()
    }

    pub fn last_sync_stats(&self) -> &SyncStats {
        &self.last_sync
    }

    fn is_active(&self) -> bool {
        matches!(self.state, ListState::Initialized | ListState::Syncing)
    }

    fn scroll_to_offset(&mut self, offset: u64, behavior: ScrollBehavior) {
        let target = self.layout.clamp_scroll_offset(offset);
        match behavior {
            ScrollBehavior::Instant => {
                self.animation = None;
                self.write_scroll_top(target);
                self.sync();
            }
            ScrollBehavior::Smooth => {
                vtrace!(to = target, "VirtualList: smooth scroll scheduled");
                self.animation = Some(Animation::Pending { to: target });
                self.request_frame();
            }
        }
    }

    /// Advances the scroll animation. Returns `true` when it moved the container.
    fn step_animation(&mut self, now_ms: u64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let tween = match animation {
            Animation::Running(tween) => tween,
            Animation::Pending { to } => {
                let config = &self.options.config;
                Tween::new(self.scroll_top(), to, now_ms, config.smooth_scroll_ms, config.easing)
            }
        };
        self.animation = if tween.is_done(now_ms) {
            None
        } else {
            Some(Animation::Running(tween))
        };
        self.write_scroll_top(tween.sample(now_ms));
        true
    }

    fn write_scroll_top(&mut self, top: u64) {
        if let Some(container) = self.container.as_mut() {
            container.set_scroll_top(top);
        }
        self.programmatic_top = Some(top);
        self.layout.set_scroll_top(top);
    }

    fn refresh_scroll_top(&mut self) {
        if let Some(container) = self.container.as_ref() {
            self.layout.set_scroll_top(container.scroll_top());
        }
    }

    fn request_frame(&mut self) {
        if self.frame.request() {
            if let Some(container) = self.container.as_mut() {
                container.request_frame();
            }
        }
    }

    fn publish_content_height(&mut self) {
        let height = self.layout.total_height();
        if self.content_height != Some(height) {
            self.content_height = Some(height);
            self.boundary.set_content_height(height);
        }
    }

    /// Reconciles the pool with the overscanned window at the layout's scroll position.
    fn sync(&mut self) {
        if !self.is_active() {
            return;
        }
        self.state = ListState::Syncing;
        self.publish_content_height();

        self.targets.clear();
        if let Some(range) = self.layout.visible_range() {
            let key_fn = &self.options.key_fn;
            for index in range.indexes() {
                let (Some(item), Some(top)) =
                    (self.items.get(index), self.layout.heights().offset(index))
                else {
                    continue;
                };
                self.targets.push(SyncTarget {
                    key: key_fn(item),
                    index,
                    top,
                });
            }
        }

        let render_item = &self.options.render_item;
        let items = &self.items;
        self.last_sync = self.pool.sync(&mut self.boundary, &self.targets, |index| {
            render_item(&items[index], index)
        });
        self.observe_sentinel();
    }

    /// Geometric stand-in for an intersection observer on the end-of-list sentinel.
    ///
    /// Emits on state changes, and once more after a re-arm while the sentinel is still in
    /// range.
    fn observe_sentinel(&mut self) {
        let visible = sentinel_intersects(
            self.layout.scroll_top(),
            self.layout.viewport_height(),
            self.layout.total_height(),
            self.options.config.load_more_threshold,
        );
        let changed = visible != self.sentinel_visible;
        let recheck = core::mem::take(&mut self.recheck_sentinel);
        self.sentinel_visible = visible;
        if changed || (recheck && visible) {
            self.on_sentinel_intersection(visible);
        }
    }
}

impl<T, K, B, S> core::fmt::Debug for VirtualList<T, K, B, S>
where
    K: PoolKey,
    B: RenderBoundary<K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("state", &self.state)
            .field("items", &self.items.len())
            .field("pooled", &self.pool.len())
            .field("layout", &self.layout)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
