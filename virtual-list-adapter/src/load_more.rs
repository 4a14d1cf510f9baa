/// Default distance, in pixels, at which the end-of-list sentinel starts to count as visible.
pub const DEFAULT_LOAD_MORE_THRESHOLD: u32 = 500;

/// Single-fire guard for the "load more" signal.
///
/// A request is in flight from the moment the trigger fires until the host's loading flag drops
/// from `true` back to `false`. Whether the host's load succeeded does not matter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadMoreTrigger {
    in_flight: bool,
    host_loading: bool,
}

impl LoadMoreTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a sentinel intersection event. Returns `true` when the signal should fire.
    pub fn on_intersection(
        &mut self,
        is_intersecting: bool,
        item_count: usize,
        host_loading: bool,
    ) -> bool {
        if !is_intersecting || self.in_flight || host_loading || item_count == 0 {
            return false;
        }
        self.in_flight = true;
        vdebug!(item_count, "LoadMoreTrigger: fire");
        true
    }

    /// Records the host's loading flag. Returns `true` when the flag dropped from `true` to
    /// `false`, which also re-arms the trigger.
    ///
    /// Intersections dropped while the host was loading are not replayed here; the caller
    /// re-checks the sentinel on that edge.
    pub fn set_host_loading(&mut self, loading: bool) -> bool {
        let was_loading = core::mem::replace(&mut self.host_loading, loading);
        if !was_loading || loading {
            return false;
        }
        if core::mem::take(&mut self.in_flight) {
            vtrace!("LoadMoreTrigger: re-armed");
        }
        true
    }

    pub fn host_loading(&self) -> bool {
        self.host_loading
    }

    /// `true` between a fire and the host finishing its load.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Geometric sentinel test for hosts without a native intersection observer.
///
/// The sentinel is a zero-height point at the bottom of the content. It intersects when it lies
/// within the viewport grown by `threshold` on both sides.
pub fn sentinel_intersects(
    scroll_top: u64,
    viewport_height: u32,
    content_height: u64,
    threshold: u32,
) -> bool {
    let lower = scroll_top.saturating_sub(threshold as u64);
    let upper = scroll_top
        .saturating_add(viewport_height as u64)
        .saturating_add(threshold as u64);
    (lower..=upper).contains(&content_height)
}
