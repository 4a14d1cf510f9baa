/// Coalesces scroll events into at most one sync per animation frame.
///
/// Also carries the "ignore scroll events until the next frame" window opened after the list
/// scrolls the container itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FrameThrottle {
    requested: bool,
    sync_pending: bool,
    scroll_suppressed: bool,
}

impl FrameThrottle {
    /// Marks a sync as due. Returns `true` when the caller must request a frame.
    pub(crate) fn schedule_sync(&mut self) -> bool {
        self.sync_pending = true;
        self.request()
    }

    /// Opens the suppression window. Returns `true` when the caller must request a frame.
    pub(crate) fn suppress_scroll(&mut self) -> bool {
        self.scroll_suppressed = true;
        self.request()
    }

    /// Requests a frame without scheduling a sync. Returns `true` when one must be requested.
    pub(crate) fn request(&mut self) -> bool {
        !core::mem::replace(&mut self.requested, true)
    }

    pub(crate) fn is_scroll_suppressed(&self) -> bool {
        self.scroll_suppressed
    }

    /// Consumes a delivered frame: closes the suppression window and returns whether a sync
    /// was pending.
    pub(crate) fn begin_frame(&mut self) -> bool {
        self.requested = false;
        self.scroll_suppressed = false;
        core::mem::take(&mut self.sync_pending)
    }

    /// Forgets everything. Returns `true` when a requested frame must be cancelled.
    pub(crate) fn cancel(&mut self) -> bool {
        let requested = self.requested;
        *self = Self::default();
        requested
    }
}
