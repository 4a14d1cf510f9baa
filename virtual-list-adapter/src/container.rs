/// The scrollable element hosting the list.
pub trait ScrollContainer {
    fn scroll_top(&self) -> u64;

    fn set_scroll_top(&mut self, scroll_top: u64);

    /// Scrolls instantly by a signed delta.
    fn scroll_by(&mut self, delta: i64);

    fn viewport_height(&self) -> u32;

    /// Asks the host to call [`crate::VirtualList::on_frame`] on the next animation frame.
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);
}
