/// The imperative surface items are rendered into.
///
/// The pool calls `create` once per newly visible key, `place` whenever the item's index or top
/// offset changes, and `destroy` when the key leaves the window. Nodes are positioned absolutely
/// by `top`; their order among siblings carries no meaning.
pub trait RenderBoundary<K> {
    /// What `render_item` produces for one item.
    type Content;
    /// Handle to one realized item.
    type Node;

    fn create(&mut self, key: &K, content: Self::Content) -> Result<Self::Node, crate::RenderError>;

    fn place(&mut self, node: &mut Self::Node, index: usize, top: u64);

    fn destroy(&mut self, key: &K, node: Self::Node);

    /// Starts size observation for a realized node. Measurements come back through
    /// [`crate::VirtualList::on_item_resize`].
    fn observe(&mut self, _key: &K, _node: &Self::Node) {}

    fn unobserve(&mut self, _key: &K, _node: &Self::Node) {}

    /// Sizes the scrollable spacer to the total content height.
    fn set_content_height(&mut self, height: u64);
}
