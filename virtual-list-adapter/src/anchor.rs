use coho_virtual_list::ListLayout;

/// Scroll position expressed relative to an item identity instead of an absolute offset.
///
/// Capture one before prepending newer posts to a timeline and apply it after the item count
/// changed: the item that was at the top of the viewport stays there.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// Distance from the anchor item's top edge to the scroll position.
    pub offset_in_item: u64,
}

/// Anchors on the first visible item.
///
/// `key_at` maps an index of the current dataset to its key. Returns `None` for an empty
/// layout.
pub fn capture_anchor<K>(
    layout: &ListLayout,
    key_at: impl FnOnce(usize) -> Option<K>,
) -> Option<ScrollAnchor<K>> {
    let index = layout.index_at_offset(layout.scroll_top())?;
    let item = layout.item(index)?;
    Some(ScrollAnchor {
        key: key_at(index)?,
        offset_in_item: layout.scroll_top().saturating_sub(item.top),
    })
}

/// Moves `layout`'s scroll position so the anchor item sits where it was captured.
///
/// `index_of` maps a key to its index in the new dataset. Returns the new (clamped) scroll
/// position, or `None` when the key is gone.
pub fn apply_anchor<K>(
    layout: &mut ListLayout,
    anchor: &ScrollAnchor<K>,
    index_of: impl FnOnce(&K) -> Option<usize>,
) -> Option<u64> {
    let index = index_of(&anchor.key)?;
    let item = layout.item(index)?;
    layout.set_scroll_top_clamped(item.top.saturating_add(anchor.offset_in_item));
    Some(layout.scroll_top())
}
