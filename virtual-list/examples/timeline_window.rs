// Example: which posts of a long timeline are realized, and where.
use coho_virtual_list::{Align, LayoutOptions, ListLayout};

fn main() {
    let mut layout = ListLayout::new(
        LayoutOptions::new(10_000, 400)
            .with_overscan(5)
            .with_initial_viewport_height(900),
    );
    layout.set_scroll_top(1_234_567);

    let mut items = Vec::new();
    layout.collect_items(&mut items);
    println!("total_height={}", layout.total_height());
    println!("visible={:?}", layout.strict_visible_range());
    println!("realized={:?}", layout.visible_range());
    println!("first={:?}", items.first());

    let top = layout.scroll_to_index_offset(9_999, Align::End).unwrap_or(0);
    layout.set_scroll_top(top);
    println!("after scroll_to_index_offset(9999, End): scroll_top={}", layout.scroll_top());
}
