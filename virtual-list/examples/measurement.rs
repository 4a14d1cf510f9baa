// Example: estimated heights replaced by measurements as posts render.
use coho_virtual_list::{LayoutOptions, ListLayout, SUB_PIXEL_TOLERANCE};

fn main() {
    let mut layout = ListLayout::new(
        LayoutOptions::new(200, 400)
            .with_overscan(2)
            .with_initial_viewport_height(800),
    );
    layout.set_scroll_top(4_000);
    println!(
        "estimated: total={} range={:?}",
        layout.total_height(),
        layout.visible_range()
    );

    // A post above the viewport turned out taller than estimated. The host scrolls by the
    // returned delta to keep the visible posts where they were.
    let delta = layout.measure(3, 650);
    layout.scroll_by(delta);
    println!("measure(3): delta={delta} scroll_top={}", layout.scroll_top());

    // Differences within the tolerance are layout rounding and change nothing.
    let noise = layout.measure(4, 400 + SUB_PIXEL_TOLERANCE);
    println!("measure(4): delta={noise}");

    // A batch rebuilds offsets once.
    let batch = layout.measure_many((10..14).map(|i| (i, 380)));
    println!(
        "measure_many: delta={batch} total={} range={:?}",
        layout.total_height(),
        layout.visible_range()
    );
}
