use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

// Builds a table holding exactly `heights`, including one-pixel differences that
// `set_height` would filter out.
fn build_exact(heights: &[u32]) -> HeightTable {
    HeightTable::from_heights(1, heights.iter().copied())
}

fn expected_offsets(heights: &[u32]) -> Vec<u64> {
    let mut out = Vec::with_capacity(heights.len());
    let mut top = 0u64;
    for &h in heights {
        out.push(top);
        top += h as u64;
    }
    out
}

fn linear_find_start(heights: &[u32], scroll_top: u64) -> usize {
    let mut top = 0u64;
    for (i, &h) in heights.iter().enumerate() {
        if top + h as u64 > scroll_top {
            return i;
        }
        top += h as u64;
    }
    heights.len().saturating_sub(1)
}

fn linear_find_end(heights: &[u32], viewport_bottom: u64) -> usize {
    let offsets = expected_offsets(heights);
    offsets
        .iter()
        .rposition(|&top| top < viewport_bottom)
        .unwrap_or(0)
}

fn random_heights(rng: &mut Lcg, len: usize) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range_u32(0, 900)).collect()
}

#[test]
fn initialize_seeds_estimates_and_offsets() {
    let mut table = HeightTable::new(400);
    table.initialize(3, 400);
    assert_eq!(table.heights(), &[400, 400, 400]);
    assert_eq!(table.offsets(), &[0, 400, 800]);
    assert_eq!(table.total_height(), 1_200);
    assert!(!table.needs_recompute());
}

#[test]
fn set_height_returns_signed_delta_and_defers_offsets() {
    let mut table = HeightTable::new(100);
    table.initialize(3, 100);

    assert_eq!(table.set_height(0, 250), 150);
    assert!(table.needs_recompute());
    // Offsets are stale until recomputed.
    assert_eq!(table.offset(1), Some(100));

    table.recompute_offsets();
    assert_eq!(table.offset(1), Some(250));
    assert_eq!(table.total_height(), 450);

    assert_eq!(table.set_height(1, 40), -60);
    table.recompute_offsets();
    assert_eq!(table.offsets(), &[0, 250, 290]);
}

#[test]
fn sub_pixel_deltas_are_ignored() {
    let mut table = HeightTable::new(100);
    table.initialize(2, 100);

    assert_eq!(table.set_height(0, 101), 0);
    assert_eq!(table.set_height(0, 99), 0);
    assert_eq!(table.set_height(0, 100), 0);
    assert_eq!(table.height(0), Some(100));
    assert!(!table.needs_recompute());

    assert_eq!(table.set_height(0, 102), 2);
    assert_eq!(table.height(0), Some(102));
}

#[test]
fn set_height_out_of_range_is_a_no_op() {
    let mut table = HeightTable::new(10);
    table.initialize(2, 10);
    assert_eq!(table.set_height(2, 500), 0);
    assert_eq!(table.set_height(usize::MAX, 500), 0);
    assert_eq!(table.total_height(), 20);
}

#[test]
fn grow_preserves_measurements_and_seeds_estimates() {
    let mut table = HeightTable::new(10);
    table.initialize(2, 10);
    table.set_height(0, 50);
    table.recompute_offsets();

    table.grow_to(4);
    assert_eq!(table.heights(), &[50, 10, 10, 10]);
    assert_eq!(table.offsets(), &[0, 50, 60, 70]);
    assert_eq!(table.total_height(), 80);

    // Growing to a smaller length does nothing.
    table.grow_to(1);
    assert_eq!(table.len(), 4);
}

#[test]
fn shrink_keeps_retained_measurements() {
    let mut table = HeightTable::new(10);
    table.initialize(4, 10);
    table.set_height(1, 30);
    table.recompute_offsets();

    table.shrink_to(2);
    assert_eq!(table.heights(), &[10, 30]);
    assert_eq!(table.total_height(), 40);

    table.shrink_to(0);
    assert!(table.is_empty());
    assert_eq!(table.total_height(), 0);

    table.grow_to(2);
    assert_eq!(table.heights(), &[10, 10]);
}

#[test]
fn estimate_change_only_affects_new_entries() {
    let mut table = HeightTable::new(10);
    table.initialize(2, 10);
    table.set_estimated_height(25);
    table.grow_to(3);
    assert_eq!(table.heights(), &[10, 10, 25]);
}

#[test]
fn find_start_and_find_end_on_uniform_heights() {
    let mut table = HeightTable::new(400);
    table.initialize(1_000, 400);

    assert_eq!(resolver::find_start(&table, 0), 0);
    assert_eq!(resolver::find_start(&table, 399), 0);
    assert_eq!(resolver::find_start(&table, 400), 1);
    assert_eq!(resolver::find_start(&table, 4_000), 10);

    assert_eq!(resolver::find_end(&table, 800), 1);
    assert_eq!(resolver::find_end(&table, 801), 2);
    assert_eq!(resolver::find_end(&table, 4_800), 11);

    // Past the end, both searches clamp to the last item.
    assert_eq!(resolver::find_start(&table, u64::MAX), 999);
    assert_eq!(resolver::find_end(&table, u64::MAX), 999);
}

#[test]
fn searches_on_empty_and_single_tables() {
    let empty = HeightTable::new(10);
    assert_eq!(resolver::find_start(&empty, 0), 0);
    assert_eq!(resolver::find_end(&empty, 100), 0);
    assert_eq!(resolver::resolve(&empty, 0, 100, 3), None);

    let mut single = HeightTable::new(10);
    single.initialize(1, 10);
    assert_eq!(resolver::find_start(&single, 5), 0);
    assert_eq!(resolver::find_start(&single, 50), 0);
    assert_eq!(resolver::find_end(&single, 0), 0);
    assert_eq!(
        resolver::resolve(&single, 0, 100, 3),
        Some(VisibleRange { first: 0, last: 0 })
    );
}

#[test]
fn find_end_with_no_qualifying_item_returns_zero() {
    let mut table = HeightTable::new(10);
    table.initialize(5, 10);
    // offset[0] = 0 is not < 0.
    assert_eq!(resolver::find_end(&table, 0), 0);
}

#[test]
fn zero_height_items_are_skipped_by_find_start() {
    let table = build_exact(&[0, 0, 10, 0, 10]);
    assert_eq!(table.offsets(), &[0, 0, 0, 10, 10]);
    assert_eq!(resolver::find_start(&table, 0), 2);
    assert_eq!(resolver::find_start(&table, 10), 4);
}

#[test]
fn resolve_clamps_overscan_to_bounds() {
    let mut table = HeightTable::new(10);
    table.initialize(20, 10);

    let r = resolver::resolve(&table, 0, 30, 5).unwrap();
    assert_eq!(r, VisibleRange { first: 0, last: 7 });

    let r = resolver::resolve(&table, 170, 30, 5).unwrap();
    assert_eq!(r, VisibleRange { first: 12, last: 19 });
    assert_eq!(r.len(), 8);
    assert!(r.contains(12) && r.contains(19) && !r.contains(11));
}

#[test]
fn resolve_never_returns_inverted_windows() {
    let mut table = HeightTable::new(10);
    table.initialize(5, 10);
    // Zero-height viewport and a scroll position past the end.
    let r = resolver::resolve_visible(&table, 500, 0).unwrap();
    assert!(r.first <= r.last);
    let r = resolver::resolve_visible(&table, 0, 0).unwrap();
    assert_eq!(r, VisibleRange { first: 0, last: 0 });
}

#[test]
fn timeline_scenario_thousand_posts() {
    // 1000 posts estimated at 400px, 800px viewport, overscan 2.
    let mut layout = ListLayout::new(
        LayoutOptions::new(1_000, 400)
            .with_overscan(2)
            .with_initial_viewport_height(800),
    );

    let strict = layout.strict_visible_range().unwrap();
    assert_eq!(strict, VisibleRange { first: 0, last: 1 });
    let r = layout.visible_range().unwrap();
    assert_eq!(r, VisibleRange { first: 0, last: 3 });

    layout.set_scroll_top(4_000);
    let strict = layout.strict_visible_range().unwrap();
    assert_eq!(strict, VisibleRange { first: 10, last: 11 });
    let r = layout.visible_range().unwrap();
    assert_eq!(r, VisibleRange { first: 8, last: 13 });
    assert!(r.contains(4_000 / 400));
}

#[test]
fn layout_set_count_preserves_and_clears() {
    let mut layout = ListLayout::new(LayoutOptions::new(2, 10));
    layout.measure(0, 40);
    layout.set_count(4);
    assert_eq!(layout.heights().heights(), &[40, 10, 10, 10]);
    assert_eq!(layout.total_height(), 70);

    layout.set_count(0);
    assert_eq!(layout.count(), 0);
    assert_eq!(layout.total_height(), 0);
    assert_eq!(layout.visible_range(), None);
    assert_eq!(layout.index_at_offset(0), None);
}

#[test]
fn measure_many_rebuilds_once() {
    let mut layout = ListLayout::new(LayoutOptions::new(4, 10));
    let delta = layout.measure_many([(0, 20), (3, 5), (9, 100), (1, 11)]);
    // (1, 11) is sub-pixel and index 9 is out of range.
    assert_eq!(delta, 10 - 5);
    assert!(!layout.heights().needs_recompute());
    assert_eq!(layout.heights().offsets(), &[0, 20, 30, 40]);
}

#[test]
fn scroll_to_index_offset_alignments() {
    let mut layout = ListLayout::new(LayoutOptions::new(10, 100).with_initial_viewport_height(300));

    assert_eq!(layout.scroll_to_index_offset(4, Align::Start), Some(400));
    assert_eq!(layout.scroll_to_index_offset(4, Align::End), Some(200));
    assert_eq!(layout.scroll_to_index_offset(4, Align::Center), Some(300));
    // Clamped to max scroll (1000 - 300).
    assert_eq!(layout.scroll_to_index_offset(9, Align::Start), Some(700));
    assert_eq!(layout.scroll_to_index_offset(10, Align::Start), None);

    layout.set_scroll_top(300);
    // Item 4 spans [400, 500) inside [300, 600).
    assert_eq!(layout.scroll_to_index_offset(4, Align::Auto), Some(300));
    assert_eq!(layout.scroll_to_index_offset(1, Align::Auto), Some(100));
    assert_eq!(layout.scroll_to_index_offset(7, Align::Auto), Some(500));
}

#[test]
fn scroll_by_saturates_at_zero() {
    let mut layout = ListLayout::new(LayoutOptions::new(10, 100));
    layout.set_scroll_top(50);
    assert_eq!(layout.scroll_by(-80), 0);
    assert_eq!(layout.scroll_by(120), 120);
}

#[test]
fn collect_items_matches_visible_range() {
    let mut layout = ListLayout::new(
        LayoutOptions::new(100, 10)
            .with_overscan(1)
            .with_initial_viewport_height(30),
    );
    layout.set_scroll_top(55);
    layout.measure(6, 20);

    let mut items = Vec::new();
    layout.collect_items(&mut items);
    let range = layout.visible_range().unwrap();
    assert_eq!(items.len(), range.len());
    assert_eq!(items.first().map(|it| it.index), Some(range.first));
    assert!(items.windows(2).all(|w| w[0].bottom() == w[1].top));
}

#[test]
fn frame_state_can_roundtrip() {
    let mut layout = ListLayout::new(LayoutOptions::new(100, 10).with_initial_viewport_height(50));
    layout.set_scroll_top(120);
    let snapshot = layout.frame_state();

    let mut restored = ListLayout::new(LayoutOptions::new(100, 10));
    restored.restore_frame_state(snapshot);
    assert_eq!(restored.frame_state(), snapshot);

    // Offsets beyond the content are clamped on restore.
    let mut short = ListLayout::new(LayoutOptions::new(5, 10));
    short.restore_frame_state(snapshot);
    assert_eq!(short.scroll_top(), 0);
}

#[test]
fn property_offsets_match_reference_across_sizes() {
    for (seed, len) in [(1u64, 0usize), (2, 1), (3, 100), (4, 10_000)] {
        let mut rng = Lcg::new(seed);
        let heights = random_heights(&mut rng, len);
        let table = build_exact(&heights);

        assert_eq!(table.offsets(), expected_offsets(&heights).as_slice());
        for i in 1..len {
            let step = table.offsets()[i] - table.offsets()[i - 1];
            assert_eq!(step, heights[i - 1] as u64);
        }
    }
}

#[test]
fn property_find_start_matches_linear_scan_across_sizes() {
    for (seed, len) in [(11u64, 0usize), (12, 1), (13, 100), (14, 10_000)] {
        let mut rng = Lcg::new(seed);
        let heights = random_heights(&mut rng, len);
        let table = build_exact(&heights);
        let total = table.total_height();

        let probes = if len >= 10_000 { 500 } else { 200 };
        for _ in 0..probes {
            let scroll_top = rng.gen_range_u64(0, total.saturating_add(1_000).max(1));
            assert_eq!(
                resolver::find_start(&table, scroll_top),
                linear_find_start(&heights, scroll_top),
                "scroll_top={scroll_top}"
            );
            assert_eq!(
                resolver::find_end(&table, scroll_top),
                linear_find_end(&heights, scroll_top),
                "viewport_bottom={scroll_top}"
            );
        }
    }
}

#[test]
fn property_random_measurements_keep_offsets_consistent() {
    for seed in [5u64, 77, 2024] {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 256);
        let mut layout = ListLayout::new(LayoutOptions::new(count, 50));
        let mut heights: Vec<u32> = (0..count).map(|_| 50).collect();

        for _ in 0..64 {
            let index = rng.gen_range_usize(0, count);
            let height = rng.gen_range_u32(0, 600);
            if layout.measure(index, height) != 0 {
                heights[index] = height;
            }
        }

        assert_eq!(layout.heights().heights(), heights.as_slice());
        assert_eq!(
            layout.heights().offsets(),
            expected_offsets(&heights).as_slice()
        );
        assert_eq!(
            layout.total_height(),
            heights.iter().map(|&h| h as u64).sum::<u64>()
        );
    }
}

mod prop {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offsets_are_non_decreasing(heights in proptest::collection::vec(0u32..2_000, 0..512)) {
            let table = build_exact(&heights);
            let offsets = table.offsets();
            prop_assert_eq!(offsets.len(), heights.len());
            if let Some(&first) = offsets.first() {
                prop_assert_eq!(first, 0);
            }
            for i in 1..offsets.len() {
                prop_assert!(offsets[i] >= offsets[i - 1]);
                prop_assert_eq!(offsets[i] - offsets[i - 1], heights[i - 1] as u64);
            }
        }

        #[test]
        fn find_start_matches_reference(
            heights in proptest::collection::vec(0u32..1_000, 0..512),
            scroll_top in 0u64..600_000,
        ) {
            let table = build_exact(&heights);
            prop_assert_eq!(
                resolver::find_start(&table, scroll_top),
                linear_find_start(&heights, scroll_top)
            );
        }

        #[test]
        fn resolved_window_is_within_bounds(
            heights in proptest::collection::vec(1u32..1_000, 1..256),
            scroll_top in 0u64..300_000,
            viewport in 0u32..2_000,
            overscan in 0usize..8,
        ) {
            let table = build_exact(&heights);
            let r = resolver::resolve(&table, scroll_top, viewport, overscan).unwrap();
            prop_assert!(r.first <= r.last);
            prop_assert!(r.last < heights.len());
            let strict = resolver::resolve_visible(&table, scroll_top, viewport).unwrap();
            prop_assert!(r.first <= strict.first && strict.last <= r.last);
            prop_assert!(strict.first - r.first <= overscan);
            prop_assert!(r.last - strict.last <= overscan);
        }
    }
}

#[test]
fn example_timeline_window_smoke() {
    let mut layout = ListLayout::new(
        LayoutOptions::new(10_000, 400)
            .with_overscan(5)
            .with_initial_viewport_height(900),
    );
    layout.set_scroll_top(1_234_567);

    let visible = layout.strict_visible_range().unwrap();
    assert_eq!((visible.first, visible.last), (3086, 3088));
    let range = layout.visible_range().unwrap();
    assert_eq!((range.first, range.last), (3081, 3093));

    let top = layout.scroll_to_index_offset(9_999, Align::End).unwrap();
    assert_eq!(top, 4_000_000 - 900);
}

#[test]
fn example_measurement_smoke() {
    let mut layout = ListLayout::new(
        LayoutOptions::new(200, 400)
            .with_overscan(2)
            .with_initial_viewport_height(800),
    );
    layout.set_scroll_top(4_000);

    let delta = layout.measure(3, 650);
    assert_eq!(delta, 250);
    assert_eq!(layout.scroll_by(delta), 4_250);
    assert_eq!(layout.first_visible_index(), 10);

    assert_eq!(layout.measure(4, 400 + SUB_PIXEL_TOLERANCE), 0);

    assert_eq!(layout.measure_many((10..14).map(|i| (i, 380))), -80);
    assert_eq!(layout.total_height(), 80_000 + 250 - 80);
}
