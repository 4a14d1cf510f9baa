// Example: a headless timeline driven through a simulated host.
//
// Run with `--features tracing` to see the list's own trace output.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use coho_virtual_list_adapter::{
    ListConfig, RenderBoundary, RenderError, ScrollBehavior, ScrollContainer, SizeChange,
    VirtualList, VirtualListOptions,
};

#[derive(Clone, Debug)]
struct Post {
    id: u64,
    text: String,
}

/// Keeps rendered posts in a flat list, standing in for DOM nodes.
#[derive(Default)]
struct Surface {
    live: usize,
    created: usize,
    content_height: u64,
}

struct Card {
    text: String,
}

impl RenderBoundary<u64> for Surface {
    type Content = String;
    type Node = Card;

    fn create(&mut self, _key: &u64, content: String) -> Result<Card, RenderError> {
        self.live += 1;
        self.created += 1;
        Ok(Card { text: content })
    }

    fn place(&mut self, card: &mut Card, index: usize, top: u64) {
        if index % 10 == 0 {
            println!("  place #{index} at {top}: {}", card.text);
        }
    }

    fn destroy(&mut self, _key: &u64, _card: Card) {
        self.live -= 1;
    }

    fn set_content_height(&mut self, height: u64) {
        self.content_height = height;
    }
}

#[derive(Default)]
struct Viewport {
    scroll_top: u64,
    height: u32,
    frame_pending: bool,
}

impl ScrollContainer for Viewport {
    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, scroll_top: u64) {
        self.scroll_top = scroll_top;
    }

    fn scroll_by(&mut self, delta: i64) {
        self.scroll_top = self.scroll_top.saturating_add_signed(delta);
    }

    fn viewport_height(&self) -> u32 {
        self.height
    }

    fn request_frame(&mut self) {
        self.frame_pending = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }
}

fn page(from: u64, len: u64) -> Vec<Post> {
    (from..from + len)
        .map(|id| Post {
            id,
            text: format!("post {id}: {}", "lorem ipsum ".repeat((id % 7) as usize + 1)),
        })
        .collect()
}

// Rendered height grows with the text, like wrapped lines would.
fn rendered_height(post: &Post) -> u32 {
    120 + post.text.len() as u32 * 2
}

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .init();

    let requests = Arc::new(AtomicUsize::new(0));
    let options = VirtualListOptions::new(
        |post: &Post, _index: usize| post.text.clone(),
        |post: &Post| post.id,
    )
    .with_config(ListConfig::default())
    .with_on_load_more(Some({
        let requests = Arc::clone(&requests);
        move || {
            requests.fetch_add(1, Ordering::Relaxed);
        }
    }));

    let mut list: VirtualList<Post, u64, Surface, Viewport> =
        match VirtualList::new(options, Surface::default()) {
            Ok(list) => list,
            Err(err) => {
                eprintln!("invalid list config: {err}");
                return;
            }
        };
    list.set_items(page(0, 40));
    list.connect(Some(Viewport {
        height: 900,
        ..Viewport::default()
    }));

    let mut now = 0;
    for _ in 0..3 {
        let mut loaded = list.items().len() as u64;
        while requests.load(Ordering::Relaxed) as u64 * 40 < loaded {
            now += 16;

            // The host measures every realized post once it is laid out.
            let measured: Vec<_> = list
                .items()
                .iter()
                .filter(|post| list.pool().contains(&post.id))
                .map(|post| SizeChange {
                    key: post.id,
                    height: rendered_height(post),
                })
                .collect();
            list.on_item_resize(&measured);

            let next = list.scroll_top() + 700;
            let max = list.layout().max_scroll_offset();
            if let Some(viewport) = list.scroll_container_mut() {
                viewport.scroll_top = next.min(max);
            }
            list.on_scroll();
            list.on_frame(now);
        }

        println!(
            "load more at scroll_top={} total_height={} live={} created={}",
            list.scroll_top(),
            list.total_height(),
            list.boundary().live,
            list.boundary().created,
        );
        list.set_loading(true);
        let mut items = list.items().to_vec();
        items.extend(page(loaded, 40));
        loaded += 40;
        list.set_items(items);
        list.set_loading(false);
        println!("  now {loaded} posts");
    }

    list.scroll_to_top(ScrollBehavior::Smooth);
    while list.is_animating() {
        now += 16;
        list.on_frame(now);
    }
    println!(
        "back at top: scroll_top={} range={:?} surface={}px",
        list.scroll_top(),
        list.visible_range(),
        list.boundary().content_height
    );

    list.disconnect();
    println!("disconnected: live={}", list.boundary().live);
}
