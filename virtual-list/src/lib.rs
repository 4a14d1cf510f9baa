//! Height tracking and visible-range resolution for virtualized timelines.
//!
//! For the keyed item pool, resize correction and load-more triggering, see the
//! `coho-virtual-list-adapter` crate.
//!
//! This crate holds the math behind Coho's timeline list: a per-item height table with
//! cumulative offsets, binary-search offset → index lookup, and overscanned visible windows.
//! It is UI-agnostic. A host layer is expected to provide:
//! - the viewport height
//! - the scroll offset
//! - an estimated item height and, as items render, their measured heights
//!
//! ```
//! use coho_virtual_list::{LayoutOptions, ListLayout};
//!
//! let mut layout = ListLayout::new(
//!     LayoutOptions::new(1_000, 400)
//!         .with_overscan(2)
//!         .with_initial_viewport_height(800),
//! );
//! let range = layout.visible_range().unwrap();
//! assert_eq!((range.first, range.last), (0, 3));
//!
//! layout.set_scroll_top(4_000);
//! let range = layout.visible_range().unwrap();
//! assert_eq!((range.first, range.last), (8, 13));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod heights;
mod layout;
mod options;
pub mod resolver;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use heights::{HeightTable, SUB_PIXEL_TOLERANCE};
pub use layout::ListLayout;
pub use options::{DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_OVERSCAN, LayoutOptions};
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{Align, ItemLayout, VisibleRange};
