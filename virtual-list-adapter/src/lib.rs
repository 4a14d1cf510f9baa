//! Host-facing layer of Coho's virtualized timeline list.
//!
//! `coho-virtual-list` answers "which items, and where". This crate turns those answers into
//! effects on a host surface:
//!
//! - [`ItemPool`] keeps one node per realized key and only creates, moves or destroys what
//!   changed.
//! - [`ResizeController`] folds measured heights into the layout and computes the scroll
//!   correction that keeps visible content still when items above it resize.
//! - [`LoadMoreTrigger`] fires the "load more" signal once per approach to the end of the list.
//! - [`VirtualList`] wires them to a [`RenderBoundary`] and a [`ScrollContainer`] supplied by the
//!   host, and throttles scroll handling to one sync per animation frame.
//!
//! Nothing here depends on a UI toolkit; hosts implement the two traits.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod container;
mod error;
mod frame;
mod key;
mod list;
mod load_more;
mod options;
mod pool;
mod render;
mod resize;
mod tween;


pub use anchor::{ScrollAnchor, apply_anchor, capture_anchor};
pub use container::ScrollContainer;
pub use error::{ConfigError, RenderError};
pub use key::PoolKey;
pub use list::{ListState, VirtualList};
pub use load_more::{DEFAULT_LOAD_MORE_THRESHOLD, LoadMoreTrigger, sentinel_intersects};
pub use options::{
    KeyCallback, ListConfig, LoadMoreCallback, RenderItemCallback, VirtualListOptions,
};
pub use pool::{ItemPool, PoolEntry, SyncStats, SyncTarget};
pub use render::RenderBoundary;
pub use resize::{
    DEFAULT_MAX_SCROLL_COMPENSATION, OversizedCompensation, ResizeController, ResizeOutcome,
    SizeChange,
};
pub use tween::{DEFAULT_SMOOTH_SCROLL_MS, Easing, ScrollBehavior, Tween};
