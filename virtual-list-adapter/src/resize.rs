use coho_virtual_list::ListLayout;

use crate::{ItemPool, PoolKey};

/// Default limit on a single scroll compensation, in pixels.
pub const DEFAULT_MAX_SCROLL_COMPENSATION: u64 = 2000;

/// A measured item height reported by the host's size observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeChange<K> {
    pub key: K,
    pub height: u32,
}

/// What to do with a compensation at or beyond the limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OversizedCompensation {
    /// Skip the scroll adjustment entirely.
    #[default]
    Discard,
    /// Adjust by the limit, keeping the sign.
    Clamp,
}

/// Result of one resize batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    /// At least one height changed; offsets were rebuilt.
    pub heights_changed: bool,
    /// Number of entries whose height was updated.
    pub measured: usize,
    /// Scroll delta to apply to the container. Zero when nothing needs compensating.
    pub compensation: i64,
    /// Part of the accumulated delta that the oversized policy dropped.
    pub discarded: i64,
}

/// Turns item measurements into height-table updates and a scroll correction.
///
/// Items above the first visible item push visible content down when they grow. Scrolling by
/// the accumulated delta keeps what the user is reading in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeController {
    max_compensation: u64,
    oversized: OversizedCompensation,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCROLL_COMPENSATION, OversizedCompensation::default())
    }
}

impl ResizeController {
    pub fn new(max_compensation: u64, oversized: OversizedCompensation) -> Self {
        Self {
            max_compensation,
            oversized,
        }
    }

    pub fn max_compensation(&self) -> u64 {
        self.max_compensation
    }

    pub fn oversized(&self) -> OversizedCompensation {
        self.oversized
    }

    /// Applies a batch of measurements.
    ///
    /// `layout`'s scroll position must be the container's current one: the first visible index
    /// is derived from it before any height changes. Keys that are not pooled are skipped.
    pub fn apply_batch<K: PoolKey, N>(
        &self,
        layout: &mut ListLayout,
        pool: &ItemPool<K, N>,
        changes: &[SizeChange<K>],
    ) -> ResizeOutcome {
        let first_visible = layout.first_visible_index();
        let count = layout.count();
        let table = layout.heights_mut();

        let mut outcome = ResizeOutcome::default();
        let mut pending = 0i64;
        for change in changes {
            let Some(index) = pool.index_of(&change.key) else {
                continue;
            };
            if index >= count {
                continue;
            }
            let delta = table.set_height(index, change.height);
            if delta == 0 {
                continue;
            }
            outcome.measured += 1;
            if index < first_visible {
                pending += delta;
            }
        }

        if outcome.measured == 0 {
            return outcome;
        }
        table.recompute_offsets();
        outcome.heights_changed = true;

        let (applied, discarded) = self.limit(pending);
        outcome.compensation = applied;
        outcome.discarded = discarded;
        if discarded != 0 {
            vdebug!(
                pending,
                applied,
                limit = self.max_compensation,
                "ResizeController: oversized compensation"
            );
        }
        vtrace!(
            first_visible,
            measured = outcome.measured,
            compensation = applied,
            "ResizeController::apply_batch"
        );
        outcome
    }

    /// Splits a pending delta into the part to apply and the part to drop.
    pub fn limit(&self, pending: i64) -> (i64, i64) {
        if pending.unsigned_abs() < self.max_compensation {
            return (pending, 0);
        }
        match self.oversized {
            OversizedCompensation::Discard => (0, pending),
            OversizedCompensation::Clamp => {
                let limit = i64::try_from(self.max_compensation).unwrap_or(i64::MAX);
                let applied = limit * pending.signum();
                (applied, pending - applied)
            }
        }
    }
}
