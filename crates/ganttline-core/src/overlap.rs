//! Overlap resolution for cross-lane moves.
//!
//! When an item is dropped into another lane, it either fits where it is,
//! fits after a short forward shift that keeps its duration, or the move is
//! rejected because the lane is too crowded within the search bound.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::{ranges_overlap, ItemId, TimelineItem};

/// Default forward-search bound in days.
pub const DEFAULT_GAP_SEARCH_DAYS: u32 = 30;

/// Outcome of moving an item into a target lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LaneMove {
    /// No collision; the item keeps its dates.
    Fits,
    /// Collision resolved by moving the item forward `days` days.
    Shifted {
        start: NaiveDate,
        end: NaiveDate,
        days: u32,
    },
    /// No overlap-free slot within the bound; the caller keeps the prior lane.
    Rejected,
}

impl LaneMove {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Dates to commit for `item`, or `None` when rejected.
    pub fn dates_for(&self, item: &TimelineItem) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Self::Fits => Some((item.start, item.end)),
            Self::Shifted { start, end, .. } => Some((start, end)),
            Self::Rejected => None,
        }
    }
}

/// True if `[start, end]` intersects any lane member other than `exclude`.
pub fn collides(
    start: NaiveDate,
    end: NaiveDate,
    exclude: ItemId,
    lane: &[&TimelineItem],
) -> bool {
    lane.iter()
        .filter(|other| other.id != exclude)
        .any(|other| ranges_overlap(start, end, other.start, other.end))
}

/// Bounded forward search for an overlap-free placement.
#[derive(Debug, Clone, Copy)]
pub struct GapFinder {
    max_shift_days: u32,
}

impl GapFinder {
    /// Create a finder with the default 30-day bound.
    pub fn new() -> Self {
        Self {
            max_shift_days: DEFAULT_GAP_SEARCH_DAYS,
        }
    }

    /// Set the maximum number of days probed.
    pub fn with_max_shift(mut self, days: u32) -> Self {
        self.max_shift_days = days;
        self
    }

    pub fn max_shift_days(&self) -> u32 {
        self.max_shift_days
    }

    /// Resolve a move of `item` into `target_lane`.
    ///
    /// Probes offsets `1..=max_shift_days` from the item's current start and
    /// returns the first one where the shifted window collides with nothing.
    pub fn resolve(&self, item: &TimelineItem, target_lane: &[&TimelineItem]) -> LaneMove {
        if !collides(item.start, item.end, item.id, target_lane) {
            return LaneMove::Fits;
        }

        for days in 1..=self.max_shift_days {
            let Some((start, end)) = item.shifted(i64::from(days)) else {
                break;
            };
            if !collides(start, end, item.id, target_lane) {
                tracing::debug!(item = %item.id, days, "found gap in target lane");
                return LaneMove::Shifted { start, end, days };
            }
        }

        tracing::warn!(
            item = %item.id,
            bound = self.max_shift_days,
            "target lane has no gap within search bound"
        );
        LaneMove::Rejected
    }
}

impl Default for GapFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to resolve with the default bound
pub fn resolve_lane_move(item: &TimelineItem, target_lane: &[&TimelineItem]) -> LaneMove {
    GapFinder::new().resolve(item, target_lane)
}
