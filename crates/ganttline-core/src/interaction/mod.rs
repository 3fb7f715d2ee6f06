//! Pointer interaction proposals.
//!
//! Every function here takes a snapshot (items, lanes, day width, pointer
//! position) and returns a proposed change. Nothing mutates the item list;
//! the owner decides whether to commit.
//!
//! All pointer positions are in the host's coordinate space. Functions that
//! need timeline-relative positions take the timeline `origin` explicitly.

mod create;
mod drag;
mod resize;
mod state;
mod throttle;

pub use create::{create_item_at, next_item_id};
pub use drag::{DragOutcome, DragPreview, DragSession, LaneChange};
pub use resize::{ResizeDirection, ResizeSession};
pub use state::{EditSession, InteractionState};
pub use throttle::Throttle;

use serde::{Deserialize, Serialize};

/// A pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point relative to `origin`.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Vertical extent of one lane, relative to the timeline origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneBand {
    pub top: f64,
    pub bottom: f64,
}

impl LaneBand {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// Vertical bounds of every lane, in lane order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneBands {
    bands: Vec<LaneBand>,
}

impl LaneBands {
    /// Bands measured by the host.
    pub fn from_bounds(bands: Vec<LaneBand>) -> Self {
        Self { bands }
    }

    /// `count` stacked lanes of equal height separated by `gap`.
    pub fn uniform(count: usize, lane_height: f64, gap: f64) -> Self {
        let bands = (0..count)
            .map(|i| {
                let top = i as f64 * (lane_height + gap);
                LaneBand {
                    top,
                    bottom: top + lane_height,
                }
            })
            .collect();
        Self { bands }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<LaneBand> {
        self.bands.get(index).copied()
    }

    /// First lane whose band contains `y`. Shared edges resolve to the upper lane.
    pub fn hit(&self, y: f64) -> Option<usize> {
        self.bands.iter().position(|band| band.contains(y))
    }
}
