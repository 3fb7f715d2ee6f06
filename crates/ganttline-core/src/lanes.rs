//! Lane assignment.
//!
//! Partitions items into the fewest horizontal lanes such that no two items
//! in a lane overlap. Lanes are derived from the item list on every call and
//! never stored; an item's lane index is only meaningful for the snapshot it
//! was computed from.

use chrono::NaiveDate;
use serde::Serialize;

use crate::item::{ItemId, TimelineItem};

/// Ordered lanes borrowed from an item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Lanes<'a> {
    lanes: Vec<Vec<&'a TimelineItem>>,
}

impl<'a> Lanes<'a> {
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Items of lane `index`, start-ascending. Out-of-range lanes are empty.
    pub fn lane(&self, index: usize) -> &[&'a TimelineItem] {
        self.lanes.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[&'a TimelineItem]> {
        self.lanes.iter().map(Vec::as_slice)
    }

    /// Lane currently holding `id`.
    pub fn lane_of(&self, id: ItemId) -> Option<usize> {
        self.lanes
            .iter()
            .position(|lane| lane.iter().any(|item| item.id == id))
    }
}

/// Greedy interval partitioning.
///
/// Items are visited by ascending start (stable, so ties keep input order)
/// and placed in the first lane whose last end is strictly before the
/// item's start; otherwise a new lane is opened. Given start-sorted input
/// this yields the minimum number of lanes.
pub fn assign_lanes(items: &[TimelineItem]) -> Lanes<'_> {
    let mut sorted: Vec<&TimelineItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.start);

    let mut lanes: Vec<Vec<&TimelineItem>> = Vec::new();
    let mut lane_ends: Vec<NaiveDate> = Vec::new();

    for item in sorted {
        match lane_ends.iter().position(|&end| end < item.start) {
            Some(index) => {
                lanes[index].push(item);
                lane_ends[index] = item.end;
            }
            None => {
                lanes.push(vec![item]);
                lane_ends.push(item.end);
            }
        }
    }

    tracing::debug!(items = items.len(), lanes = lanes.len(), "assigned lanes");
    Lanes { lanes }
}
