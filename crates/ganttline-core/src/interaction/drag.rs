//! Drag-to-move.
//!
//! A drag keeps the pointer's horizontal offset inside the item, snaps the
//! item's left edge to the day grid while moving, and on release turns the
//! snapped position into new dates with the duration unchanged. A release
//! over a different lane goes through the gap finder first.

use chrono::NaiveDate;
use serde::Serialize;

use super::{LaneBands, Point};
use crate::coords::{date_at_offset, day_at_round, item_geometry, snap_to_grid, DateRange};
use crate::item::{ItemId, ItemPatch, TimelineItem};
use crate::lanes::Lanes;
use crate::overlap::{GapFinder, LaneMove};

/// Snapped drag position shown while the pointer moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragPreview {
    pub left: f64,
    pub width: f64,
    /// Lane under the pointer, if any.
    pub lane: Option<usize>,
}

/// How the lane was settled on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaneChange {
    /// Released over the original lane or outside every lane.
    Unchanged,
    /// Moved into the target lane at the dropped dates.
    Moved,
    /// Moved into the target lane after shifting forward `days` days.
    Shifted { days: u32 },
    /// Target lane too crowded; dates applied, lane kept.
    Rejected { target: usize },
}

/// Final proposal of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragOutcome {
    pub id: ItemId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lane_index: usize,
    pub lane_change: LaneChange,
}

impl DragOutcome {
    pub fn to_patch(&self) -> ItemPatch {
        ItemPatch::new(self.id)
            .with_dates(self.start, self.end)
            .with_lane(self.lane_index)
    }
}

/// An in-progress drag of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    item: TimelineItem,
    origin_lane: usize,
    drag_offset: f64,
}

impl DragSession {
    /// Start dragging `item` from `origin_lane`.
    ///
    /// `pointer` and `origin` share the host's coordinate space;
    /// the pointer's offset from the item's left edge is kept for the drag.
    pub fn begin(
        item: &TimelineItem,
        origin_lane: usize,
        pointer: Point,
        origin: Point,
        range: &DateRange,
        day_width: f64,
    ) -> Self {
        let geometry = item_geometry(item, range.start_date, day_width);
        Self {
            item: item.clone(),
            origin_lane,
            drag_offset: pointer.x - origin.x - geometry.left,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item.id
    }

    pub fn origin_lane(&self) -> usize {
        self.origin_lane
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    fn candidate_left(&self, pointer: Point, origin: Point) -> f64 {
        pointer.x - origin.x - self.drag_offset
    }

    /// Preview position for the current pointer. Does not touch the item.
    pub fn preview(
        &self,
        pointer: Point,
        origin: Point,
        day_width: f64,
        bands: &LaneBands,
    ) -> DragPreview {
        let relative = pointer.relative_to(origin);
        DragPreview {
            left: snap_to_grid(self.candidate_left(pointer, origin), day_width),
            width: (self.item.duration_days() + 1) as f64 * day_width,
            lane: bands.hit(relative.y),
        }
    }

    /// Settle the drag at `pointer`.
    ///
    /// The lane under the pointer (or the original lane when outside every
    /// band) is the target. A different target lane is resolved against
    /// `lanes`, the snapshot the drag started from. `None` when the drop
    /// maps outside the representable calendar.
    pub fn finish(
        &self,
        pointer: Point,
        origin: Point,
        day_width: f64,
        range: &DateRange,
        lanes: &Lanes<'_>,
        bands: &LaneBands,
        finder: &GapFinder,
    ) -> Option<DragOutcome> {
        let day = day_at_round(self.candidate_left(pointer, origin), day_width);
        let start = range.date_at(day)?;
        let end = date_at_offset(start, self.item.duration_days())?;

        let target = bands
            .hit(pointer.relative_to(origin).y)
            .unwrap_or(self.origin_lane);

        let unchanged = DragOutcome {
            id: self.item.id,
            start,
            end,
            lane_index: self.origin_lane,
            lane_change: LaneChange::Unchanged,
        };
        if target == self.origin_lane {
            return Some(unchanged);
        }

        let moved = TimelineItem {
            start,
            end,
            ..self.item.clone()
        };
        let outcome = match finder.resolve(&moved, lanes.lane(target)) {
            LaneMove::Fits => DragOutcome {
                lane_index: target,
                lane_change: LaneChange::Moved,
                ..unchanged
            },
            LaneMove::Shifted { start, end, days } => DragOutcome {
                start,
                end,
                lane_index: target,
                lane_change: LaneChange::Shifted { days },
                ..unchanged
            },
            LaneMove::Rejected => DragOutcome {
                lane_change: LaneChange::Rejected { target },
                ..unchanged
            },
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::date_range;
    use crate::item::test_item;
    use crate::lanes::assign_lanes;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    const ORIGIN: Point = Point { x: 100.0, y: 50.0 };

    #[test]
    fn preview_snaps_to_day_grid() {
        let items = vec![test_item(1, "2024-03-10", "2024-03-12")];
        let range = date_range(&items, 5).unwrap();
        let bands = LaneBands::uniform(1, 60.0, 0.0);
        // Item left edge sits at 5 days * 20px = 100px from the origin.
        let session = DragSession::begin(&items[0], 0, Point::new(215.0, 70.0), ORIGIN, &range, 20.0);
        assert_eq!(session.drag_offset(), 15.0);

        let preview = session.preview(Point::new(247.0, 80.0), ORIGIN, 20.0, &bands);
        assert_eq!(preview.left, 140.0);
        assert_eq!(preview.width, 60.0);
        assert_eq!(preview.lane, Some(0));

        let outside = session.preview(Point::new(247.0, 400.0), ORIGIN, 20.0, &bands);
        assert_eq!(outside.lane, None);
    }

    #[test]
    fn drop_in_same_lane_moves_dates_only() {
        let items = vec![test_item(1, "2024-03-10", "2024-03-12")];
        let range = date_range(&items, 5).unwrap();
        let lanes = assign_lanes(&items);
        let bands = LaneBands::uniform(1, 60.0, 0.0);
        let session = DragSession::begin(&items[0], 0, Point::new(210.0, 70.0), ORIGIN, &range, 20.0);

        let outcome = session.finish(
            Point::new(270.0, 60.0),
            ORIGIN,
            20.0,
            &range,
            &lanes,
            &bands,
            &GapFinder::new(),
        )
        .unwrap();
        assert_eq!(outcome.start, date("2024-03-13"));
        assert_eq!(outcome.end, date("2024-03-15"));
        assert_eq!(outcome.lane_index, 0);
        assert_eq!(outcome.lane_change, LaneChange::Unchanged);
    }

    #[test]
    fn drop_into_crowded_lane_shifts_forward() {
        let items = vec![
            test_item(1, "2024-03-01", "2024-03-10"),
            test_item(2, "2024-03-02", "2024-03-03"),
        ];
        let range = date_range(&items, 5).unwrap();
        let lanes = assign_lanes(&items);
        assert_eq!(lanes.lane_of(items[1].id), Some(1));
        let bands = LaneBands::uniform(lanes.len(), 60.0, 0.0);

        // Grab item 2 at its left edge (day 6 -> 120px) and drop it on lane 0 unchanged in x.
        let session = DragSession::begin(&items[1], 1, Point::new(220.0, 140.0), ORIGIN, &range, 20.0);
        let outcome = session.finish(
            Point::new(220.0, 60.0),
            ORIGIN,
            20.0,
            &range,
            &lanes,
            &bands,
            &GapFinder::new(),
        )
        .unwrap();
        assert_eq!(outcome.lane_change, LaneChange::Shifted { days: 9 });
        assert_eq!(outcome.start, date("2024-03-11"));
        assert_eq!(outcome.end, date("2024-03-12"));
        assert_eq!(outcome.lane_index, 0);

        let patch = outcome.to_patch();
        assert_eq!(patch.lane_index, Some(0));
        assert_eq!(patch.start, Some(date("2024-03-11")));
    }

    #[test]
    fn rejected_lane_keeps_original_lane_but_applies_dates() {
        let items = vec![
            test_item(1, "2024-03-01", "2024-05-01"),
            test_item(2, "2024-03-02", "2024-03-03"),
        ];
        let range = date_range(&items, 5).unwrap();
        let lanes = assign_lanes(&items);
        let bands = LaneBands::uniform(lanes.len(), 60.0, 0.0);

        let session = DragSession::begin(&items[1], 1, Point::new(220.0, 140.0), ORIGIN, &range, 20.0);
        let outcome = session.finish(
            Point::new(240.0, 60.0),
            ORIGIN,
            20.0,
            &range,
            &lanes,
            &bands,
            &GapFinder::new(),
        )
        .unwrap();
        assert_eq!(outcome.lane_change, LaneChange::Rejected { target: 0 });
        assert_eq!(outcome.lane_index, 1);
        assert_eq!(outcome.start, date("2024-03-03"));
        assert_eq!(outcome.end, date("2024-03-04"));
    }

    #[test]
    fn drop_outside_the_calendar_is_dropped() {
        let items = vec![test_item(1, "2024-03-10", "2024-03-12")];
        let range = date_range(&items, 5).unwrap();
        let lanes = assign_lanes(&items);
        let bands = LaneBands::uniform(1, 60.0, 0.0);
        let session = DragSession::begin(&items[0], 0, Point::new(210.0, 70.0), ORIGIN, &range, 20.0);

        for x in [f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            let outcome = session.finish(
                Point::new(x, 60.0),
                ORIGIN,
                20.0,
                &range,
                &lanes,
                &bands,
                &GapFinder::new(),
            );
            assert!(outcome.is_none());
        }
    }
}
