//! Property tests for lane assignment and overlap resolution.

use chrono::{Duration, NaiveDate};
use ganttline_core::interaction::{
    DragSession, LaneBands, LaneChange, Point, ResizeDirection, ResizeSession,
};
use ganttline_core::{assign_lanes, date_range, GapFinder, ItemId, LaneMove, TimelineItem};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn items_from(spans: &[(i64, i64)]) -> Vec<TimelineItem> {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(offset, len))| {
            let start = base() + Duration::days(offset);
            TimelineItem::try_new(ItemId(i as u64 + 1), start, start + Duration::days(len), "item")
                .unwrap()
        })
        .collect()
}

/// Sweep-line reference: the most items covering any single day.
fn max_simultaneous(items: &[TimelineItem]) -> usize {
    let mut events: Vec<(NaiveDate, i32)> = Vec::new();
    for item in items {
        events.push((item.start, 1));
        events.push((item.end + Duration::days(1), -1));
    }
    // Ends sort before starts on the same day: the range is inclusive, so an
    // item ending yesterday no longer covers today.
    events.sort_by_key(|&(day, delta)| (day, delta));
    let mut current = 0i32;
    let mut best = 0i32;
    for (_, delta) in events {
        current += delta;
        best = best.max(current);
    }
    best as usize
}

fn spans() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..90, 0i64..12), 0..40)
}

proptest! {
    #[test]
    fn no_lane_contains_overlapping_items(spans in spans()) {
        let items = items_from(&spans);
        let lanes = assign_lanes(&items);
        for lane in lanes.iter() {
            for (i, a) in lane.iter().enumerate() {
                for b in &lane[i + 1..] {
                    prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                }
            }
            for pair in lane.windows(2) {
                prop_assert!(pair[0].start <= pair[1].start);
            }
        }
    }

    #[test]
    fn lane_count_is_minimal(spans in spans()) {
        let items = items_from(&spans);
        prop_assert_eq!(assign_lanes(&items).len(), max_simultaneous(&items));
    }

    #[test]
    fn every_item_is_placed_exactly_once(spans in spans()) {
        let items = items_from(&spans);
        let lanes = assign_lanes(&items);
        let placed: usize = lanes.iter().map(|lane| lane.len()).sum();
        prop_assert_eq!(placed, items.len());
        for item in &items {
            prop_assert!(lanes.lane_of(item.id).is_some());
        }
    }

    #[test]
    fn assignment_is_deterministic(spans in spans()) {
        let items = items_from(&spans);
        prop_assert_eq!(assign_lanes(&items), assign_lanes(&items));
    }

    #[test]
    fn gap_finder_preserves_duration_and_bound(
        spans in prop::collection::vec((0i64..60, 0i64..10), 1..15),
        offset in 0i64..60,
        len in 0i64..8,
        bound in 0u32..40,
    ) {
        let lane_items = items_from(&spans);
        let lanes = assign_lanes(&lane_items);
        let start = base() + Duration::days(offset);
        let moving = TimelineItem::try_new(ItemId(1000), start, start + Duration::days(len), "moving")
            .unwrap();

        let finder = GapFinder::new().with_max_shift(bound);
        match finder.resolve(&moving, lanes.lane(0)) {
            LaneMove::Fits => {
                prop_assert!(lanes.lane(0).iter().all(|other| !moving.overlaps(other)));
            }
            LaneMove::Shifted { start, end, days } => {
                prop_assert!(days >= 1 && days <= bound);
                prop_assert_eq!((end - start).num_days(), moving.duration_days());
                prop_assert_eq!((start - moving.start).num_days(), i64::from(days));
                let shifted = TimelineItem { start, end, ..moving.clone() };
                prop_assert!(lanes.lane(0).iter().all(|other| !shifted.overlaps(other)));
            }
            LaneMove::Rejected => {
                for days in 0..=i64::from(bound) {
                    let (s, e) = moving.shifted(days).unwrap();
                    let probe = TimelineItem { start: s, end: e, ..moving.clone() };
                    prop_assert!(lanes.lane(0).iter().any(|other| probe.overlaps(other)));
                }
            }
        }
    }

    #[test]
    fn drag_release_preserves_duration(
        spans in prop::collection::vec((0i64..60, 0i64..10), 1..15),
        pick in any::<prop::sample::Index>(),
        grab_x in 0.0f64..1500.0,
        drop_x in -500.0f64..3000.0,
        drop_y in -50.0f64..600.0,
    ) {
        let items = items_from(&spans);
        let lanes = assign_lanes(&items);
        let range = date_range(&items, 5).unwrap();
        let bands = LaneBands::uniform(lanes.len(), 60.0, 0.0);
        let day_width = 20.0;
        let origin = Point::new(0.0, 0.0);

        let item = &items[pick.index(items.len())];
        let origin_lane = lanes.lane_of(item.id).unwrap();
        let grab = Point::new(grab_x, origin_lane as f64 * 60.0 + 30.0);
        let session = DragSession::begin(item, origin_lane, grab, origin, &range, day_width);

        let outcome = session
            .finish(Point::new(drop_x, drop_y), origin, day_width, &range, &lanes, &bands, &GapFinder::new())
            .unwrap();
        prop_assert_eq!(outcome.id, item.id);
        prop_assert_eq!((outcome.end - outcome.start).num_days(), item.duration_days());

        let moved = TimelineItem { start: outcome.start, end: outcome.end, ..item.clone() };
        match outcome.lane_change {
            LaneChange::Unchanged => prop_assert_eq!(outcome.lane_index, origin_lane),
            LaneChange::Rejected { target } => {
                prop_assert_ne!(target, origin_lane);
                prop_assert_eq!(outcome.lane_index, origin_lane);
            }
            LaneChange::Moved | LaneChange::Shifted { .. } => {
                prop_assert_ne!(outcome.lane_index, origin_lane);
                let target = lanes.lane(outcome.lane_index);
                prop_assert!(target.iter().all(|other| other.id == item.id || !moved.overlaps(other)));
                if let LaneChange::Shifted { days } = outcome.lane_change {
                    prop_assert!(days >= 1 && days <= 30);
                }
            }
        }
    }

    #[test]
    fn accepted_resizes_never_collapse(
        offset in 0i64..30,
        len in 1i64..10,
        left in any::<bool>(),
        moves in prop::collection::vec(-200.0f64..2000.0, 1..30),
    ) {
        let start = base() + Duration::days(offset);
        let item = TimelineItem::try_new(ItemId(1), start, start + Duration::days(len), "r").unwrap();
        let range = date_range(std::slice::from_ref(&item), 5).unwrap();
        let direction = if left { ResizeDirection::Left } else { ResizeDirection::Right };
        let mut session = ResizeSession::begin(&item, direction, std::time::Duration::ZERO);

        for x in moves {
            if let Some(patch) = session.update(x, 20.0, &range) {
                let (s, e) = (patch.start.unwrap(), patch.end.unwrap());
                prop_assert!(s < e);
            }
            let (s, e) = session.dates();
            prop_assert!(s < e);
        }
    }
}

#[test]
fn scenario_three_items_two_lanes() {
    let d = |s: &str| s.parse::<NaiveDate>().unwrap();
    let items = vec![
        TimelineItem::try_new(ItemId(1), d("2024-03-01"), d("2024-03-05"), "one").unwrap(),
        TimelineItem::try_new(ItemId(2), d("2024-03-03"), d("2024-03-08"), "two").unwrap(),
        TimelineItem::try_new(ItemId(3), d("2024-03-01"), d("2024-03-02"), "three").unwrap(),
    ];
    let lanes = assign_lanes(&items);
    let ids: Vec<Vec<u64>> = lanes
        .iter()
        .map(|lane| lane.iter().map(|item| item.id.0).collect())
        .collect();
    assert_eq!(ids, vec![vec![1], vec![3, 2]]);
}
