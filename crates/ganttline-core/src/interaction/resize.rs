//! Edge resizing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::Throttle;
use crate::coords::{day_at_round, DateRange};
use crate::item::{ItemId, ItemPatch, TimelineItem};

/// Which edge is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    /// Moves the start date.
    Left,
    /// Moves the end date.
    Right,
}

/// An in-progress resize of a single item.
///
/// Every pointer event is checked against the fixed opposite edge as it
/// arrives; a position that would make the range empty or inverted is
/// dropped on the spot. Only the commit of accepted dates is throttled, so
/// the held value is always the newest accepted one and the dates after
/// `finish` equal those of unthrottled processing.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    id: ItemId,
    direction: ResizeDirection,
    start: NaiveDate,
    end: NaiveDate,
    throttle: Throttle<(NaiveDate, NaiveDate)>,
}

impl ResizeSession {
    pub fn begin(item: &TimelineItem, direction: ResizeDirection, throttle_interval: Duration) -> Self {
        Self {
            id: item.id,
            direction,
            start: item.start,
            end: item.end,
            throttle: Throttle::new(throttle_interval),
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.id
    }

    pub fn direction(&self) -> ResizeDirection {
        self.direction
    }

    /// Last committed `(start, end)`.
    pub fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Dates the pointer at `offset_x` (relative to the timeline origin)
    /// would produce, or `None` if they would not keep `start < end`.
    pub fn propose(&self, offset_x: f64, day_width: f64, range: &DateRange) -> Option<(NaiveDate, NaiveDate)> {
        let edge = range.date_at(day_at_round(offset_x, day_width))?;
        match self.direction {
            ResizeDirection::Left if edge < self.end => Some((edge, self.end)),
            ResizeDirection::Right if edge > self.start => Some((self.start, edge)),
            _ => None,
        }
    }

    fn commit(&mut self, (start, end): (NaiveDate, NaiveDate)) -> Option<ItemPatch> {
        if (start, end) == (self.start, self.end) {
            return None;
        }
        self.start = start;
        self.end = end;
        Some(ItemPatch::new(self.id).with_dates(start, end))
    }

    /// Apply the pointer position immediately, bypassing the throttle.
    pub fn update(&mut self, offset_x: f64, day_width: f64, range: &DateRange) -> Option<ItemPatch> {
        let dates = self.propose(offset_x, day_width, range)?;
        self.commit(dates)
    }

    /// Throttled pointer move.
    pub fn on_move(
        &mut self,
        now: Instant,
        offset_x: f64,
        day_width: f64,
        range: &DateRange,
    ) -> Option<ItemPatch> {
        let dates = self.propose(offset_x, day_width, range)?;
        let dates = self.throttle.offer(now, dates)?;
        self.commit(dates)
    }

    /// Commit a held move whose interval has elapsed.
    pub fn on_tick(&mut self, now: Instant) -> Option<ItemPatch> {
        let dates = self.throttle.poll(now)?;
        self.commit(dates)
    }

    /// End the resize, committing the last held move if any.
    pub fn finish(&mut self) -> Option<ItemPatch> {
        let dates = self.throttle.flush()?;
        self.commit(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::date_range;
    use crate::item::test_item;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup() -> (TimelineItem, DateRange) {
        let item = test_item(1, "2024-03-10", "2024-03-14");
        let range = date_range(std::slice::from_ref(&item), 5).unwrap();
        (item, range)
    }

    #[test]
    fn left_edge_moves_start() {
        let (item, range) = setup();
        let mut session = ResizeSession::begin(&item, ResizeDirection::Left, Duration::ZERO);
        // day 3 -> 2024-03-08
        let patch = session.update(61.0, 20.0, &range).unwrap();
        assert_eq!(patch.start, Some(date("2024-03-08")));
        assert_eq!(patch.end, Some(date("2024-03-14")));
    }

    #[test]
    fn right_edge_moves_end() {
        let (item, range) = setup();
        let mut session = ResizeSession::begin(&item, ResizeDirection::Right, Duration::ZERO);
        let patch = session.update(300.0, 20.0, &range).unwrap();
        assert_eq!(patch.start, Some(date("2024-03-10")));
        assert_eq!(patch.end, Some(date("2024-03-20")));
    }

    #[test]
    fn collapsing_resize_is_ignored() {
        let (item, range) = setup();
        let mut session = ResizeSession::begin(&item, ResizeDirection::Left, Duration::ZERO);
        // day 9 -> 2024-03-14, equal to end
        assert!(session.update(180.0, 20.0, &range).is_none());
        // day 12 -> past the end
        assert!(session.update(240.0, 20.0, &range).is_none());
        assert_eq!(session.dates(), (item.start, item.end));

        let mut session = ResizeSession::begin(&item, ResizeDirection::Right, Duration::ZERO);
        assert!(session.update(100.0, 20.0, &range).is_none());
        assert!(session.update(119.0, 20.0, &range).is_some());
    }

    #[test]
    fn throttled_result_matches_last_event() {
        let (item, range) = setup();
        let t0 = Instant::now();
        let mut throttled = ResizeSession::begin(&item, ResizeDirection::Right, Duration::from_millis(50));
        let mut direct = ResizeSession::begin(&item, ResizeDirection::Right, Duration::ZERO);

        let moves = [220.0, 240.0, 260.0, 90.0, 280.0];
        for (i, x) in moves.iter().enumerate() {
            throttled.on_move(t0 + Duration::from_millis(i as u64 * 10), *x, 20.0, &range);
            direct.update(*x, 20.0, &range);
        }
        throttled.finish();

        assert_eq!(throttled.dates(), direct.dates());
        assert_eq!(throttled.dates().1, date("2024-03-19"));
    }

    #[test]
    fn held_valid_move_survives_a_later_invalid_one() {
        let (item, range) = setup();
        let t0 = Instant::now();
        let mut throttled = ResizeSession::begin(&item, ResizeDirection::Right, Duration::from_millis(50));
        let mut direct = ResizeSession::begin(&item, ResizeDirection::Right, Duration::ZERO);

        // 220 runs at once, 300 is held, 60 would put the end before the start.
        let moves = [220.0, 300.0, 60.0];
        for (i, x) in moves.iter().enumerate() {
            throttled.on_move(t0 + Duration::from_millis(i as u64 * 10), *x, 20.0, &range);
            direct.update(*x, 20.0, &range);
        }
        assert_eq!(throttled.dates().1, date("2024-03-16"));

        let patch = throttled.finish().unwrap();
        assert_eq!(patch.end, Some(date("2024-03-20")));
        assert_eq!(throttled.dates(), direct.dates());
        assert!(throttled.finish().is_none());
    }

    #[test]
    fn tick_commits_held_move_after_interval() {
        let (item, range) = setup();
        let t0 = Instant::now();
        let mut session = ResizeSession::begin(&item, ResizeDirection::Left, Duration::from_millis(50));

        assert!(session.on_move(t0, 61.0, 20.0, &range).is_some());
        assert!(session.on_move(t0 + Duration::from_millis(10), 21.0, 20.0, &range).is_none());
        assert!(session.on_tick(t0 + Duration::from_millis(20)).is_none());

        let patch = session.on_tick(t0 + Duration::from_millis(60)).unwrap();
        // day 1 -> 2024-03-06
        assert_eq!(patch.start, Some(date("2024-03-06")));
        assert!(session.finish().is_none());
    }

    #[test]
    fn pointer_outside_the_calendar_is_ignored() {
        let (item, range) = setup();
        let mut session = ResizeSession::begin(&item, ResizeDirection::Right, Duration::ZERO);
        assert!(session.update(f64::INFINITY, 20.0, &range).is_none());
        assert!(session.update(1e300, 20.0, &range).is_none());
        assert_eq!(session.dates(), (item.start, item.end));
    }
}
