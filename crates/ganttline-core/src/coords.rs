//! Date/pixel coordinate mapping.
//!
//! Derives a uniform day width from zoom and container size, the padded
//! date range spanning all items, and converts between day offsets and
//! pixel positions on the timeline canvas.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, ZoomConfig};
use crate::error::ValidationError;
use crate::item::TimelineItem;

/// Zoom level and container width, owned by the rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    zoom: f64,
    pub container_width: f64,
}

impl Viewport {
    pub fn new(zoom: f64, container_width: f64, bounds: &ZoomConfig) -> Self {
        Self {
            zoom: clamp_zoom(zoom, bounds),
            container_width: container_width.max(0.0),
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64, bounds: &ZoomConfig) {
        self.zoom = clamp_zoom(zoom, bounds);
    }

    pub fn zoom_in(&mut self, bounds: &ZoomConfig) {
        self.set_zoom(self.zoom + bounds.step, bounds);
    }

    pub fn zoom_out(&mut self, bounds: &ZoomConfig) {
        self.set_zoom(self.zoom - bounds.step, bounds);
    }

    /// Zoom as a rounded percentage, e.g. `100` at zoom 1.0.
    pub fn zoom_percent(&self) -> i64 {
        (self.zoom * 100.0).round() as i64
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 0.0, &ZoomConfig::default())
    }
}

/// Total over any bounds: a NaN bound is open, reversed bounds are
/// reordered, and a NaN zoom falls back to the initial zoom.
fn clamp_zoom(zoom: f64, bounds: &ZoomConfig) -> f64 {
    let min = if bounds.min.is_nan() { f64::NEG_INFINITY } else { bounds.min };
    let max = if bounds.max.is_nan() { f64::INFINITY } else { bounds.max };
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let zoom = if zoom.is_nan() { bounds.initial } else { zoom };
    zoom.max(lo).min(hi)
}

/// Pixels per calendar day.
///
/// Normally `base_day_width * zoom`, floored at the minimum. Below the fill
/// threshold with a known container width, the timeline instead stretches
/// to fill the container. The two branches meet discontinuously at the
/// threshold and both are kept as-is.
pub fn day_width(zoom: f64, container_width: f64, total_days: i64, layout: &LayoutConfig) -> f64 {
    let standard = (layout.base_day_width * zoom).max(layout.min_day_width);

    if zoom < layout.fill_zoom_threshold && container_width > 0.0 && total_days > 0 {
        let fill = (container_width - layout.fill_padding) / total_days as f64;
        return fill.max(layout.min_day_width);
    }

    standard
}

/// Padded span of dates covering every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
}

impl DateRange {
    /// `None` when the offset leaves the representable calendar.
    pub fn date_at(&self, day_offset: i64) -> Option<NaiveDate> {
        date_at_offset(self.start_date, day_offset)
    }

    pub fn day_offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.start_date).num_days()
    }

    /// Full canvas width at the given day width.
    pub fn canvas_width(&self, day_width: f64) -> f64 {
        self.total_days as f64 * day_width
    }
}

/// Min start and max end over `items`, padded on both sides.
///
/// # Errors
/// An empty item list has no range; callers treat it as nothing to render.
/// Padding that runs past the representable calendar is an invalid value.
pub fn date_range(items: &[TimelineItem], padding_days: i64) -> Result<DateRange, ValidationError> {
    let min = items.iter().map(|item| item.start).min();
    let max = items.iter().map(|item| item.end).max();
    let (Some(min), Some(max)) = (min, max) else {
        return Err(ValidationError::EmptyCollection("timeline items".into()));
    };

    let padded = Duration::try_days(padding_days).and_then(|pad| {
        Some((min.checked_sub_signed(pad)?, max.checked_add_signed(pad)?))
    });
    let Some((start_date, end_date)) = padded else {
        return Err(ValidationError::InvalidValue {
            field: "date_padding_days".into(),
            message: format!("padding of {padding_days} days leaves the calendar"),
        });
    };
    Ok(DateRange {
        start_date,
        end_date,
        total_days: (end_date - start_date).num_days(),
    })
}

/// Horizontal placement of an item on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemGeometry {
    pub left: f64,
    pub width: f64,
}

/// `width` covers the end day too, so a one-day item is one day wide.
pub fn item_geometry(item: &TimelineItem, range_start: NaiveDate, day_width: f64) -> ItemGeometry {
    let offset = (item.start - range_start).num_days();
    let span = (item.end - item.start).num_days() + 1;
    ItemGeometry {
        left: offset as f64 * day_width,
        width: span as f64 * day_width,
    }
}

/// Checked `range_start + days`. Pixel offsets from a wild pointer saturate
/// to huge day counts, which must not panic.
pub fn date_at_offset(range_start: NaiveDate, days: i64) -> Option<NaiveDate> {
    range_start.checked_add_signed(Duration::try_days(days)?)
}

/// Day index containing pixel `x` (used for click-to-create).
pub fn day_at_floor(x: f64, day_width: f64) -> i64 {
    (x / day_width).floor() as i64
}

/// Nearest day boundary to pixel `x` (used for drag and resize snapping).
pub fn day_at_round(x: f64, day_width: f64) -> i64 {
    (x / day_width).round() as i64
}

/// Snap a pixel position to the day grid.
pub fn snap_to_grid(x: f64, day_width: f64) -> f64 {
    day_at_round(x, day_width) as f64 * day_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{test_item, ItemId};

    fn layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn standard_day_width() {
        assert_eq!(day_width(1.0, 0.0, 30, &layout()), 40.0);
        assert_eq!(day_width(2.0, 800.0, 30, &layout()), 80.0);
        // Container width is ignored at or above the threshold.
        assert_eq!(day_width(0.5, 620.0, 30, &layout()), 20.0);
    }

    #[test]
    fn small_zoom_fills_container() {
        assert_eq!(day_width(0.3, 620.0, 30, &layout()), 20.0);
        // Fill result still honours the floor.
        assert_eq!(day_width(0.3, 100.0, 30, &layout()), 5.0);
        // Without a measured container the standard branch applies.
        assert_eq!(day_width(0.125, 0.0, 30, &layout()), 5.0);
    }

    #[test]
    fn discontinuity_at_threshold() {
        let below = day_width(0.4999, 2020.0, 100, &layout());
        let at = day_width(0.5, 2020.0, 100, &layout());
        assert_eq!(below, 20.0);
        assert_eq!(at, 20.0);
        let below = day_width(0.4999, 1020.0, 100, &layout());
        assert_eq!(below, 10.0);
        assert_eq!(day_width(0.5, 1020.0, 100, &layout()), 20.0);
    }

    #[test]
    fn date_range_pads_both_sides() {
        let items = vec![
            test_item(1, "2024-03-10", "2024-03-12"),
            test_item(2, "2024-03-01", "2024-03-04"),
            test_item(3, "2024-03-05", "2024-03-20"),
        ];
        let range = date_range(&items, 5).unwrap();
        assert_eq!(range.start_date, "2024-02-25".parse::<NaiveDate>().unwrap());
        assert_eq!(range.end_date, "2024-03-25".parse::<NaiveDate>().unwrap());
        assert_eq!(range.total_days, 29);
    }

    #[test]
    fn date_range_of_nothing_is_an_error() {
        assert!(matches!(
            date_range(&[], 5),
            Err(ValidationError::EmptyCollection(_))
        ));
    }

    #[test]
    fn date_range_padding_past_the_calendar_is_invalid() {
        let last = TimelineItem::try_new(ItemId(1), NaiveDate::MAX, NaiveDate::MAX, "end").unwrap();
        assert!(matches!(
            date_range(std::slice::from_ref(&last), 5),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert!(matches!(
            date_range(&[test_item(1, "2024-03-01", "2024-03-02")], i64::MAX),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn geometry_includes_end_day() {
        let item = test_item(1, "2024-03-03", "2024-03-05");
        let start: NaiveDate = "2024-03-01".parse().unwrap();
        let geo = item_geometry(&item, start, 10.0);
        assert_eq!(geo.left, 20.0);
        assert_eq!(geo.width, 30.0);
    }

    #[test]
    fn pixel_to_day_conversions() {
        assert_eq!(day_at_floor(59.0, 20.0), 2);
        assert_eq!(day_at_round(59.0, 20.0), 3);
        assert_eq!(day_at_round(-9.0, 20.0), 0);
        assert_eq!(snap_to_grid(71.0, 20.0), 80.0);
    }

    #[test]
    fn viewport_zoom_is_clamped() {
        let bounds = ZoomConfig::default();
        let mut viewport = Viewport::new(5.0, 800.0, &bounds);
        assert_eq!(viewport.zoom(), 3.0);

        viewport.set_zoom(0.2, &bounds);
        viewport.zoom_out(&bounds);
        assert_eq!(viewport.zoom(), 0.125);

        viewport.zoom_in(&bounds);
        assert!((viewport.zoom() - 0.325).abs() < 1e-9);
        assert_eq!(viewport.zoom_percent(), 33);
    }

    #[test]
    fn zoom_clamp_survives_bad_bounds() {
        let reversed = ZoomConfig {
            min: 3.0,
            max: 0.125,
            ..ZoomConfig::default()
        };
        assert_eq!(Viewport::new(5.0, 0.0, &reversed).zoom(), 3.0);
        assert_eq!(Viewport::new(0.01, 0.0, &reversed).zoom(), 0.125);

        let nan_min = ZoomConfig {
            min: f64::NAN,
            ..ZoomConfig::default()
        };
        assert_eq!(Viewport::new(1.0, 0.0, &nan_min).zoom(), 1.0);
        assert_eq!(Viewport::new(9.0, 0.0, &nan_min).zoom(), 3.0);
        assert_eq!(Viewport::new(f64::NAN, 0.0, &ZoomConfig::default()).zoom(), 1.0);
    }

    #[test]
    fn offsets_past_the_calendar_are_none() {
        let start: NaiveDate = "2024-03-01".parse().unwrap();
        assert_eq!(date_at_offset(start, 2), "2024-03-03".parse().ok());
        assert_eq!(date_at_offset(start, day_at_round(f64::INFINITY, 20.0)), None);
        assert_eq!(date_at_offset(start, day_at_floor(-1e300, 20.0)), None);
        assert_eq!(date_at_offset(start, 1_000_000_000), None);
    }
}
