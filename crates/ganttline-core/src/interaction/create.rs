//! Click-to-create.

use crate::color::ColorScheme;
use crate::config::InteractionConfig;
use crate::coords::{date_at_offset, day_at_floor, DateRange};
use crate::item::{ItemId, TimelineItem};

/// One past the largest id in use.
pub fn next_item_id(items: &[TimelineItem]) -> ItemId {
    ItemId(items.iter().map(|item| item.id.0 + 1).max().unwrap_or(1))
}

/// New item for a click `offset_x` pixels from the timeline origin.
///
/// The clicked day becomes the start, the end follows after the configured
/// default duration, and the colour is picked round-robin by item count.
/// `None` when the click maps outside the representable calendar.
pub fn create_item_at(
    offset_x: f64,
    day_width: f64,
    range: &DateRange,
    items: &[TimelineItem],
    config: &InteractionConfig,
) -> Option<TimelineItem> {
    let start = range.date_at(day_at_floor(offset_x, day_width))?;
    let end = date_at_offset(start, config.default_duration_days.max(0))?;

    Some(TimelineItem {
        id: next_item_id(items),
        start,
        end,
        name: config.default_item_name.clone(),
        color_scheme: ColorScheme::round_robin(items.len()),
    })
}
