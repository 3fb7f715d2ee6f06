//! Timeline item types and utilities.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::color::ColorScheme;
use crate::error::ValidationError;

/// Stable, unique identity of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single dated item on the timeline. The date range is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: ItemId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub name: String,
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl TimelineItem {
    /// Create a new item.
    ///
    /// # Errors
    /// Returns an error if `end` precedes `start`.
    pub fn try_new(
        id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateRange { id, start, end });
        }
        Ok(Self {
            id,
            start,
            end,
            name: name.into(),
            color_scheme: ColorScheme::default(),
        })
    }

    pub fn with_color(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }

    /// Whole days between start and end (0 for a single-day item).
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Inclusive-range intersection test.
    pub fn overlaps(&self, other: &Self) -> bool {
        ranges_overlap(self.start, self.end, other.start, other.end)
    }

    /// `(start, end)` moved by `days`, duration unchanged. `None` past the
    /// representable calendar.
    pub fn shifted(&self, days: i64) -> Option<(NaiveDate, NaiveDate)> {
        let delta = Duration::try_days(days)?;
        Some((
            self.start.checked_add_signed(delta)?,
            self.end.checked_add_signed(delta)?,
        ))
    }

    /// Display label such as `Mar 1 - Mar 5, 2024`.
    pub fn date_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d, %Y")
        )
    }
}

/// Two inclusive date ranges intersect unless one ends before the other begins.
pub fn ranges_overlap(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Wire form of an item as supplied by the host. `colorScheme` is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: ItemId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
}

/// Convert host records into items.
///
/// Items without a colour get the palette entry for their input position.
///
/// # Errors
/// Returns the first record whose end precedes its start, or a duplicated id.
pub fn items_from_records(records: Vec<ItemRecord>) -> Result<Vec<TimelineItem>, ValidationError> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if !seen.insert(record.id) {
                return Err(ValidationError::DuplicateItem(record.id));
            }
            let color = record
                .color_scheme
                .unwrap_or_else(|| ColorScheme::round_robin(index));
            Ok(TimelineItem::try_new(record.id, record.start, record.end, record.name)?
                .with_color(color))
        })
        .collect()
}

/// Parse a JSON array of item records.
pub fn parse_items(json: &str) -> crate::error::Result<Vec<TimelineItem>> {
    let records: Vec<ItemRecord> = serde_json::from_str(json)?;
    Ok(items_from_records(records)?)
}

/// Proposed mutation of a single item. Absent fields are left unchanged.
///
/// `lane_index` reports where the interaction placed the item; lanes are
/// always re-derived from dates, so committing ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
}

impl ItemPatch {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            start: None,
            end: None,
            lane_index: None,
            name: None,
            color_scheme: None,
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_lane(mut self, lane_index: usize) -> Self {
        self.lane_index = Some(lane_index);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = Some(color_scheme);
        self
    }

    /// Apply onto a copy of `item`.
    ///
    /// # Errors
    /// Returns an error if the resulting range would be inverted.
    pub fn apply_to(&self, item: &TimelineItem) -> Result<TimelineItem, ValidationError> {
        let start = self.start.unwrap_or(item.start);
        let end = self.end.unwrap_or(item.end);
        if end < start {
            return Err(ValidationError::InvalidDateRange { id: item.id, start, end });
        }
        Ok(TimelineItem {
            id: item.id,
            start,
            end,
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            color_scheme: self.color_scheme.unwrap_or(item.color_scheme),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_item(id: u64, start: &str, end: &str) -> TimelineItem {
    TimelineItem::try_new(
        ItemId(id),
        start.parse().unwrap(),
        end.parse().unwrap(),
        format!("Item {id}"),
    )
    .unwrap()
}
