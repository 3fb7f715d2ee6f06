//! Render model: everything the renderer needs to paint one frame.

use chrono::NaiveDate;
use serde::Serialize;

use crate::axis::{self, MonthDivider, Tick};
use crate::color::{ColorProperties, ColorScheme};
use crate::config::Config;
use crate::coords::{date_range, day_width, item_geometry, DateRange, Viewport};
use crate::error::ValidationError;
use crate::interaction::LaneBands;
use crate::item::{ItemId, TimelineItem};
use crate::lanes::assign_lanes;

/// An item with its lane and pixel placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: ItemId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub lane: usize,
    pub left: f64,
    pub width: f64,
    pub color_scheme: ColorScheme,
    /// Paint values for `color_scheme`.
    pub colors: ColorProperties,
    pub date_label: String,
}

/// One lane's vertical band and its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneRow {
    pub index: usize,
    pub top: f64,
    pub height: f64,
    pub items: Vec<PlacedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub date_range: DateRange,
    pub day_width: f64,
    pub canvas_width: f64,
    pub zoom_percent: i64,
    pub lanes: Vec<LaneRow>,
    pub ticks: Vec<Tick>,
    pub months: Vec<MonthDivider>,
    pub show_month_labels: bool,
    pub show_date_ticks: bool,
}

impl RenderModel {
    /// Derive the full frame from items and viewport.
    ///
    /// # Errors
    /// Returns `EmptyCollection` when there are no items to lay out.
    pub fn build(
        items: &[TimelineItem],
        viewport: &Viewport,
        config: &Config,
    ) -> Result<Self, ValidationError> {
        let range = date_range(items, config.layout.date_padding_days)?;
        let width = day_width(
            viewport.zoom(),
            viewport.container_width,
            range.total_days,
            &config.layout,
        );
        let lanes = assign_lanes(items);
        let bands = LaneBands::uniform(lanes.len(), config.layout.lane_height, config.layout.lane_gap);

        let rows = lanes
            .iter()
            .enumerate()
            .map(|(index, lane)| {
                let (top, height) = bands
                    .get(index)
                    .map(|band| (band.top, band.bottom - band.top))
                    .unwrap_or((0.0, config.layout.lane_height));
                LaneRow {
                    index,
                    top,
                    height,
                    items: lane
                        .iter()
                        .map(|item| place(item, index, &range, width))
                        .collect(),
                }
            })
            .collect();

        tracing::debug!(
            items = items.len(),
            day_width = width,
            total_days = range.total_days,
            "built render model"
        );

        Ok(Self {
            date_range: range,
            day_width: width,
            canvas_width: range.canvas_width(width),
            zoom_percent: viewport.zoom_percent(),
            lanes: rows,
            ticks: axis::date_ticks(&range, width),
            months: axis::month_dividers(&range, width),
            show_month_labels: axis::show_month_labels(width),
            show_date_ticks: axis::show_date_ticks(width),
        })
    }

    pub fn find(&self, id: ItemId) -> Option<&PlacedItem> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.items.iter())
            .find(|item| item.id == id)
    }
}

fn place(item: &TimelineItem, lane: usize, range: &DateRange, day_width: f64) -> PlacedItem {
    let geometry = item_geometry(item, range.start_date, day_width);
    PlacedItem {
        id: item.id,
        name: item.name.clone(),
        start: item.start,
        end: item.end,
        lane,
        left: geometry.left,
        width: geometry.width,
        color_scheme: item.color_scheme,
        colors: item.color_scheme.properties(),
        date_label: item.date_label(),
    }
}
