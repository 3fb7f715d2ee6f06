//! Axis tick and month-divider generation.
//!
//! Everything here is a pure function of the date range and day width so the
//! renderer can lay out the axis without recomputing geometry.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::coords::DateRange;

/// Label formats used on the axis, coarsening as days get narrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFormat {
    /// `3`
    MonthNumber,
    /// `Mar`
    ShortMonth,
    /// `Mar 4`
    MonthDay,
    /// `4`
    Day,
    /// `Mar 4, 2024`
    FullDate,
    /// `March 2024`
    MonthYear,
}

impl LabelFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::MonthNumber => "%-m",
            Self::ShortMonth => "%b",
            Self::MonthDay => "%b %-d",
            Self::Day => "%-d",
            Self::FullDate => "%b %-d, %Y",
            Self::MonthYear => "%B %Y",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// Days between ticks for a given day width.
pub fn tick_interval(day_width: f64) -> i64 {
    if day_width < 3.0 {
        30
    } else if day_width < 5.0 {
        21
    } else if day_width < 10.0 {
        14
    } else if day_width < 20.0 {
        7
    } else if day_width < 40.0 {
        3
    } else {
        1
    }
}

pub fn tick_label_format(day_width: f64) -> LabelFormat {
    let interval = tick_interval(day_width);
    if day_width < 3.0 {
        LabelFormat::MonthNumber
    } else if day_width < 5.0 || interval >= 14 {
        LabelFormat::ShortMonth
    } else if interval >= 3 {
        LabelFormat::MonthDay
    } else if day_width < 60.0 {
        LabelFormat::Day
    } else {
        LabelFormat::FullDate
    }
}

pub fn month_label_format(day_width: f64) -> LabelFormat {
    if day_width < 3.0 {
        LabelFormat::MonthNumber
    } else if day_width < 20.0 {
        LabelFormat::ShortMonth
    } else {
        LabelFormat::MonthYear
    }
}

pub fn show_month_labels(day_width: f64) -> bool {
    day_width >= 2.0
}

pub fn show_date_ticks(day_width: f64) -> bool {
    day_width >= 1.5
}

/// A labelled tick on the date axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub date: NaiveDate,
    pub position: f64,
    pub width: f64,
    pub label: String,
}

/// A month band on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthDivider {
    pub position: f64,
    pub width: f64,
    pub label: String,
}

pub fn date_ticks(range: &DateRange, day_width: f64) -> Vec<Tick> {
    let interval = tick_interval(day_width);
    let format = tick_label_format(day_width);
    let count = (range.total_days.max(0) + interval - 1) / interval;
    let width = interval as f64 * day_width;

    (0..count)
        .map_while(|i| {
            let date = range.date_at(i * interval)?;
            Some(Tick {
                date,
                position: (i * interval) as f64 * day_width,
                width,
                label: format.format(date),
            })
        })
        .collect()
}

/// One divider per calendar month touched by the range.
///
/// The first divider starts at day 0 even mid-month; the last one is closed
/// at the end of the canvas.
pub fn month_dividers(range: &DateRange, day_width: f64) -> Vec<MonthDivider> {
    let format = month_label_format(day_width);
    let canvas_width = range.canvas_width(day_width);
    let mut months = Vec::new();
    let mut current: Option<(NaiveDate, f64)> = None;

    for day in 0..=range.total_days.max(0) {
        let Some(date) = range.date_at(day) else {
            break;
        };
        let position = day as f64 * day_width;

        if day == 0 || date.day() == 1 {
            if let Some((month_start, start_position)) = current {
                months.push(MonthDivider {
                    position: start_position,
                    width: position - start_position,
                    label: format.format(month_start),
                });
            }
            current = Some((date, position));
        }
    }

    if let Some((month_start, start_position)) = current {
        months.push(MonthDivider {
            position: start_position,
            width: canvas_width - start_position,
            label: format.format(month_start),
        });
    }

    months
}
