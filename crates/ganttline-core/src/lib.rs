//! # Ganttline Core Library
//!
//! Layout and interaction engine for a Gantt-style timeline. Items with
//! inclusive start/end dates are packed into the fewest non-overlapping
//! lanes, mapped onto a pixel grid, and moved or resized through pure
//! proposal functions whose results the caller commits.
//!
//! ## Architecture
//!
//! - **Coordinate mapping**: day width from zoom/container, padded date range,
//!   day/pixel conversions ([`coords`], [`axis`])
//! - **Lane assignment**: greedy interval partitioning ([`lanes`])
//! - **Overlap resolution**: bounded forward gap search for cross-lane moves
//!   ([`overlap`])
//! - **Interaction**: click-to-create, drag, resize and edit sessions
//!   ([`interaction`])
//!
//! ## Key Components
//!
//! - [`assign_lanes`]: derive lanes from an item list
//! - [`GapFinder`]: resolve a move into a crowded lane
//! - [`RenderModel`]: everything needed to paint a frame
//! - [`TimelineBoard`]: reference owner of the item list that commits proposals
//! - [`Config`]: TOML configuration

pub mod axis;
pub mod board;
pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod interaction;
pub mod item;
pub mod lanes;
pub mod layout;
pub mod overlap;

pub use board::TimelineBoard;
pub use color::ColorScheme;
pub use config::Config;
pub use coords::{date_range, day_width, DateRange, ItemGeometry, Viewport};
pub use error::{ConfigError, CoreError, ValidationError};
pub use interaction::{
    DragOutcome, DragPreview, InteractionState, LaneBands, LaneChange, Point, ResizeDirection,
};
pub use item::{parse_items, ItemId, ItemPatch, ItemRecord, TimelineItem};
pub use lanes::{assign_lanes, Lanes};
pub use layout::{PlacedItem, RenderModel};
pub use overlap::{resolve_lane_move, GapFinder, LaneMove};
