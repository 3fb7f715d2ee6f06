//! Item-list owner that drives interactions and commits their proposals.
//!
//! The board is the single store of items. Lanes, date range and geometry
//! are derived from it on demand, so a committed change is reflected by the
//! next derivation without any index to keep in sync.
//!
//! Pointer positions passed to the board are relative to the timeline
//! origin (top-left of the first lane).

use std::time::Instant;

use crate::config::Config;
use crate::coords::{date_range, day_width, DateRange, Viewport};
use crate::error::ValidationError;
use crate::interaction::{
    create_item_at, DragOutcome, DragPreview, DragSession, EditSession, InteractionState,
    LaneBands, Point, ResizeDirection, ResizeSession,
};
use crate::item::{ItemId, ItemPatch, TimelineItem};
use crate::lanes::{assign_lanes, Lanes};
use crate::layout::RenderModel;
use crate::overlap::GapFinder;

const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

/// Owner of the item list and the current interaction.
#[derive(Debug, Clone)]
pub struct TimelineBoard {
    items: Vec<TimelineItem>,
    viewport: Viewport,
    config: Config,
    state: InteractionState,
}

impl TimelineBoard {
    pub fn new(items: Vec<TimelineItem>, config: Config) -> Self {
        let viewport = Viewport::new(config.zoom.initial, 0.0, &config.zoom);
        Self {
            items,
            viewport,
            config,
            state: InteractionState::Idle,
        }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn lanes(&self) -> Lanes<'_> {
        assign_lanes(&self.items)
    }

    /// `None` when the board is empty.
    pub fn date_range(&self) -> Option<DateRange> {
        date_range(&self.items, self.config.layout.date_padding_days).ok()
    }

    pub fn day_width(&self) -> Option<f64> {
        let range = self.date_range()?;
        Some(self.day_width_for(&range))
    }

    fn day_width_for(&self, range: &DateRange) -> f64 {
        day_width(
            self.viewport.zoom(),
            self.viewport.container_width,
            range.total_days,
            &self.config.layout,
        )
    }

    pub fn lane_bands(&self) -> LaneBands {
        LaneBands::uniform(
            self.lanes().len(),
            self.config.layout.lane_height,
            self.config.layout.lane_gap,
        )
    }

    fn gap_finder(&self) -> GapFinder {
        GapFinder::new().with_max_shift(self.config.interaction.gap_search_days)
    }

    /// Current frame, or `None` when there is nothing to render.
    pub fn render(&self) -> Option<RenderModel> {
        RenderModel::build(&self.items, &self.viewport, &self.config).ok()
    }

    // Viewport

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(&self.config.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(&self.config.zoom);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom, &self.config.zoom);
    }

    pub fn set_container_width(&mut self, width: f64) {
        self.viewport.container_width = width.max(0.0);
    }

    // Commit

    /// Apply a proposal to the item list.
    ///
    /// # Errors
    /// Fails for an unknown id or a patch that would invert the date range.
    pub fn apply(&mut self, patch: &ItemPatch) -> Result<(), ValidationError> {
        let Some(slot) = self.items.iter_mut().find(|item| item.id == patch.id) else {
            tracing::warn!(item = %patch.id, "ignoring patch for unknown item");
            return Err(ValidationError::UnknownItem(patch.id));
        };
        *slot = patch.apply_to(slot)?;
        tracing::info!(
            item = %patch.id,
            start = ?patch.start,
            end = ?patch.end,
            lane = ?patch.lane_index,
            "committed item change"
        );
        Ok(())
    }

    fn commit(&mut self, patch: &ItemPatch) {
        if let Err(e) = self.apply(patch) {
            tracing::warn!(error = %e, "dropped interaction proposal");
        }
    }

    /// Abandon whatever gesture is in progress without committing.
    pub fn cancel(&mut self) {
        if !self.state.is_idle() {
            tracing::debug!(state = self.state.name(), "interaction cancelled");
        }
        self.state = InteractionState::Idle;
    }

    // Create

    /// Pointer went down on the empty timeline.
    pub fn press_background(&mut self) {
        if self.state.is_idle() {
            self.state = InteractionState::BackgroundPressed;
        }
    }

    /// Click on the empty timeline at `offset_x`.
    ///
    /// Creates an item only if the press started on the background. The new
    /// item immediately enters name editing. Returns the new id.
    pub fn click_background(&mut self, offset_x: f64) -> Option<ItemId> {
        if !matches!(self.state, InteractionState::BackgroundPressed) {
            return None;
        }
        self.state = InteractionState::Idle;

        let range = self.date_range()?;
        let width = self.day_width_for(&range);
        let item = create_item_at(offset_x, width, &range, &self.items, &self.config.interaction)?;
        let id = item.id;
        tracing::info!(item = %id, start = %item.start, end = %item.end, "created item");

        self.state = InteractionState::Editing(EditSession::begin(id, item.name.clone()));
        self.items.push(item);
        Some(id)
    }

    // Drag

    /// Start dragging `id` with the pointer at `pointer`.
    pub fn start_drag(&mut self, id: ItemId, pointer: Point) -> bool {
        if !self.state.accepts_pointer_gesture() {
            return false;
        }
        let Some(range) = self.date_range() else {
            return false;
        };
        let width = self.day_width_for(&range);
        let lanes = self.lanes();
        let (Some(item), Some(lane)) = (self.item(id), lanes.lane_of(id)) else {
            return false;
        };

        let session = DragSession::begin(item, lane, pointer, ORIGIN, &range, width);
        self.state = InteractionState::Dragging(session);
        true
    }

    pub fn drag_move(&self, pointer: Point) -> Option<DragPreview> {
        let InteractionState::Dragging(session) = &self.state else {
            return None;
        };
        let width = self.day_width()?;
        Some(session.preview(pointer, ORIGIN, width, &self.lane_bands()))
    }

    /// Release the drag at `pointer` and commit the outcome.
    pub fn end_drag(&mut self, pointer: Point) -> Option<DragOutcome> {
        if !self.state.is_dragging() {
            return None;
        }
        let InteractionState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let range = self.date_range()?;
        let width = self.day_width_for(&range);

        let outcome = {
            let lanes = self.lanes();
            let bands = LaneBands::uniform(
                lanes.len(),
                self.config.layout.lane_height,
                self.config.layout.lane_gap,
            );
            session.finish(pointer, ORIGIN, width, &range, &lanes, &bands, &self.gap_finder())?
        };

        self.commit(&outcome.to_patch());
        Some(outcome)
    }

    // Resize

    pub fn start_resize(&mut self, id: ItemId, direction: ResizeDirection) -> bool {
        if !self.state.accepts_pointer_gesture() {
            return false;
        }
        let Some(item) = self.item(id) else {
            return false;
        };
        let session = ResizeSession::begin(item, direction, self.config.interaction.resize_throttle());
        self.state = InteractionState::Resizing(session);
        true
    }

    /// Throttled resize move at `offset_x`; commits accepted dates.
    pub fn resize_move(&mut self, now: Instant, offset_x: f64) -> Option<ItemPatch> {
        let range = self.date_range()?;
        let width = self.day_width_for(&range);
        let InteractionState::Resizing(session) = &mut self.state else {
            return None;
        };
        let patch = session.on_move(now, offset_x, width, &range)?;
        self.commit(&patch);
        Some(patch)
    }

    /// Commit a held resize move once its throttle interval has passed.
    pub fn resize_tick(&mut self, now: Instant) -> Option<ItemPatch> {
        let InteractionState::Resizing(session) = &mut self.state else {
            return None;
        };
        let patch = session.on_tick(now)?;
        self.commit(&patch);
        Some(patch)
    }

    /// Release the resize, committing any held move.
    pub fn end_resize(&mut self) -> Option<ItemPatch> {
        let InteractionState::Resizing(session) = &mut self.state else {
            return None;
        };
        let patch = session.finish();
        self.state = InteractionState::Idle;
        let patch = patch?;
        self.commit(&patch);
        Some(patch)
    }

    // Edit

    pub fn start_edit(&mut self, id: ItemId) -> bool {
        if !self.state.accepts_pointer_gesture() {
            return false;
        }
        let Some(item) = self.item(id) else {
            return false;
        };
        self.state = InteractionState::Editing(EditSession::begin(id, item.name.clone()));
        true
    }

    pub fn edit_draft(&mut self, text: impl Into<String>) {
        if let InteractionState::Editing(session) = &mut self.state {
            session.set_draft(text);
        }
    }

    /// Submit (or blur) the current edit, committing the name.
    pub fn submit_edit(&mut self) -> Option<ItemPatch> {
        self.state.editing_item()?;
        let InteractionState::Editing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let patch = session.submit();
        self.commit(&patch);
        Some(patch)
    }

    // Colour

    /// Advance `id` to the next palette colour.
    pub fn cycle_color(&mut self, id: ItemId) -> Option<ItemPatch> {
        let next = self.item(id)?.color_scheme.next();
        let patch = ItemPatch::new(id).with_color(next);
        self.commit(&patch);
        Some(patch)
    }
}
