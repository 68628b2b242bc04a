//! Preview viewport state
//!
//! The zoom/pan state machine behind the preview surface. The host UI owns
//! one [`ViewportState`] per preview instance, forwards pointer and wheel
//! events to it, and applies `zoom()` and `scroll_offset()` back to its
//! scaled container. No operation here can fail: every numeric input is
//! clamped rather than rejected.
//!
//! Zoom persists across document loads so the user's framing survives
//! edits; only [`ViewportState::reset_zoom`] returns to 100%.

use serde::Serialize;

use crate::data::constants::{
    DRAG_GAIN, FIT_MARGIN, REFERENCE_PAGE_WIDTH, WHEEL_ZOOM_STEP, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};

/// Pointer interaction mode: `Idle` until a pointer goes down on the
/// canvas, `Panning` until it is released or leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Zoom level and pan offsets for one preview surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportState {
    zoom: f32,
    scroll_x: f32,
    scroll_y: f32,
    mode: InteractionMode,
    anchor_x: f32,
    anchor_y: f32,
    anchor_scroll_x: f32,
    anchor_scroll_y: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            mode: InteractionMode::Idle,
            anchor_x: 0.0,
            anchor_y: 0.0,
            anchor_scroll_x: 0.0,
            anchor_scroll_y: 0.0,
        }
    }
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom as a whole percentage, for the toolbar readout.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn scroll_offset(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_panning(&self) -> bool {
        self.mode == InteractionMode::Panning
    }

    /// Cursor affordance for the canvas.
    pub fn cursor(&self) -> &'static str {
        match self.mode {
            InteractionMode::Idle => "grab",
            InteractionMode::Panning => "grabbing",
        }
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn set_zoom(&mut self, value: f32) {
        self.zoom = value.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    /// Fit the nominal page width into the given container width.
    pub fn fit_to_width(&mut self, container_width: f32) {
        self.set_zoom((container_width - FIT_MARGIN) / REFERENCE_PAGE_WIDTH);
    }

    /// Wheel input. With the zoom modifier held (ctrl/cmd), adjusts zoom by
    /// one wheel step per tick and returns `true` so the caller suppresses
    /// the default scroll; otherwise the event is left alone.
    pub fn on_wheel(&mut self, delta_y: f32, zoom_modifier: bool) -> bool {
        if !zoom_modifier {
            return false;
        }
        let step = if delta_y > 0.0 {
            -WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.set_zoom(self.zoom + step);
        true
    }

    // ------------------------------------------------------------------
    // Pan
    // ------------------------------------------------------------------

    /// Pointer pressed on the canvas: record the anchor and start panning.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.mode = InteractionMode::Panning;
        self.anchor_x = x;
        self.anchor_y = y;
        self.anchor_scroll_x = self.scroll_x;
        self.anchor_scroll_y = self.scroll_y;
    }

    /// Pointer moved. Only updates scroll offsets while panning.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.mode != InteractionMode::Panning {
            return;
        }
        self.scroll_x = (self.anchor_scroll_x - (x - self.anchor_x) * DRAG_GAIN).max(0.0);
        self.scroll_y = (self.anchor_scroll_y - (y - self.anchor_y) * DRAG_GAIN).max(0.0);
    }

    pub fn pointer_up(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamping() {
        let mut vp = ViewportState::new();
        vp.set_zoom(10.0);
        assert_eq!(vp.zoom(), 3.0);
        vp.set_zoom(-1.0);
        assert_eq!(vp.zoom(), 0.3);
    }

    #[test]
    fn test_zoom_steps() {
        let mut vp = ViewportState::new();
        vp.zoom_in();
        assert!((vp.zoom() - 1.1).abs() < 1e-6);
        vp.zoom_out();
        vp.zoom_out();
        assert!((vp.zoom() - 0.9).abs() < 1e-6);
        vp.reset_zoom();
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn test_zoom_percent_readout() {
        let mut vp = ViewportState::new();
        vp.set_zoom(1.27);
        assert_eq!(vp.zoom_percent(), 127);
    }

    #[test]
    fn test_fit_to_width() {
        let mut vp = ViewportState::new();
        vp.fit_to_width(854.0);
        // (854 - 60) / 794 = 1.0
        assert!((vp.zoom() - 1.0).abs() < 1e-6);
        vp.fit_to_width(100.0);
        assert_eq!(vp.zoom(), 0.3);
        vp.fit_to_width(100_000.0);
        assert_eq!(vp.zoom(), 3.0);
    }

    #[test]
    fn test_wheel_requires_modifier() {
        let mut vp = ViewportState::new();
        assert!(!vp.on_wheel(-120.0, false));
        assert_eq!(vp.zoom(), 1.0);
        assert!(vp.on_wheel(-120.0, true));
        assert!((vp.zoom() - 1.05).abs() < 1e-6);
        assert!(vp.on_wheel(120.0, true));
        assert!((vp.zoom() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pan_cycle() {
        let mut vp = ViewportState::new();
        assert!(!vp.is_panning());
        assert_eq!(vp.cursor(), "grab");

        vp.pointer_down(100.0, 100.0);
        assert!(vp.is_panning());
        assert_eq!(vp.cursor(), "grabbing");

        // Dragging 10 units right/down scrolls content left/up by 15,
        // clamped at the origin.
        vp.pointer_move(110.0, 110.0);
        assert_eq!(vp.scroll_offset(), (0.0, 0.0));

        // Dragging the other way scrolls positively with the 1.5 gain.
        vp.pointer_move(90.0, 80.0);
        assert_eq!(vp.scroll_offset(), (15.0, 30.0));

        vp.pointer_up();
        assert!(!vp.is_panning());
    }

    #[test]
    fn test_pointer_move_ignored_when_idle() {
        let mut vp = ViewportState::new();
        vp.pointer_move(50.0, 50.0);
        assert_eq!(vp.scroll_offset(), (0.0, 0.0));
    }

    #[test]
    fn test_pointer_leave_stops_panning() {
        let mut vp = ViewportState::new();
        vp.pointer_down(0.0, 0.0);
        vp.pointer_leave();
        assert!(!vp.is_panning());
    }

    #[test]
    fn test_zoom_survives_pan_and_reset_is_explicit() {
        let mut vp = ViewportState::new();
        vp.set_zoom(1.6);
        vp.pointer_down(0.0, 0.0);
        vp.pointer_move(-10.0, 0.0);
        vp.pointer_up();
        assert!((vp.zoom() - 1.6).abs() < 1e-6);
        vp.reset_zoom();
        assert_eq!(vp.zoom(), 1.0);
    }
}
