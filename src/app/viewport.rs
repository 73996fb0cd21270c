//! Pan/zoom state for the tree canvas and the gesture state machine that
//! drives it.
//!
//! The controller is in one of three modes: idle, panning (one pointer or
//! one finger down) or pinching (two fingers down). Wheel zoom never changes
//! the mode, so it interleaves with an active pan. Zoom is an integer
//! percentage clamped to `MIN_ZOOM..=MAX_ZOOM` on every write.

use eframe::egui::{Pos2, Rect, Vec2};

pub const MIN_ZOOM: i32 = 10;
pub const MAX_ZOOM: i32 = 200;
pub const DEFAULT_ZOOM: i32 = 100;
pub const ZOOM_STEP: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw input, already translated into canvas coordinates.
///
/// `touches` always lists every contact point still on the surface.
/// `delta_y` uses the browser sign: negative when scrolling up.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    PointerDown { pos: Pos2, button: PointerButton },
    PointerMove { pos: Pos2 },
    PointerUp,
    PointerLeave,
    Wheel { delta_y: f32 },
    TouchStart { touches: Vec<Pos2> },
    TouchMove { touches: Vec<Pos2> },
    TouchEnd { touches: Vec<Pos2> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureMode {
    Idle,
    Panning { last: Pos2 },
    Pinching { initial_distance: f32, initial_zoom: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    zoom_level: i32,
    pan_offset: Vec2,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM,
            pan_offset: Vec2::ZERO,
        }
    }
}

impl ViewportState {
    pub fn zoom_level(&self) -> i32 {
        self.zoom_level
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }
}

/// `translate(pan) scale(zoom / 100)` around the centre of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub translation: Vec2,
    pub scale: f32,
}

impl ViewTransform {
    pub fn world_to_screen(&self, rect: Rect, world: Vec2) -> Pos2 {
        rect.center() + self.translation + world * self.scale
    }

    pub fn screen_to_world(&self, rect: Rect, screen: Pos2) -> Vec2 {
        (screen - rect.center() - self.translation) / self.scale
    }
}

#[derive(Clone, Debug)]
pub struct ViewportController {
    state: ViewportState,
    mode: GestureMode,
    selected: Option<String>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            state: ViewportState::default(),
            mode: GestureMode::Idle,
            selected: None,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn zoom_level(&self) -> i32 {
        self.state.zoom_level
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.state.pan_offset
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, GestureMode::Panning { .. })
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            translation: self.state.pan_offset,
            scale: self.state.zoom_level as f32 / 100.0,
        }
    }

    /// Applies one input event. Returns whether zoom or pan changed.
    pub fn handle(&mut self, event: &GestureEvent) -> bool {
        let before = self.state;

        match event {
            GestureEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
            } => {
                if self.mode == GestureMode::Idle {
                    self.mode = GestureMode::Panning { last: *pos };
                }
            }
            GestureEvent::PointerDown { .. } => {}
            GestureEvent::PointerMove { pos } => self.drag_to(*pos),
            GestureEvent::PointerUp | GestureEvent::PointerLeave => {
                if self.is_panning() {
                    self.mode = GestureMode::Idle;
                }
            }
            GestureEvent::Wheel { delta_y } => self.wheel(*delta_y),
            GestureEvent::TouchStart { touches } => self.touch_start(touches),
            GestureEvent::TouchMove { touches } => self.touch_move(touches),
            GestureEvent::TouchEnd { touches } => self.touch_end(touches),
        }

        self.state != before
    }

    fn drag_to(&mut self, pos: Pos2) {
        if let GestureMode::Panning { last } = self.mode {
            self.state.pan_offset += pos - last;
            self.mode = GestureMode::Panning { last: pos };
        }
    }

    fn touch_start(&mut self, touches: &[Pos2]) {
        match touches {
            [] => {}
            [single] => {
                if self.mode == GestureMode::Idle {
                    self.mode = GestureMode::Panning { last: *single };
                }
            }
            [first, second, ..] => {
                self.mode = GestureMode::Pinching {
                    initial_distance: first.distance(*second),
                    initial_zoom: self.state.zoom_level,
                };
            }
        }
    }

    fn touch_move(&mut self, touches: &[Pos2]) {
        match (self.mode, touches) {
            (GestureMode::Panning { .. }, [single]) => self.drag_to(*single),
            (
                GestureMode::Pinching {
                    initial_distance,
                    initial_zoom,
                },
                [first, second, ..],
            ) => {
                if initial_distance <= f32::EPSILON {
                    return;
                }
                let ratio = first.distance(*second) / initial_distance;
                self.write_zoom(initial_zoom as f32 * ratio);
            }
            _ => {}
        }
    }

    fn touch_end(&mut self, touches: &[Pos2]) {
        match (self.mode, touches) {
            (GestureMode::Pinching { .. }, [first, second, ..]) => {
                // The pinching pair may have changed; measure from where it is now.
                self.mode = GestureMode::Pinching {
                    initial_distance: first.distance(*second),
                    initial_zoom: self.state.zoom_level,
                };
            }
            (GestureMode::Pinching { .. }, _) => self.mode = GestureMode::Idle,
            (GestureMode::Panning { .. }, []) => self.mode = GestureMode::Idle,
            _ => {}
        }
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.state.pan_offset += delta;
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.zoom_in();
        } else if delta_y > 0.0 {
            self.zoom_out();
        }
    }

    pub fn zoom_in(&mut self) {
        self.write_zoom((self.state.zoom_level + ZOOM_STEP) as f32);
    }

    pub fn zoom_out(&mut self) {
        self.write_zoom((self.state.zoom_level - ZOOM_STEP) as f32);
    }

    pub fn set_zoom(&mut self, level: i32) {
        self.write_zoom(level as f32);
    }

    /// Scales the current zoom by `scale_factor`, e.g. 0.5 halves it.
    pub fn pinch_by(&mut self, scale_factor: f32) {
        if scale_factor < 0.0 {
            return;
        }
        self.write_zoom(self.state.zoom_level as f32 * scale_factor);
    }

    fn write_zoom(&mut self, level: f32) {
        if !level.is_finite() {
            return;
        }
        self.state.zoom_level = level.round().clamp(MIN_ZOOM as f32, MAX_ZOOM as f32) as i32;
    }

    /// Back to 100% and no pan. Also ends any gesture and clears selection.
    pub fn reset(&mut self) {
        self.state = ViewportState::default();
        self.mode = GestureMode::Idle;
        self.selected = None;
    }
}
