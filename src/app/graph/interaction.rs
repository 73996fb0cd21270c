use eframe::egui::{self, Pos2, Rect, Response, TouchId, TouchPhase, Ui};

use super::super::viewport::{GestureEvent, PointerButton};

/// Turns egui's per-frame input into gesture events for the viewport.
///
/// Touch contacts are tracked here because egui reports them one at a time
/// while the viewport expects the full list of fingers still down.
#[derive(Clone, Debug, Default)]
pub(in crate::app) struct GestureInput {
    touches: Vec<(TouchId, Pos2)>,
}

impl GestureInput {
    pub(in crate::app) fn collect(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &Response,
        panning: bool,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        let touch_events = ui.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Touch { id, phase, pos, .. } => Some((*id, *phase, *pos)),
                    _ => None,
                })
                .collect::<Vec<_>>()
        });
        for (id, phase, pos) in touch_events {
            if let Some(event) = self.touch(id, phase, pos, rect) {
                events.push(event);
            }
        }

        // egui mirrors the first finger as a pointer; the touch path owns it.
        if !self.has_touches() {
            self.pointer_events(ui, rect, response, panning, &mut events);
        }

        if response.hovered() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                events.push(GestureEvent::Wheel { delta_y: -scroll });
            }
        }

        events
    }

    pub(in crate::app) fn has_touches(&self) -> bool {
        !self.touches.is_empty()
    }

    fn pointer_events(
        &self,
        ui: &Ui,
        rect: Rect,
        response: &Response,
        panning: bool,
        events: &mut Vec<GestureEvent>,
    ) {
        if response.drag_started()
            && let Some(button) = [
                egui::PointerButton::Primary,
                egui::PointerButton::Secondary,
                egui::PointerButton::Middle,
            ]
            .into_iter()
            .find(|button| response.drag_started_by(*button))
            && let Some(pos) = ui.input(|input| input.pointer.press_origin())
        {
            events.push(GestureEvent::PointerDown {
                pos,
                button: pointer_button(button),
            });
        }

        if response.dragged()
            && let Some(pos) = response.interact_pointer_pos()
        {
            events.push(GestureEvent::PointerMove { pos });
        }

        if response.drag_stopped() {
            events.push(GestureEvent::PointerUp);
        } else if panning {
            let inside = ui
                .input(|input| input.pointer.hover_pos())
                .is_some_and(|pos| rect.contains(pos));
            if !inside {
                events.push(GestureEvent::PointerLeave);
            }
        }
    }

    /// Updates the tracked contacts and reports the event for this change.
    /// Touches that start outside the canvas are never tracked.
    pub(in crate::app) fn touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        rect: Rect,
    ) -> Option<GestureEvent> {
        let tracked = self.touches.iter().position(|(touch_id, _)| *touch_id == id);

        match (phase, tracked) {
            (TouchPhase::Start, None) => {
                if !rect.contains(pos) {
                    return None;
                }
                self.touches.push((id, pos));
                Some(GestureEvent::TouchStart {
                    touches: self.positions(),
                })
            }
            (TouchPhase::Start | TouchPhase::Move, Some(index)) => {
                self.touches[index].1 = pos;
                Some(GestureEvent::TouchMove {
                    touches: self.positions(),
                })
            }
            (TouchPhase::End | TouchPhase::Cancel, Some(index)) => {
                self.touches.remove(index);
                Some(GestureEvent::TouchEnd {
                    touches: self.positions(),
                })
            }
            (TouchPhase::Move | TouchPhase::End | TouchPhase::Cancel, None) => None,
        }
    }

    fn positions(&self) -> Vec<Pos2> {
        self.touches.iter().map(|(_, pos)| *pos).collect()
    }
}

fn pointer_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Middle => PointerButton::Middle,
        _ => PointerButton::Secondary,
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::super::super::viewport::{GestureMode, ViewportController};
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 300.0))
    }

    fn feed(
        input: &mut GestureInput,
        viewport: &mut ViewportController,
        id: u64,
        phase: TouchPhase,
        pos: Pos2,
    ) {
        if let Some(event) = input.touch(TouchId(id), phase, pos, canvas()) {
            viewport.handle(&event);
        }
    }

    #[test]
    fn one_finger_pans() {
        let mut input = GestureInput::default();
        let mut viewport = ViewportController::new();

        feed(&mut input, &mut viewport, 1, TouchPhase::Start, pos2(100.0, 100.0));
        feed(&mut input, &mut viewport, 1, TouchPhase::Move, pos2(130.0, 90.0));
        feed(&mut input, &mut viewport, 1, TouchPhase::End, pos2(130.0, 90.0));

        assert_eq!(viewport.pan_offset(), eframe::egui::vec2(30.0, -10.0));
        assert_eq!(viewport.mode(), GestureMode::Idle);
    }

    #[test]
    fn two_fingers_pinch_zoom() {
        let mut input = GestureInput::default();
        let mut viewport = ViewportController::new();

        feed(&mut input, &mut viewport, 1, TouchPhase::Start, pos2(100.0, 100.0));
        feed(&mut input, &mut viewport, 2, TouchPhase::Start, pos2(200.0, 100.0));
        feed(&mut input, &mut viewport, 2, TouchPhase::Move, pos2(250.0, 100.0));

        assert_eq!(viewport.zoom_level(), 150);

        feed(&mut input, &mut viewport, 2, TouchPhase::End, pos2(250.0, 100.0));
        assert_eq!(viewport.mode(), GestureMode::Idle);
    }

    #[test]
    fn lifting_reports_the_remaining_fingers() {
        let mut input = GestureInput::default();
        let rect = canvas();

        input.touch(TouchId(1), TouchPhase::Start, pos2(10.0, 10.0), rect);
        input.touch(TouchId(2), TouchPhase::Start, pos2(20.0, 20.0), rect);

        assert_eq!(
            input.touch(TouchId(1), TouchPhase::Cancel, pos2(10.0, 10.0), rect),
            Some(GestureEvent::TouchEnd {
                touches: vec![pos2(20.0, 20.0)]
            })
        );
    }

    #[test]
    fn touches_outside_the_canvas_are_ignored() {
        let mut input = GestureInput::default();
        let rect = canvas();

        assert_eq!(
            input.touch(TouchId(7), TouchPhase::Start, pos2(-5.0, 10.0), rect),
            None
        );
        assert_eq!(
            input.touch(TouchId(7), TouchPhase::Move, pos2(5.0, 10.0), rect),
            None
        );
    }
}
