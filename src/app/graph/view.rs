use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui,
    pos2, vec2,
};
use tracing::debug;

use crate::family::{NodeRole, build_tree};
use crate::util::{lifespan, truncate_label};

use super::super::highlight::{Emphasis, emphasis_for};
use super::super::render_utils::{
    draw_background, fade_into_canvas, gender_color, segment_visible, tint_toward,
};
use super::super::viewport::GestureMode;
use super::super::{TreeCache, TreeCacheKey, ViewModel};
use super::layout::{CARD_SIZE, PlacedCard, layout_tree};
use super::lines::LineKind;

/// Below this scale cards are drawn as plain boxes.
const TEXT_MIN_SCALE: f32 = 0.35;

fn caption(card: &PlacedCard) -> String {
    match (card.role, card.depth) {
        (NodeRole::Child, 2) => "Grandchild".to_owned(),
        (NodeRole::Child, 3) => "Great-grandchild".to_owned(),
        (NodeRole::Child, depth) if depth > 3 => format!("{}x great-grandchild", depth - 2),
        (role, _) => role.label().to_owned(),
    }
}

impl ViewModel {
    pub(in crate::app) fn ensure_tree(&mut self) {
        let key = TreeCacheKey {
            snapshot_revision: self.snapshot_revision,
            root_id: self.root_id.clone(),
            max_depth: self.max_depth,
        };
        if self.tree_cache.as_ref().is_some_and(|cache| cache.key == key) {
            return;
        }

        let tree = build_tree(&self.root_id, &self.snapshot.index, self.max_depth);
        let layout = tree.as_ref().map(layout_tree);
        debug!(
            root = %self.root_id,
            max_depth = self.max_depth,
            cards = layout.as_ref().map_or(0, |layout| layout.cards.len()),
            "rebuilt tree layout"
        );

        self.tree_cache = Some(TreeCache { key, tree, layout });
    }

    /// Zooms and pans so the whole tree fits the last drawn canvas.
    pub(in crate::app) fn fit_tree(&mut self) {
        let Some(bounds) = self
            .tree_cache
            .as_ref()
            .and_then(|cache| cache.layout.as_ref())
            .map(|layout| layout.bounds)
        else {
            return;
        };
        if !bounds.is_positive() || self.canvas_size.x <= 0.0 || self.canvas_size.y <= 0.0 {
            return;
        }

        let padded = bounds.expand(40.0);
        let fit = (self.canvas_size.x / padded.width()).min(self.canvas_size.y / padded.height());
        self.viewport.set_zoom((fit * 100.0).floor() as i32);

        let target = -padded.center().to_vec2() * self.viewport.transform().scale;
        self.viewport.pan_by(target - self.viewport.pan_offset());
    }

    fn card_at(cards: &[PlacedCard], world: Pos2) -> Option<usize> {
        // Later cards are painted on top, so they win the hit test.
        (0..cards.len())
            .rev()
            .find(|&index| cards[index].world_rect().contains(world))
    }

    pub(in crate::app) fn draw_tree(&mut self, ui: &mut Ui) {
        self.ensure_tree();
        self.search
            .update(&self.search_query, &self.snapshot.members, self.snapshot_revision);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        self.canvas_size = rect.size();

        let events =
            self.gesture_input
                .collect(ui, rect, &response, self.viewport.is_panning());
        for event in &events {
            self.viewport.handle(event);
        }

        // Trackpad pinch arrives as a zoom factor rather than touches.
        if response.hovered() && !self.gesture_input.has_touches() {
            let (zoom_delta, command) =
                ui.input(|input| (input.zoom_delta(), input.modifiers.command));
            if !command && (zoom_delta - 1.0).abs() > f32::EPSILON {
                self.viewport.pinch_by(zoom_delta);
            }
        }

        let transform = self.viewport.transform();
        let scale = transform.scale;
        draw_background(&painter, rect, transform);

        let Some(layout) = self.tree_cache.as_ref().and_then(|cache| cache.layout.as_ref()) else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("No member with id \"{}\" in this family.", self.root_id),
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        };

        let line_width = (1.6 * scale.sqrt()).clamp(0.8, 3.0);
        for frame in &layout.frames {
            for line in &frame.lines {
                let start = transform.world_to_screen(rect, frame.to_world(line.from));
                let end = transform.world_to_screen(rect, frame.to_world(line.to));
                if !segment_visible(rect, start, end, line_width) {
                    continue;
                }

                let color = if line.kind == LineKind::SpouseLink {
                    Color32::from_rgb(176, 132, 150)
                } else {
                    Color32::from_gray(128)
                };
                painter.line_segment([start, end], Stroke::new(line_width, color));
            }
        }

        let card_rects = layout
            .cards
            .iter()
            .map(|card| {
                Rect::from_center_size(
                    transform.world_to_screen(rect, card.center),
                    CARD_SIZE * scale,
                )
            })
            .collect::<Vec<_>>();

        let hovered = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .and_then(|pointer| {
                let world = transform.screen_to_world(rect, pointer);
                Self::card_at(&layout.cards, world.to_pos2())
            });

        let cursor_icon = match self.viewport.mode() {
            GestureMode::Panning { .. } => Some(CursorIcon::Grabbing),
            GestureMode::Pinching { .. } => None,
            GestureMode::Idle => hovered.map(|_| CursorIcon::PointingHand),
        };
        if let Some(cursor_icon) = cursor_icon {
            ui.output_mut(|output| output.cursor_icon = cursor_icon);
        }

        let selected_color = Color32::from_rgb(245, 206, 93);
        let corner_radius = 8.0 * scale;

        for (index, card) in layout.cards.iter().enumerate() {
            let card_rect = card_rects[index];
            if !rect.intersects(card_rect) {
                continue;
            }

            let is_selected = self.viewport.selected() == Some(card.member.id.as_str());
            let is_hovered = hovered == Some(index);
            let emphasis = emphasis_for(&self.search, &card.member.id);

            let base_color = gender_color(card.member.gender);
            let fill = match emphasis {
                Emphasis::Highlighted => tint_toward(base_color, Color32::from_rgb(103, 196, 255), 0.68),
                Emphasis::Dimmed => fade_into_canvas(base_color, 0.38),
                Emphasis::Neutral => base_color,
            };
            let fill = if is_hovered {
                tint_toward(fill, Color32::from_rgb(255, 164, 101), 0.35)
            } else {
                fill
            };

            painter.rect_filled(card_rect, corner_radius, fill);
            let stroke = if is_selected {
                Stroke::new(2.5, selected_color)
            } else if card.role == NodeRole::Root {
                Stroke::new(1.8, Color32::from_gray(230))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.rect_stroke(card_rect, corner_radius, stroke, StrokeKind::Inside);

            if card.has_more_children {
                let tip = card_rect.center_bottom() + vec2(0.0, 9.0 * scale);
                let half = 6.0 * scale;
                painter.add(Shape::convex_polygon(
                    vec![
                        pos2(tip.x - half, card_rect.bottom() + 2.0 * scale),
                        pos2(tip.x + half, card_rect.bottom() + 2.0 * scale),
                        tip,
                    ],
                    Color32::from_gray(170),
                    Stroke::NONE,
                ));
            }

            if scale < TEXT_MIN_SCALE {
                continue;
            }

            let text_color = if emphasis == Emphasis::Dimmed {
                Color32::from_gray(150)
            } else {
                Color32::from_gray(238)
            };
            let mut name = truncate_label(&card.member.full_name(), 22);
            if !card.member.is_living {
                name.push_str(" †");
            }
            painter.text(
                card_rect.center() - vec2(0.0, 14.0 * scale),
                Align2::CENTER_CENTER,
                name,
                FontId::proportional(14.0 * scale),
                text_color,
            );
            if let Some(lifespan) = lifespan(&card.member) {
                painter.text(
                    card_rect.center() + vec2(0.0, 4.0 * scale),
                    Align2::CENTER_CENTER,
                    lifespan,
                    FontId::proportional(12.0 * scale),
                    text_color,
                );
            }
            painter.text(
                card_rect.center() + vec2(0.0, 21.0 * scale),
                Align2::CENTER_CENTER,
                caption(card),
                FontId::proportional(10.0 * scale),
                Color32::from_gray(180),
            );
        }

        if let Some(index) = hovered {
            let card = &layout.cards[index];
            let mut panel_text = format!("{}  |  {}", card.member.full_name(), caption(card));
            if let Some(lifespan) = lifespan(&card.member) {
                panel_text.push_str(&format!("  |  {lifespan}"));
            }
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        painter.text(
            rect.right_bottom() - vec2(10.0, 10.0),
            Align2::RIGHT_BOTTOM,
            format!("{}%", self.viewport.zoom_level()),
            FontId::proportional(12.0),
            Color32::from_gray(170),
        );

        let Some(id) = hovered.map(|index| layout.cards[index].member.id.clone()) else {
            return;
        };
        if response.double_clicked_by(egui::PointerButton::Primary) {
            self.set_root(id);
        } else if response.clicked_by(egui::PointerButton::Primary) {
            self.viewport.select(Some(id));
        }
    }
}
