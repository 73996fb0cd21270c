use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, lerp};

use crate::family::Gender;

use super::viewport::ViewTransform;

pub(super) const CANVAS_COLOR: Color32 = Color32::from_rgb(19, 23, 29);

fn mix_channel(from: u8, to: u8, t: f32) -> u8 {
    lerp(f32::from(from)..=f32::from(to), t).round() as u8
}

/// Moves `base` toward `target` by `amount` in 0..=1, alpha included.
pub(super) fn tint_toward(base: Color32, target: Color32, amount: f32) -> Color32 {
    let t = amount.clamp(0.0, 1.0);
    let [r, g, b, a] = base.to_srgba_unmultiplied();
    let [tr, tg, tb, ta] = target.to_srgba_unmultiplied();

    Color32::from_rgba_unmultiplied(
        mix_channel(r, tr, t),
        mix_channel(g, tg, t),
        mix_channel(b, tb, t),
        mix_channel(a, ta, t),
    )
}

/// Sinks a card colour into the canvas. `keep` 1.0 leaves it untouched.
pub(super) fn fade_into_canvas(color: Color32, keep: f32) -> Color32 {
    let keep = keep.clamp(0.0, 1.0);
    let [r, g, b, _] = tint_toward(color, CANVAS_COLOR, 1.0 - keep).to_srgba_unmultiplied();
    let alpha = f32::from(color.a()) * (0.5 + keep * 0.5);

    Color32::from_rgba_unmultiplied(r, g, b, alpha.round() as u8)
}

pub(super) fn gender_color(gender: Gender) -> Color32 {
    match gender {
        Gender::Male => Color32::from_rgb(58, 92, 132),
        Gender::Female => Color32::from_rgb(128, 68, 98),
        Gender::Other => Color32::from_rgb(84, 112, 76),
        Gender::Unspecified => Color32::from_rgb(78, 84, 94),
    }
}

/// Grid that moves with the pan offset and widens with zoom.
pub(super) fn draw_background(painter: &Painter, rect: Rect, transform: ViewTransform) {
    painter.rect_filled(rect, 0.0, CANVAS_COLOR);

    let step = (48.0 * transform.scale.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + transform.translation;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            stroke,
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
        );
        y += step;
    }
}

/// Connectors are axis aligned, so a padded bounding-box test is exact enough.
pub(super) fn segment_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn tint_is_bounded_by_its_inputs() {
        let black = Color32::from_rgb(0, 0, 0);
        let white = Color32::from_rgb(255, 255, 255);

        assert_eq!(tint_toward(black, white, 0.0), black);
        assert_eq!(tint_toward(black, white, 1.0), white);
        assert_eq!(tint_toward(black, white, 7.0), white);
        assert_eq!(tint_toward(black, white, 0.5).r(), 128);
    }

    #[test]
    fn fading_moves_toward_the_canvas() {
        let color = Color32::from_rgb(200, 100, 50);
        let faded = fade_into_canvas(color, 0.5);

        assert!(faded.r() < color.r());
        assert!(faded.r() > CANVAS_COLOR.r());
        assert!(faded.a() < color.a());
        assert_eq!(fade_into_canvas(color, 1.0), color);
    }

    #[test]
    fn segments_outside_the_canvas_are_culled() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));

        assert!(segment_visible(rect, pos2(-50.0, 50.0), pos2(150.0, 50.0), 1.0));
        assert!(segment_visible(rect, pos2(10.0, 10.0), pos2(10.0, 20.0), 1.0));
        assert!(!segment_visible(rect, pos2(-50.0, -5.0), pos2(-10.0, -5.0), 1.0));
        assert!(!segment_visible(rect, pos2(120.0, 0.0), pos2(120.0, 90.0), 1.0));
    }
}
