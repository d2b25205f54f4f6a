use eframe::egui::{Color32, Painter, Pos2, Rect};
use glam::Vec3;

use tf_constellation::picking::OrbitCamera;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        base.a(),
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// World point to screen position plus its NDC depth, clipped to the frustum depth range.
pub(super) fn project_to_screen(rect: Rect, camera: &OrbitCamera, world: Vec3) -> Option<(Pos2, f32)> {
    let ndc = camera.project(world)?;
    if !(-1.0..=1.0).contains(&ndc.z) {
        return None;
    }

    let screen = Pos2::new(
        rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
    );
    Some((screen, ndc.z))
}

/// 1.0 on the near side of the sphere, fading toward the far side.
pub(super) fn depth_shade(camera: &OrbitCamera, world: Vec3, radius: f32) -> f32 {
    let distance = (world - camera.eye()).length();
    let nearest = camera.distance - radius;
    let t = ((distance - nearest) / (2.0 * radius).max(1.0)).clamp(0.0, 1.0);
    1.0 - (t * 0.55)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: &OrbitCamera, stars: &[Vec3]) {
    painter.rect_filled(rect, 0.0, Color32::BLACK);

    for star in stars {
        let Some((position, _)) = project_to_screen(rect, camera, *star) else {
            continue;
        };
        if rect.contains(position) {
            painter.circle_filled(position, 0.8, Color32::from_rgba_unmultiplied(255, 255, 255, 204));
        }
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    if max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom() {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let top_left = rect.left_top();
    let top_right = rect.right_top();
    let bottom_left = rect.left_bottom();
    let bottom_right = rect.right_bottom();

    segments_intersect(start, end, top_left, top_right)
        || segments_intersect(start, end, top_right, bottom_right)
        || segments_intersect(start, end, bottom_right, bottom_left)
        || segments_intersect(start, end, bottom_left, top_left)
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blending_fully_takes_overlay_rgb() {
        let blended = blend_color(Color32::from_rgb(10, 20, 30), Color32::WHITE, 1.0);
        assert_eq!(blended, Color32::from_rgb(255, 255, 255));
        assert_eq!(blend_color(Color32::RED, Color32::WHITE, 0.0), Color32::RED);
    }

    #[test]
    fn edges_crossing_the_viewport_are_visible() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));
        assert!(edge_visible(rect, Pos2::new(-50.0, 50.0), Pos2::new(150.0, 50.0), 0.0));
        assert!(!edge_visible(rect, Pos2::new(-50.0, -50.0), Pos2::new(-10.0, -5.0), 0.0));
    }

    #[test]
    fn center_of_sphere_projects_to_viewport_center() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(200.0, 100.0));
        let mut camera = OrbitCamera::default();
        camera.set_viewport(rect.width(), rect.height());
        let (position, _) = project_to_screen(rect, &camera, Vec3::ZERO).unwrap();
        assert!((position - rect.center()).length() < 1e-3);
    }
}
