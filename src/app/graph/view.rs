use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui};

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, circle_visible, depth_shade, dim_color, draw_background, edge_visible,
    project_to_screen,
};

impl ViewModel {
    pub(in crate::app) fn draw_constellation(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.camera.set_viewport(rect.width(), rect.height());
        self.handle_orbit(&response);
        self.handle_zoom(ui, &response);
        self.advance_auto_rotate(ui, &response);
        self.handle_click(rect, &response);

        draw_background(&painter, rect, &self.camera, &self.stars);

        self.hovered = self.hovered_node(ui, rect, &response);
        if self.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let frame = self.session.frame();
        if frame.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No resources match the current filters.",
                FontId::proportional(16.0),
                Color32::GRAY,
            );
            return;
        }

        for edge in &frame.edges {
            let Some((source, target)) = self.camera.clip_segment(edge.source, edge.target) else {
                continue;
            };
            let (Some((start, _)), Some((end, _))) = (
                project_to_screen(rect, &self.camera, source),
                project_to_screen(rect, &self.camera, target),
            ) else {
                continue;
            };
            if edge_visible(rect, start, end, 2.0) {
                painter.line_segment([start, end], Stroke::new(1.0, edge.color));
            }
        }

        let radius = self.session.radius();
        let mut draw_order = frame
            .nodes
            .iter()
            .filter_map(|node| {
                let (screen, depth) = project_to_screen(rect, &self.camera, node.position)?;
                let screen_radius = self
                    .camera
                    .screen_radius(node.position, node.size, rect.height())
                    .clamp(1.5, 60.0);
                circle_visible(rect, screen, screen_radius)
                    .then_some((node, screen, screen_radius, depth))
            })
            .collect::<Vec<_>>();
        draw_order.sort_by(|a, b| b.3.total_cmp(&a.3));

        for (node, screen, screen_radius, _) in draw_order {
            let lit = blend_color(node.color, node.highlight.emissive, node.highlight.intensity);
            let shade = if node.highlight.is_emphasized() {
                1.0
            } else {
                depth_shade(&self.camera, node.position, radius)
            };
            painter.circle_filled(screen, screen_radius, dim_color(lit, shade));

            if node.highlight.is_emphasized() {
                painter.circle_stroke(
                    screen,
                    screen_radius + 3.0,
                    Stroke::new(1.5, Color32::from_rgba_unmultiplied(255, 255, 255, 200)),
                );
            } else if self.hovered.as_deref() == Some(node.id.as_str()) {
                painter.circle_stroke(
                    screen,
                    screen_radius + 2.0,
                    Stroke::new(1.0, Color32::from_gray(180)),
                );
            }
        }

        if let Some(hovered) = &self.hovered {
            response.on_hover_text_at_pointer(hovered.as_str());
        }
    }
}
