use eframe::egui::{self, Rect, Ui};
use glam::Vec2;

use tf_constellation::picking::{Ray, ndc_from_pointer, pick};

use super::super::ViewModel;

const AUTO_ROTATE_SPEED: f32 = 0.08;

fn ray_at(model: &ViewModel, rect: Rect, pointer: egui::Pos2) -> Ray {
    let ndc = ndc_from_pointer(
        Vec2::new(pointer.x, pointer.y),
        Vec2::new(rect.left(), rect.top()),
        Vec2::new(rect.width(), rect.height()),
    );
    model.camera.ray_from_ndc(ndc)
}

impl ViewModel {
    pub(in crate::app) fn handle_orbit(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.orbit(Vec2::new(delta.x, delta.y));
        }
    }

    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() > f32::EPSILON {
            self.camera.zoom(scroll);
        }
    }

    pub(in crate::app) fn advance_auto_rotate(&mut self, ui: &Ui, response: &egui::Response) {
        if !self.auto_rotate || response.dragged() || self.session.selection().id().is_some() {
            return;
        }

        let delta_seconds = ui.input(|input| input.stable_dt).clamp(1.0 / 240.0, 1.0 / 20.0);
        self.camera.yaw += AUTO_ROTATE_SPEED * delta_seconds;
        ui.ctx().request_repaint();
    }

    /// Node under the pointer, without touching the selection.
    pub(in crate::app) fn hovered_node(&self, ui: &Ui, rect: Rect, response: &egui::Response) -> Option<String> {
        if !response.hovered() {
            return None;
        }

        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        let ray = ray_at(self, rect, pointer);
        pick(&ray, self.session.frame().pick_targets()).map(|hit| hit.id.to_owned())
    }

    pub(in crate::app) fn handle_click(&mut self, rect: Rect, response: &egui::Response) {
        if !response.clicked_by(egui::PointerButton::Primary) {
            return;
        }

        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };
        let ray = ray_at(self, rect, pointer);
        self.session.pick(&ray);
    }

    pub(in crate::app) fn focus_node(&mut self, node_id: &str) {
        if let Some(position) = self.session.frame().layout.get(node_id) {
            self.camera.face(position);
        }
    }
}
