use eframe::egui::{self, Color32, RichText, Ui};

use tf_constellation::graph::stats::{node_dependencies, node_importance};
use tf_constellation::graph::{Node, NodeMode};
use tf_constellation::util::short_name;

use super::super::ViewModel;

enum DetailsAction {
    Close,
    Focus(String),
}

fn mode_badge(mode: NodeMode) -> RichText {
    let color = match mode {
        NodeMode::Managed => Color32::from_rgb(74, 222, 128),
        NodeMode::Data => Color32::from_rgb(96, 165, 250),
    };
    RichText::new(mode.as_str()).color(color).strong()
}

impl ViewModel {
    fn dependency_list(
        &self,
        ui: &mut Ui,
        title: &str,
        nodes: &[&Node],
        action: &mut Option<DetailsAction>,
    ) {
        ui.label(RichText::new(format!("{title} ({})", nodes.len())).strong());
        if nodes.is_empty() {
            ui.label("None");
            return;
        }

        for node in nodes {
            let visible = self.session.frame().layout.contains(&node.id);
            let label = if visible {
                short_name(&node.id).to_owned()
            } else {
                format!("{} (filtered out)", short_name(&node.id))
            };
            let response = ui.add_enabled(visible, egui::Link::new(label));
            if response.on_hover_text(node.id.as_str()).clicked() {
                *action = Some(DetailsAction::Focus(node.id.clone()));
            }
        }
    }

    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        let Some(node) = self.session.selected_node() else {
            return;
        };

        let mut action = None;

        ui.horizontal(|ui| {
            ui.heading("Resource");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    action = Some(DetailsAction::Close);
                }
            });
        });
        ui.label(RichText::new(node.id.as_str()).strong());
        ui.small(node.resource_type.as_str());
        ui.add_space(6.0);

        egui::Grid::new("resource_details")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label("Provider");
                ui.monospace(node.provider.as_str());
                ui.end_row();

                ui.label("Mode");
                ui.label(mode_badge(node.mode));
                ui.end_row();

                if let Some(module) = &node.module {
                    ui.label("Module");
                    ui.monospace(module.as_str());
                    ui.end_row();
                }

                ui.label("Importance");
                ui.label(node_importance(self.session.graph(), &node.id).to_string());
                ui.end_row();
            });

        let scalars = node.scalar_metadata().collect::<Vec<_>>();
        if !scalars.is_empty() {
            ui.separator();
            ui.label(RichText::new("Metadata").strong());
            egui::Grid::new("resource_metadata")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (key, value) in scalars {
                        ui.label(key);
                        ui.monospace(value.to_string());
                        ui.end_row();
                    }
                });
        }

        if let Some(tags) = node.tags().filter(|tags| !tags.is_empty()) {
            ui.separator();
            ui.label(RichText::new("Tags").strong());
            ui.horizontal_wrapped(|ui| {
                for (key, value) in tags {
                    ui.label(
                        RichText::new(format!("{key}: {value}"))
                            .monospace()
                            .color(Color32::from_rgb(167, 139, 250)),
                    );
                }
            });
        }

        let dependencies = node_dependencies(self.session.graph(), &node.id);
        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("dependency_scroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                self.dependency_list(ui, "Depends on", &dependencies.depends_on, &mut action);
                ui.add_space(6.0);
                self.dependency_list(ui, "Depended on by", &dependencies.depended_by, &mut action);
            });

        match action {
            Some(DetailsAction::Close) => self.session.clear_selection(),
            Some(DetailsAction::Focus(node_id)) => self.focus_node(&node_id),
            None => {}
        }
    }
}
