use eframe::egui::{self, RichText, Sense, Ui, vec2};

use tf_constellation::graph::Node;
use tf_constellation::graph::stats::group_by_module;
use tf_constellation::query::search_suggestions;
use tf_constellation::scene::provider_color;
use tf_constellation::util::short_name;

use super::super::ViewModel;

const SUGGESTION_LIMIT: usize = 8;

fn filter_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    all_label: &str,
    value: &mut String,
    options: &[String],
) {
    ui.label(label);
    let selected_text = if value.is_empty() {
        all_label.to_owned()
    } else {
        value.clone()
    };

    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), all_label);
            for option in options {
                ui.selectable_value(value, option.clone(), option.as_str());
            }
        });
    ui.add_space(6.0);
}

fn node_link(ui: &mut Ui, node: &Node, selected: bool) -> bool {
    let mut text = RichText::new(short_name(&node.id));
    if selected {
        text = text.strong().color(egui::Color32::WHITE);
    }
    ui.link(text).on_hover_text(node.id.as_str()).clicked()
}

fn swatch(ui: &mut Ui, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.0, color);
}

impl ViewModel {
    fn visible_graph_nodes(&self) -> Vec<&Node> {
        let graph = self.session.graph();
        self.session
            .frame()
            .nodes
            .iter()
            .filter_map(|scene_node| graph.node(&scene_node.id))
            .collect()
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.add_space(6.0);

        filter_combo(
            ui,
            "provider_filter",
            "Provider",
            "All Providers",
            &mut self.provider_filter,
            &self.providers,
        );
        filter_combo(
            ui,
            "module_filter",
            "Module",
            "All Modules",
            &mut self.module_filter,
            &self.modules,
        );
        filter_combo(
            ui,
            "mode_filter",
            "Mode",
            "All Modes",
            &mut self.mode_filter,
            &self.modes,
        );

        ui.label("Search");
        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("id, type or provider")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);
        if ui.button("Clear filters").clicked() {
            self.provider_filter.clear();
            self.module_filter.clear();
            self.mode_filter.clear();
            self.search.clear();
        }

        let mut focus_target: Option<String> = None;
        let selection = self.session.selection();

        egui::ScrollArea::vertical()
            .id_salt("controls_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.search.trim().is_empty() {
                    ui.separator();
                    ui.label(RichText::new("Jump to").strong());
                    let visible = self.visible_graph_nodes();
                    let suggestions = search_suggestions(visible, &self.search, SUGGESTION_LIMIT);
                    if suggestions.is_empty() {
                        ui.label("No visible resource matches.");
                    }
                    for node in suggestions {
                        if node_link(ui, node, selection.is_selected(&node.id)) {
                            focus_target = Some(node.id.clone());
                        }
                    }
                }

                ui.separator();
                ui.label(RichText::new("Providers").strong());
                for (provider, count) in &self.stats.by_provider {
                    ui.horizontal(|ui| {
                        swatch(ui, provider_color(provider));
                        ui.label(format!("{provider}: {count}"));
                    });
                }

                ui.separator();
                ui.label(RichText::new("Modes").strong());
                for (mode, count) in &self.stats.by_mode {
                    ui.label(format!("{mode}: {count}"));
                }

                ui.separator();
                ui.label(RichText::new("Visible modules").strong());
                let visible = self.visible_graph_nodes();
                for (module, members) in group_by_module(visible) {
                    egui::CollapsingHeader::new(format!("{module} ({})", members.len()))
                        .id_salt(module)
                        .show(ui, |ui| {
                            for member in members {
                                if node_link(ui, member, selection.is_selected(&member.id)) {
                                    focus_target = Some(member.id.clone());
                                }
                            }
                        });
                }
            });

        if let Some(node_id) = focus_target {
            self.focus_node(&node_id);
        }
    }
}
