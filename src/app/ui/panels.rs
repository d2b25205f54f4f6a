use eframe::egui::{self, Align, Context, Layout};

use tf_constellation::graph::Graph;
use tf_constellation::graph::stats::{graph_stats, unique_modes, unique_modules, unique_providers};
use tf_constellation::picking::OrbitCamera;
use tf_constellation::query::FilterPredicate;
use tf_constellation::session::Session;
use tf_constellation::util::star_field;

use super::super::{SceneConfig, ViewModel};

const STAR_COUNT: usize = 1000;
const STAR_EXTENT: f32 = 1000.0;

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

impl ViewModel {
    pub(in crate::app) fn new(graph: Graph, config: SceneConfig, file_name: String) -> Self {
        let providers = unique_providers(&graph).into_iter().map(str::to_owned).collect();
        let modules = unique_modules(&graph).into_iter().map(str::to_owned).collect();
        let modes = unique_modes(&graph).into_iter().map(str::to_owned).collect();
        let stats = graph_stats(&graph);

        Self {
            session: Session::new(graph, config.radius),
            config,
            camera: OrbitCamera::new(config.camera_distance, config.fov_degrees),
            file_name,
            provider_filter: String::new(),
            module_filter: String::new(),
            mode_filter: String::new(),
            search: String::new(),
            providers,
            modules,
            modes,
            stats,
            stars: star_field(STAR_COUNT, STAR_EXTENT),
            hovered: None,
            auto_rotate: false,
        }
    }

    pub(in crate::app) fn current_predicate(&self) -> FilterPredicate {
        FilterPredicate {
            provider: non_empty(&self.provider_filter),
            module: non_empty(&self.module_filter),
            mode: non_empty(&self.mode_filter),
            search: non_empty(&self.search),
        }
    }

    pub(in crate::app) fn reset_camera(&mut self) {
        let aspect = self.camera.aspect;
        self.camera = OrbitCamera::new(self.config.camera_distance, self.config.fov_degrees);
        self.camera.aspect = aspect;
    }

    fn sync_predicate(&mut self) {
        let predicate = self.current_predicate();
        if self.session.set_predicate(predicate) {
            log::debug!("filters changed: {:?}", self.session.predicate());
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, reload_requested: &mut bool, is_loading: bool) {
        self.sync_predicate();

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("tf-constellation");
                    ui.separator();
                    ui.label(self.file_name.as_str());
                    ui.label(format!("{} Resources", self.stats.total_nodes));
                    ui.label(format!("{} Dependencies", self.stats.total_edges));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload file"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset camera").clicked() {
                        self.reset_camera();
                    }
                    ui.checkbox(&mut self.auto_rotate, "Auto-rotate");
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let frame = self.session.frame();
                        ui.label(format!(
                            "visible: {} nodes / {} edges",
                            frame.nodes.len(),
                            frame.edges.len()
                        ));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        // Filter widgets changed this frame must be applied before details and scene paint.
        self.sync_predicate();

        if self.session.selected_node().is_some() {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(380.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_constellation(ui));
    }
}
