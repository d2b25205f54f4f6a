use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use glam::Vec3;

use tf_constellation::graph::stats::GraphStats;
use tf_constellation::graph::{Graph, load_graph_file};
use tf_constellation::picking::OrbitCamera;
use tf_constellation::session::Session;

mod graph;
mod render_utils;
mod ui;

#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub radius: f32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
}

pub struct ConstellationApp {
    graph_path: PathBuf,
    config: SceneConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<Graph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Graph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    session: Session,
    config: SceneConfig,
    camera: OrbitCamera,
    file_name: String,
    provider_filter: String,
    module_filter: String,
    mode_filter: String,
    search: String,
    providers: Vec<String>,
    modules: Vec<String>,
    modes: Vec<String>,
    stats: GraphStats,
    stars: Vec<Vec3>,
    hovered: Option<String>,
    auto_rotate: bool,
}

impl ConstellationApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: PathBuf, config: SceneConfig) -> Self {
        let state = Self::start_load(graph_path.clone());
        Self {
            graph_path,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: PathBuf) -> Receiver<Result<Graph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_graph_file(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: PathBuf) -> AppState {
        log::info!("loading graph from {}", graph_path.display());
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }

    fn ready_state(&self, result: Result<Graph, String>) -> AppState {
        match result {
            Ok(graph) => {
                log::info!(
                    "loaded {} resources and {} dependencies",
                    graph.node_count(),
                    graph.edge_count()
                );
                AppState::Ready(Box::new(ViewModel::new(
                    graph,
                    self.config,
                    file_label(&self.graph_path),
                )))
            }
            Err(error) => {
                log::error!("failed to load graph: {error}");
                AppState::Error(error)
            }
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for ConstellationApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading infrastructure graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load infrastructure graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
                if retry {
                    self.state = Self::start_load(self.graph_path.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    log::info!("reloading graph from {}", self.graph_path.display());
                    self.reload_rx = Some(Self::spawn_load(self.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = self.ready_state(result);
        }
    }
}
