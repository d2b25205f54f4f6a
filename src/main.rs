mod app;

use std::path::PathBuf;

use clap::Parser;
use tf_constellation::layout::DEFAULT_RADIUS;
use tf_constellation::picking::{DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV_DEGREES};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph JSON with `nodes` and `edges` arrays, as emitted by the state parser
    graph: PathBuf,

    /// Radius of the sphere the resources are laid out on
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: f32,

    #[arg(long, default_value_t = DEFAULT_CAMERA_DISTANCE)]
    camera_distance: f32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = DEFAULT_FOV_DEGREES)]
    fov: f32,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = app::SceneConfig {
        radius: args.radius,
        camera_distance: args.camera_distance,
        fov_degrees: args.fov,
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 920.0])
            .with_min_inner_size([700.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "tf-constellation",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ConstellationApp::new(
                cc,
                args.graph.clone(),
                config,
            )))
        }),
    )
}
