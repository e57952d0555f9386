use eframe::egui;
use log::info;

mod app;
mod camera;
mod color;
mod controller;
mod interaction;
mod math;
mod render;
mod scene;

use app::VectorApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("starting vector_viz");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native(
        "3D Vector Calculator",
        options,
        Box::new(|cc| Box::new(VectorApp::new(cc))),
    )
}
