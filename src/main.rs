use clap::Parser;
use eframe::egui;
use insurance_dashboard::app::InsuranceDashboardApp;
use insurance_dashboard::config::Args;
use insurance_dashboard::state::{AppState, Status};

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::new(usize::from(args.bins));
    if args.data.exists() {
        state.load_path(&args.data);
    } else {
        log::warn!("{} not found, starting without data", args.data.display());
        state.status = Some(Status::Info(format!(
            "{} not found, use File → Open…",
            args.data.display()
        )));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Insurance Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(InsuranceDashboardApp::new(state)))),
    )
}
