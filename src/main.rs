use tracing_paper::gui::app::run_app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = pollster::block_on(run_app()) {
        log::error!("{e}");
        eprintln!("Edge Modification App failed to start: {e}");
        std::process::exit(1);
    }
}
