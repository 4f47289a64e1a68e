use clap::Parser;
use macroquad::prelude::Conf;

mod app;
mod constants;
mod controls;
mod hud;
mod render;
mod state;

/// Animated ballistic arc viewer
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON configuration file with launch, sampler and viewer defaults
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

fn window_conf() -> Conf {
    app::window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();
    ballistic_sim::logging::init(args.verbose);

    if let Err(err) = app::run(args.config.as_deref()).await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
