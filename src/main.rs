// rbanner - A rotating image banner for Wayland
// Shows a carousel of images in a floating, always-on-top window

use anyhow::Result;
use log::info;
use rbanner::{cli, image_loader, wayland};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args = cli::parse_args()?;

    info!(
        "Starting rbanner with {} image(s), delay: {} ms, opacity: {}",
        args.sources.len(),
        args.delay_ms,
        args.opacity
    );

    // Load and pre-scale the pages
    let pages = image_loader::load_pages(&args.sources)?;

    info!("Loaded {} page(s)", pages.len());

    wayland::run(args, pages)
}
