use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use star_lights::app::App;
use star_lights::cli::Cli;
use star_lights::config::AppConfig;
use star_lights::headless;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    if cli.no_ui {
        let report = headless::run(&config, cli.frames);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
