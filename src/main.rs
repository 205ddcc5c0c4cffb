mod app;
mod camera;
mod carousel;
mod catalog;
mod cli;
mod color;
mod config;
mod error;
mod graphics;
mod input;
mod logging;
mod math;
mod mesh;
mod renderer;
mod scene;
mod spring;
mod stars;
mod terminal;
mod texture;
mod ui;
mod vertex;
mod visual;

use clap::Parser;
use tracing::info;

use crate::app::App;
use crate::cli::CliArgs;
use crate::config::Config;
use crate::error::AppError;
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::terminal::TerminalSession;

/// Main function
fn main() -> Result<(), AppError> {
    let args = CliArgs::parse();

    let mut config = Config::load(&args.config)?;
    config.apply_cli_overrides(&args);

    if let Some(path) = &args.write_default_config {
        Config::default().save(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    logging::init_logging(&config.log)?;

    let start = catalog::find(&config.view.start_planet)
        .ok_or_else(|| AppError::UnknownPlanet(config.view.start_planet.clone()))?;
    info!(texture_dir = %config.assets.texture_dir.display(), "loading textures");
    let textures = texture::spawn_loaders(&config.assets.texture_dir, &catalog::CATALOG);

    let scene = Scene::new(start, config.view.camera()).with_texture_source(textures);
    let renderer = Renderer::new(
        config.view.sphere_segments,
        config.view.ring_segments,
        config.view.star_count,
    );
    let mut app = App::new(scene, renderer, config.view.target_fps);

    let mut session = TerminalSession::enter()?;
    let result = app.run(&mut session);
    drop(session);
    result
}
