//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Command-line arguments. Values given here override the config file.
#[derive(Parser, Debug)]
#[command(name = "orrery3d", version, about = "A console-based 3D solar system viewer")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long, default_value = "orrery3d.ron")]
    pub config: PathBuf,

    /// Directory holding the planet textures.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of background stars.
    #[arg(long)]
    pub stars: Option<usize>,

    /// Planet to start on, by name or index.
    #[arg(long)]
    pub start: Option<String>,

    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace or target directives).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write the default configuration to this path and exit.
    #[arg(long)]
    pub write_default_config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.texture_dir {
            self.assets.texture_dir = dir.clone();
        }
        if let Some(fps) = args.fps {
            self.view.target_fps = fps;
        }
        if let Some(stars) = args.stars {
            self.view.star_count = stars;
        }
        if let Some(ref start) = args.start {
            self.view.start_planet = start.clone();
        }
        if let Some(ref file) = args.log_file {
            self.log.file = Some(file.clone());
        }
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "orrery3d",
            "--fps",
            "15",
            "--start",
            "saturn",
            "--log-file",
            "viewer.log",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.view.target_fps, 15);
        assert_eq!(config.view.start_planet, "saturn");
        assert_eq!(config.log.file, Some(PathBuf::from("viewer.log")));
        // Non-overridden fields retain defaults
        assert_eq!(config.view.star_count, 1500);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs::parse_from(["orrery3d"]);
        assert_eq!(args.config, PathBuf::from("orrery3d.ron"));
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
