// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "star-lights")]
#[command(about = "Star solid lit by five orbiting coloured lights", long_about = None)]
pub struct Cli {
    /// JSON config file; built-in defaults when omitted
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Render offscreen and print a per-frame report instead of opening a window
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Frames to render without a window
    #[arg(long, default_value_t = 120)]
    pub frames: u32,

    /// Start with the animation stopped
    #[arg(long)]
    pub paused: bool,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,
}

impl Cli {
    /// Command-line flags win over the config file
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if self.paused {
            config.animation.start_animating = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["star-lights"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.no_ui);
        assert_eq!(cli.frames, 120);
        assert!(!cli.paused);
    }

    #[test]
    fn test_overrides_applied() {
        let cli = Cli::try_parse_from([
            "star-lights",
            "--width",
            "320",
            "--height",
            "240",
            "--paused",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!((config.window.width, config.window.height), (320, 240));
        assert!(!config.animation.start_animating);
        assert_eq!(config.window.title, AppConfig::default().window.title);
    }

    #[test]
    fn test_headless_flags() {
        let cli =
            Cli::try_parse_from(["star-lights", "--no-ui", "--frames", "8", "-c", "scene.json"])
                .unwrap();
        assert!(cli.no_ui);
        assert_eq!(cli.frames, 8);
        assert_eq!(cli.config, Some(PathBuf::from("scene.json")));
    }

    #[test]
    fn test_rejects_bad_frame_count() {
        assert!(Cli::try_parse_from(["star-lights", "--frames", "many"]).is_err());
    }
}
