// config.rs - Hardcoded launch configuration
use std::path::PathBuf;

use crate::texture::DEFAULT_SKY_PATH;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1920;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1080;

/// Values the viewer starts with. Nothing is read from the command line or
/// from disk; every launch begins from these defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchConfig {
    /// Initial window size in logical pixels
    pub window_width: u32,
    pub window_height: u32,
    /// Sky texture bound at texture unit 2
    pub sky_path: PathBuf,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            sky_path: PathBuf::from(DEFAULT_SKY_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_hardcoded_launch_state() {
        let config = LaunchConfig::default();
        assert_eq!((config.window_width, config.window_height), (1920, 1080));
        assert_eq!(config.sky_path, PathBuf::from("space_texture_3.jpeg"));
    }

    #[test]
    fn test_every_launch_starts_identical() {
        assert_eq!(LaunchConfig::default(), LaunchConfig::default());
    }
}
