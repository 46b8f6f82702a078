use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::grid::Grid;
use crate::path::AssemblyLimits;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid (even, at least 2)
    pub grid_width: usize,
    /// Height of the game grid (even, at least 2)
    pub grid_height: usize,
    /// Target length of a fresh snake
    pub initial_length: usize,
    /// Segments added per food eaten
    pub growth: usize,

    /// Safety margin as a fraction of the snake's length, in `[0, 1]`.
    /// Higher values take fewer shortcuts.
    pub accuracy: f64,
    /// Tick period in milliseconds
    pub step_ms: u64,
    /// Show the Hamiltonian cycle under the snake
    pub draw_path: bool,
    /// Seed for cycle generation and food placement; random if unset
    pub seed: Option<u64>,

    pub assembly: AssemblyLimits,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_length: 6,
            growth: 2,
            accuracy: 0.4,
            step_ms: 40,
            draw_path: false,
            seed: None,
            assembly: AssemblyLimits::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(8, 8)
    }

    /// Load a JSON config file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Check that the grid can carry a Hamiltonian cycle and the
    /// controller parameters are in range
    pub fn validate(&self) -> Result<(), GameError> {
        for (name, value) in [("width", self.grid_width), ("height", self.grid_height)] {
            if value < 2 || value % 2 != 0 {
                return Err(GameError::InvalidConfig(format!(
                    "grid {name} must be even and at least 2, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(GameError::InvalidConfig(format!(
                "accuracy must be within [0, 1], got {}",
                self.accuracy
            )));
        }
        if self.initial_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial length must be at least 1".to_string(),
            ));
        }
        if self.step_ms == 0 {
            return Err(GameError::InvalidConfig(
                "step must be at least 1ms".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_length, 6);
        assert_eq!(config.growth, 2);
        assert_eq!(config.accuracy, 0.4);
        assert_eq!(config.step(), Duration::from_millis(40));
        assert!(!config.draw_path);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(16, 12);
        assert_eq!(config.grid(), Grid::new(16, 12));
    }

    #[test]
    fn test_rejects_odd_dimensions() {
        assert!(matches!(
            GameConfig::new(15, 16).validate(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(GameConfig::new(16, 0).validate().is_err());
    }

    #[test]
    fn test_rejects_accuracy_out_of_range() {
        let config = GameConfig {
            accuracy: 1.5,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            accuracy: f64::NAN,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "grid_width": 10, "draw_path": true }"#).unwrap();
        assert_eq!(config.grid_width, 10);
        assert_eq!(config.grid_height, 20);
        assert!(config.draw_path);
        assert_eq!(config.accuracy, 0.4);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "hamilton_snake_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "grid_width": 6, "grid_height": 4, "seed": 9 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.grid(), Grid::new(6, 4));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, GameError::ConfigIo { .. }));
    }
}
