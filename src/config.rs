/*
 * Configuration Module
 *
 * Top-level application configuration. Every field has a default, so an empty
 * YAML document (or no file at all) yields a working setup.
 */

use std::fs::File;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::params::{
    AttractionParams, FlockParams, LifeParams, QuadtreeParams, RainParams, SandParams, WalkerParams,
};
use crate::simulation::SimKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1200, height: 800 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimKind,
    /// Seed for every random source. Random when unset.
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub attraction: AttractionParams,
    pub flock: FlockParams,
    pub sand: SandParams,
    pub rain: RainParams,
    pub walkers: WalkerParams,
    pub life: LifeParams,
    pub quadtree: QuadtreeParams,
}

impl AppConfig {
    pub fn from_yaml(text: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        let config: AppConfig = serde_yaml::from_reader(file)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::kinematics::EdgePolicy;
    use crate::params::WalkerModeKind;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let yaml = r#"
simulation: sand
seed: 42
sand:
  cell_size: 6
walkers:
  mode: sine
  edges: bounce
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.simulation, SimKind::Sand);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.sand.cell_size, 6.0);
        assert_eq!(config.sand.physics_fps, SandParams::default().physics_fps);
        assert_eq!(config.walkers.mode, WalkerModeKind::Sine);
        assert_eq!(config.walkers.edges, EdgePolicy::Bounce);
    }

    #[test]
    fn test_bad_yaml_is_reported() {
        let err = AppConfig::from_yaml("simulation: [not, a, kind]").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = AppConfig::load(Path::new("/nonexistent/particle-sims.yaml")).unwrap_err();
        assert!(matches!(err, SimError::ConfigIo(_)));
    }
}
