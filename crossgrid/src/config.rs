/// Terminal player configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All engine options from `crossgrid_core::Config` (flattened via serde)
/// - Board rendering switches for the terminal
///
/// # Example
///
/// ```rust
/// use crossgrid::PlayerConfig;
///
/// let config = PlayerConfig::default();
/// let base_config = config.into_base();
/// // Use base_config with Controller::new()
/// ```
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Engine configuration fields (markers, input, cache)
    #[serde(flatten)]
    pub base: crossgrid_core::Config,

    /// Print clue labels above the cells that start entries
    pub show_labels: bool,

    /// Mark the cells of the active word
    pub show_highlights: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base: crossgrid_core::Config::default(),
            show_labels: true,
            show_highlights: true,
        }
    }
}

impl PlayerConfig {
    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Convert this player config into the engine config for `Controller::new()`
    pub fn into_base(self) -> crossgrid_core::Config {
        self.base
    }

    /// Get a reference to the engine config
    pub fn base(&self) -> &crossgrid_core::Config {
        &self.base
    }

    /// Get a mutable reference to the engine config
    pub fn base_mut(&mut self) -> &mut crossgrid_core::Config {
        &mut self.base
    }
}
