use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GenUiError, GenUiResult};
use crate::layout::ScreenSize;

/// Tree renderer settings. Every field is optional in YAML.
///
/// ```yaml
/// max_depth: 12
/// screen: tablet
/// contain_panics: true
/// max_children: 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Nodes nested deeper than this render as a depth placeholder
    pub max_depth: usize,
    pub screen: ScreenSize,
    /// Run renderers under `catch_unwind`
    pub contain_panics: bool,
    /// Per-slot cap; the rest are replaced by one "omitted" notice
    pub max_children: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 20;
pub const DEFAULT_MAX_CHILDREN: usize = 64;

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            screen: ScreenSize::default(),
            contain_panics: true,
            max_children: DEFAULT_MAX_CHILDREN,
        }
    }
}

impl RenderConfig {
    pub fn from_yaml_str(yaml: &str) -> GenUiResult<Self> {
        let config: RenderConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> GenUiResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            GenUiError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> GenUiResult<()> {
        if self.max_depth == 0 {
            return Err(GenUiError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_children == 0 {
            return Err(GenUiError::InvalidConfig(
                "max_children must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_screen(mut self, screen: ScreenSize) -> Self {
        self.screen = screen;
        self
    }
}
