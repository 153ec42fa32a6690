/// Scene-wide tunables.

use crate::camera::FrustumConfig;
use crate::error::Result;
use super::bsp_tree::RemovalStrategy;
use super::lod::LodThresholds;

/// Default seed of the animation jitter generator
pub const DEFAULT_ANIMATION_SEED: u64 = 0x00B5_B3D0;

/// Configuration of a `Scene`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// View volume used by the frustum filter and the projection matrix
    pub frustum: FrustumConfig,
    /// Distance thresholds of the LOD selector
    pub lod: LodThresholds,
    /// How the partition reattaches children on removal
    pub removal: RemovalStrategy,
    /// Seed for self-animating objects
    pub animation_seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            frustum: FrustumConfig::default(),
            lod: LodThresholds::default(),
            removal: RemovalStrategy::default(),
            animation_seed: DEFAULT_ANIMATION_SEED,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        self.frustum.validate()?;
        self.lod.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_config_tests.rs"]
mod tests;
