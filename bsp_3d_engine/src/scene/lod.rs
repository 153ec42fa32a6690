/// Discrete level-of-detail selection.
///
/// Two representations per drawable part and a hard cutoff: no blending,
/// no fade. The distance is measured per part, so the parts of one object
/// can sit at different levels in the same frame.

use crate::error::{Error, Result};
use crate::render::MeshId;

/// Distance thresholds in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodThresholds {
    /// Below this distance the high-detail representation is used
    pub near: f32,
    /// Beyond this distance nothing is drawn
    pub far: f32,
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self { near: 8.0, far: 19.0 }
    }
}

impl LodThresholds {
    /// Check `0 <= near <= far`, both finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.near.is_finite() && self.far.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "LOD thresholds must be finite (near={}, far={})",
                self.near, self.far
            )));
        }
        if self.near < 0.0 || self.near > self.far {
            return Err(Error::InvalidConfig(format!(
                "LOD thresholds must satisfy 0 <= near <= far (near={}, far={})",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

/// Detail level chosen for a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodLevel {
    High,
    Low,
}

/// Distance-based selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodSelector {
    thresholds: LodThresholds,
}

impl LodSelector {
    pub fn new(thresholds: LodThresholds) -> Self {
        Self { thresholds }
    }

    /// Selector that always answers `High` (backdrops, debug views).
    pub fn unbounded() -> Self {
        Self {
            thresholds: LodThresholds {
                near: f32::INFINITY,
                far: f32::INFINITY,
            },
        }
    }

    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// `< near` → High, `near..=far` → Low, `> far` → None.
    pub fn level(&self, distance: f32) -> Option<LodLevel> {
        if distance < self.thresholds.near {
            Some(LodLevel::High)
        } else if distance <= self.thresholds.far {
            Some(LodLevel::Low)
        } else {
            None
        }
    }

    /// Pick one of two representations, or none past the far threshold.
    pub fn select<'a, T>(&self, distance: f32, high: &'a T, low: &'a T) -> Option<&'a T> {
        self.level(distance).map(|level| match level {
            LodLevel::High => high,
            LodLevel::Low => low,
        })
    }
}

impl Default for LodSelector {
    fn default() -> Self {
        Self::new(LodThresholds::default())
    }
}

/// High/low mesh pair for one part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LodMesh {
    pub high: MeshId,
    pub low: MeshId,
}

impl LodMesh {
    pub fn new(high: MeshId, low: MeshId) -> Self {
        Self { high, low }
    }

    /// Same mesh at both levels (planes, cubes, pyramids).
    pub fn fixed(mesh: MeshId) -> Self {
        Self { high: mesh, low: mesh }
    }

    pub fn mesh(&self, level: LodLevel) -> MeshId {
        match level {
            LodLevel::High => self.high,
            LodLevel::Low => self.low,
        }
    }
}

#[cfg(test)]
#[path = "lod_tests.rs"]
mod tests;
