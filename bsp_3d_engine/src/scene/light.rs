/// Scene lights and the per-frame light block.
///
/// Three kinds of source share one color model (ambient, diffuse,
/// specular): directional, point (attenuated, with an intensity) and spot
/// (attenuated, with inner/outer cone angles in degrees). A spot can be
/// bound to the camera to act as a flashlight.
///
/// `LightSet` keeps lights in insertion order and packs them into a
/// `#[repr(C)]` block uploaded once per frame through
/// `CommandList::update_uniforms`. Sets can be described in TOML:
///
/// ```toml
/// [[directional]]
/// direction = [-0.2, -1.0, -0.3]
/// ambient = [0.05, 0.05, 0.05]
/// diffuse = [0.4, 0.4, 0.4]
/// specular = [0.5, 0.5, 0.5]
///
/// [[point]]
/// position = [0.7, 3.2, 2.0]
/// diffuse = [0.8, 0.8, 0.8]
/// linear = 0.09
/// quadratic = 0.032
/// intensity = 1.0
///
/// [[spot]]
/// cutoff = 12.5
/// outer_cutoff = 15.0
/// follow_camera = true
/// ```

use std::path::Path;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::Deserialize;
use slotmap::{new_key_type, SlotMap};
use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::render::CommandList;
use crate::{engine_debug, engine_warn};

new_key_type! {
    /// Stable key for a light within a LightSet.
    pub struct LightKey;
}

/// Uniform binding the light block is written to
pub const LIGHTS_BINDING: u32 = 0;

/// Lights a set (and the light block) can hold
pub const MAX_LIGHTS: usize = 8;

/// Kind tags stored in `GpuLight::position[3]`
pub const KIND_DIRECTIONAL: f32 = 0.0;
pub const KIND_POINT: f32 = 1.0;
pub const KIND_SPOT: f32 = 2.0;

/// Phong color terms of a light.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightColor {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl LightColor {
    pub fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self { ambient, diffuse, specular }
    }
}

/// Distance falloff `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self { constant: 1.0, linear: 0.0, quadratic: 0.0 }
    }
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self { constant, linear, quadratic }
    }

    /// Light fraction reaching `distance`.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// Geometry of a light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional {
        direction: Vec3,
    },
    Point {
        position: Vec3,
        attenuation: Attenuation,
        intensity: f32,
    },
    Spot {
        position: Vec3,
        direction: Vec3,
        attenuation: Attenuation,
        /// Inner cone half-angle in degrees
        cut_off: f32,
        /// Outer cone half-angle in degrees
        outer_cut_off: f32,
        /// Position and direction track the camera every frame
        follows_camera: bool,
    },
}

/// A light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    kind: LightKind,
    color: LightColor,
    enabled: bool,
}

impl Light {
    pub fn directional(direction: Vec3, color: LightColor) -> Self {
        Self::from_kind(LightKind::Directional { direction }, color)
    }

    pub fn point(position: Vec3, color: LightColor, attenuation: Attenuation, intensity: f32) -> Self {
        Self::from_kind(LightKind::Point { position, attenuation, intensity }, color)
    }

    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: LightColor,
        attenuation: Attenuation,
        cut_off: f32,
        outer_cut_off: f32,
    ) -> Self {
        Self::from_kind(
            LightKind::Spot {
                position,
                direction,
                attenuation,
                cut_off,
                outer_cut_off,
                follows_camera: false,
            },
            color,
        )
    }

    /// Spot light held at the camera, pointing where it looks.
    pub fn flashlight(
        camera: &Camera,
        color: LightColor,
        attenuation: Attenuation,
        cut_off: f32,
        outer_cut_off: f32,
    ) -> Self {
        Self::from_kind(
            LightKind::Spot {
                position: camera.position(),
                direction: camera.forward(),
                attenuation,
                cut_off,
                outer_cut_off,
                follows_camera: true,
            },
            color,
        )
    }

    fn from_kind(kind: LightKind, color: LightColor) -> Self {
        Self { kind, color, enabled: true }
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> &LightKind {
        &self.kind
    }

    pub fn color(&self) -> &LightColor {
        &self.color
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Position of point and spot lights.
    pub fn position(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { .. } => None,
            LightKind::Point { position, .. } | LightKind::Spot { position, .. } => Some(position),
        }
    }

    /// Color actually emitted: a disabled light keeps its ambient term only.
    pub fn emitted_color(&self) -> LightColor {
        if self.enabled {
            self.color
        } else {
            LightColor { ambient: self.color.ambient, ..LightColor::default() }
        }
    }

    // ===== MUTATORS =====

    /// Switch diffuse and specular contribution on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_color(&mut self, color: LightColor) {
        self.color = color;
    }

    /// Move a point or spot light. Returns `false` for directional lights.
    pub fn translate(&mut self, offset: Vec3) -> bool {
        match &mut self.kind {
            LightKind::Directional { .. } => false,
            LightKind::Point { position, .. } | LightKind::Spot { position, .. } => {
                *position += offset;
                true
            }
        }
    }

    /// Snap a camera-bound spot light to the camera. Returns whether it moved.
    pub fn follow_camera(&mut self, camera: &Camera) -> bool {
        match &mut self.kind {
            LightKind::Spot { position, direction, follows_camera: true, .. } => {
                *position = camera.position();
                *direction = camera.forward();
                true
            }
            _ => false,
        }
    }

    /// # Errors
    ///
    /// `InvalidResource` for non-finite values, a zero direction, an
    /// attenuation that is negative or all zero, or cone angles outside
    /// `0 <= cut_off <= outer_cut_off <= 90`.
    pub fn validate(&self) -> Result<()> {
        let c = &self.color;
        if !(c.ambient.is_finite() && c.diffuse.is_finite() && c.specular.is_finite()) {
            return Err(Error::InvalidResource(format!("light color is not finite: {:?}", c)));
        }

        match self.kind {
            LightKind::Directional { direction } => check_direction(direction),
            LightKind::Point { position, attenuation, intensity } => {
                check_position(position)?;
                check_attenuation(&attenuation)?;
                if !intensity.is_finite() || intensity < 0.0 {
                    return Err(Error::InvalidResource(format!("light intensity must be >= 0, got {}", intensity)));
                }
                Ok(())
            }
            LightKind::Spot { position, direction, attenuation, cut_off, outer_cut_off, .. } => {
                check_position(position)?;
                check_direction(direction)?;
                check_attenuation(&attenuation)?;
                if !(0.0..=90.0).contains(&cut_off) || !(cut_off..=90.0).contains(&outer_cut_off) {
                    return Err(Error::InvalidResource(format!(
                        "spot cone must satisfy 0 <= cut_off <= outer_cut_off <= 90 (cut_off={}, outer={})",
                        cut_off, outer_cut_off
                    )));
                }
                Ok(())
            }
        }
    }

    /// Pack into the uniform layout.
    pub fn to_gpu(&self) -> GpuLight {
        let color = self.emitted_color();
        let mut gpu = GpuLight {
            ambient: color.ambient.extend(0.0).to_array(),
            diffuse: color.diffuse.extend(0.0).to_array(),
            specular: color.specular.extend(0.0).to_array(),
            ..GpuLight::zeroed()
        };

        match self.kind {
            LightKind::Directional { direction } => {
                gpu.position = [0.0, 0.0, 0.0, KIND_DIRECTIONAL];
                gpu.direction = direction.normalize().extend(0.0).to_array();
                gpu.attenuation = [1.0, 0.0, 0.0, 1.0];
            }
            LightKind::Point { position, attenuation, intensity } => {
                gpu.position = position.extend(KIND_POINT).to_array();
                gpu.attenuation = [attenuation.constant, attenuation.linear, attenuation.quadratic, intensity];
            }
            LightKind::Spot { position, direction, attenuation, cut_off, outer_cut_off, .. } => {
                gpu.position = position.extend(KIND_SPOT).to_array();
                gpu.direction = direction.normalize().extend(0.0).to_array();
                gpu.attenuation = [attenuation.constant, attenuation.linear, attenuation.quadratic, 1.0];
                gpu.cone = [cut_off.to_radians().cos(), outer_cut_off.to_radians().cos(), 0.0, 0.0];
            }
        }
        gpu
    }
}

fn check_position(position: Vec3) -> Result<()> {
    if !position.is_finite() {
        return Err(Error::InvalidResource(format!("light position is not finite: {}", position)));
    }
    Ok(())
}

fn check_direction(direction: Vec3) -> Result<()> {
    if !direction.is_finite() || direction.length_squared() == 0.0 {
        return Err(Error::InvalidResource(format!("light direction must be finite and non-zero: {}", direction)));
    }
    Ok(())
}

fn check_attenuation(attenuation: &Attenuation) -> Result<()> {
    let Attenuation { constant, linear, quadratic } = *attenuation;
    let terms = [constant, linear, quadratic];
    if terms.iter().any(|t| !t.is_finite() || *t < 0.0) || terms.iter().all(|t| *t == 0.0) {
        return Err(Error::InvalidResource(format!(
            "attenuation terms must be >= 0 and not all zero: {:?}",
            attenuation
        )));
    }
    Ok(())
}

// ===== GPU LAYOUT =====

/// One light in the uniform block (std140-compatible, 112 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    /// xyz position, w kind tag
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// constant, linear, quadratic, intensity
    pub attenuation: [f32; 4],
    /// cos(cut_off), cos(outer_cut_off)
    pub cone: [f32; 4],
}

/// Header of the uniform block: light count, then padding to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct GpuLightHeader {
    pub count: u32,
    pub _pad: [u32; 3],
}

// ===== LIGHT SET =====

/// Ordered collection of scene lights.
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    lights: SlotMap<LightKey, Light>,
    order: Vec<LightKey>,
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a parsed description.
    pub fn from_config(config: &LightsConfig) -> Result<Self> {
        let mut set = Self::new();
        for light in config.lights() {
            set.add(light)?;
        }
        Ok(set)
    }

    /// Parse a TOML description.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the text is not a valid description, or any error
    /// `add` reports for the lights it describes.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LightsConfig = toml::from_str(text)
            .map_err(|e| Error::InvalidConfig(format!("light description: {}", e)).logged("bsp3d::LightSet"))?;
        Self::from_config(&config)
    }

    /// Read and parse a TOML description file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e)).logged("bsp3d::LightSet")
        })?;
        Self::from_toml_str(&text)
    }

    /// Append a light.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the light fails validation or the set already
    /// holds `MAX_LIGHTS` lights.
    pub fn add(&mut self, light: Light) -> Result<LightKey> {
        light.validate().map_err(|e| e.logged("bsp3d::LightSet"))?;
        if self.order.len() >= MAX_LIGHTS {
            return Err(Error::InvalidResource(format!("light set is full ({} lights)", MAX_LIGHTS))
                .logged("bsp3d::LightSet"));
        }

        let key = self.lights.insert(light);
        self.order.push(key);
        engine_debug!("bsp3d::LightSet", "Added {:?} ({} lights)", key, self.order.len());
        Ok(key)
    }

    /// Remove a light and hand it back. Later lights move up one slot.
    pub fn remove(&mut self, key: LightKey) -> Option<Light> {
        let light = match self.lights.remove(key) {
            Some(light) => light,
            None => {
                engine_warn!("bsp3d::LightSet", "remove: {:?} is not in the set", key);
                return None;
            }
        };
        self.order.retain(|&k| k != key);
        Some(light)
    }

    /// Drop every light.
    pub fn clear(&mut self) {
        engine_debug!("bsp3d::LightSet", "Cleared {} lights", self.order.len());
        self.lights.clear();
        self.order.clear();
    }

    pub fn get(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    pub fn get_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Lights in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (LightKey, &Light)> + '_ {
        self.order.iter().filter_map(move |&key| self.lights.get(key).map(|light| (key, light)))
    }

    /// Snap every camera-bound spot light to `camera`.
    pub fn follow_camera(&mut self, camera: &Camera) {
        for light in self.lights.values_mut() {
            light.follow_camera(camera);
        }
    }

    /// Uniform block bytes: header, then one `GpuLight` per light in order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = GpuLightHeader { count: self.order.len() as u32, _pad: [0; 3] };
        let lights: Vec<GpuLight> = self.iter().map(|(_, light)| light.to_gpu()).collect();

        let mut bytes = Vec::with_capacity(
            std::mem::size_of::<GpuLightHeader>() + std::mem::size_of_val(lights.as_slice()),
        );
        bytes.extend_from_slice(bytemuck::bytes_of(&header));
        bytes.extend_from_slice(bytemuck::cast_slice(&lights));
        bytes
    }

    /// Write the light block to `LIGHTS_BINDING`.
    pub fn upload(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.update_uniforms(LIGHTS_BINDING, &self.to_bytes())
    }
}

// ===== DESCRIPTION FORMAT =====

/// Color terms shared by every light entry; missing terms are black.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl ColorConfig {
    fn color(&self) -> LightColor {
        LightColor::new(
            Vec3::from_array(self.ambient),
            Vec3::from_array(self.diffuse),
            Vec3::from_array(self.specular),
        )
    }
}

fn default_constant() -> f32 {
    1.0
}

fn default_intensity() -> f32 {
    1.0
}

fn default_forward() -> [f32; 3] {
    [0.0, 0.0, -1.0]
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DirectionalConfig {
    pub direction: [f32; 3],
    #[serde(flatten)]
    pub color: ColorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointConfig {
    pub position: [f32; 3],
    #[serde(flatten)]
    pub color: ColorConfig,
    #[serde(default = "default_constant")]
    pub constant: f32,
    #[serde(default)]
    pub linear: f32,
    #[serde(default)]
    pub quadratic: f32,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SpotConfig {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_forward")]
    pub direction: [f32; 3],
    #[serde(flatten)]
    pub color: ColorConfig,
    #[serde(default = "default_constant")]
    pub constant: f32,
    #[serde(default)]
    pub linear: f32,
    #[serde(default)]
    pub quadratic: f32,
    pub cutoff: f32,
    pub outer_cutoff: f32,
    /// Bind to the camera (flashlight)
    #[serde(default)]
    pub follow_camera: bool,
}

/// Parsed light description: directional, then point, then spot lights.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub directional: Vec<DirectionalConfig>,
    pub point: Vec<PointConfig>,
    pub spot: Vec<SpotConfig>,
}

impl LightsConfig {
    /// Lights in set order.
    pub fn lights(&self) -> Vec<Light> {
        let directional = self.directional.iter().map(|d| {
            Light::directional(Vec3::from_array(d.direction), d.color.color())
        });
        let point = self.point.iter().map(|p| {
            Light::point(
                Vec3::from_array(p.position),
                p.color.color(),
                Attenuation::new(p.constant, p.linear, p.quadratic),
                p.intensity,
            )
        });
        let spot = self.spot.iter().map(|s| {
            Light::from_kind(
                LightKind::Spot {
                    position: Vec3::from_array(s.position),
                    direction: Vec3::from_array(s.direction),
                    attenuation: Attenuation::new(s.constant, s.linear, s.quadratic),
                    cut_off: s.cutoff,
                    outer_cut_off: s.outer_cutoff,
                    follows_camera: s.follow_camera,
                },
                s.color.color(),
            )
        });
        directional.chain(point).chain(spot).collect()
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
