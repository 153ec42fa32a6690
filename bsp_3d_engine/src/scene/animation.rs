/// Self-animation for scene objects.
///
/// `Wander` is the firefly motion: a jittered circular drift in the XY
/// plane that turns back once the object strays too far from where it
/// started. Randomness is injected so frames stay reproducible under a
/// seeded generator.

use glam::Vec3;
use rand::Rng;

/// Distance from the initial position beyond which the drift reverses
pub const DEFAULT_MAX_RADIUS: f32 = 3.0;

/// Per-step speed jitter (uniform in ±value)
const SPEED_JITTER: f32 = 0.005;
/// Per-step angle jitter in radians (uniform in ±value)
const ANGLE_JITTER: f32 = 0.05;
/// Per-step heading jitter added to sin/cos (uniform in ±value)
const HEADING_JITTER: f32 = 0.1;

/// Jittered wandering motion state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wander {
    speed: f32,
    angle: f32,
    max_radius: f32,
}

impl Wander {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            angle: 0.0,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }

    /// Override the turn-back radius.
    pub fn with_max_radius(mut self, max_radius: f32) -> Self {
        self.max_radius = max_radius;
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    /// Advance one frame.
    ///
    /// # Arguments
    ///
    /// * `position` - Current position, updated in place (x and y only)
    /// * `initial_position` - Anchor of the drift
    /// * `delta_time` - Elapsed seconds since the previous step
    /// * `rng` - Jitter source
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        position: &mut Vec3,
        initial_position: Vec3,
        delta_time: f32,
        rng: &mut R,
    ) {
        self.speed += rng.gen_range(-SPEED_JITTER..=SPEED_JITTER);

        if initial_position.distance(*position) > self.max_radius {
            self.speed = -self.speed;
        }

        self.angle += self.speed * delta_time;
        self.angle += rng.gen_range(-ANGLE_JITTER..=ANGLE_JITTER);

        let stride = self.speed * delta_time;
        position.x += stride * (self.angle.sin() + rng.gen_range(-HEADING_JITTER..=HEADING_JITTER));
        position.y += stride * (self.angle.cos() + rng.gen_range(-HEADING_JITTER..=HEADING_JITTER));
    }
}

#[cfg(test)]
#[path = "animation_tests.rs"]
mod tests;
