use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The single force source. Dots closer than `radius` are captured.
///
/// Treated as immutable for the duration of a tick; callers replace it
/// wholesale between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    pub position: Vec2,
    pub radius: f32,
}

impl Attractor {
    /// Negative or non-finite radii collapse to 0 (capture becomes unreachable).
    pub fn new(position: Vec2, radius: f32) -> Self {
        let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        Self { position, radius }
    }

    /// Same radius, new position.
    pub fn moved_to(self, position: Vec2) -> Self {
        Self::new(position, self.radius)
    }

    /// Whether a point at `dist` from the centre is inside the capture radius.
    pub fn captures(&self, dist: f32) -> bool {
        dist < self.radius
    }
}

impl Default for Attractor {
    fn default() -> Self {
        Self::new(Vec2::new(300.0, 300.0), 50.0)
    }
}
