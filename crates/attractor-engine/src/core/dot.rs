//! Dots: the particles that orbit and fall into the attractor.

use glam::Vec2;

use super::attractor::Attractor;
use super::rng::Rng;
use crate::api::types::{DotId, Rgba};

/// A single simulated dot.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub id: DotId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// RGB is fixed at spawn; alpha is rewritten every tick by [`Dot::shade`].
    pub color: Rgba,
}

impl Dot {
    /// Inner edge of the spawn annulus, measured from the attractor.
    pub const SPAWN_BASE_DISTANCE: f32 = 200.0;
    /// Width of the spawn annulus.
    pub const SPAWN_DISTANCE_JITTER: f32 = 100.0;
    /// Per-axis bound of the random initial velocity.
    pub const VELOCITY_JITTER: f32 = 0.125;
    /// Magnitude of the sideways kick that sets a new dot orbiting.
    pub const TANGENTIAL_IMPULSE: f32 = 0.6;

    pub const ALPHA_CURVATURE: f32 = 0.06;
    /// Distance beyond the capture radius at which a dot is brightest.
    pub const ALPHA_PEAK_OFFSET: f32 = 70.0;
    pub const ALPHA_PEAK: f32 = 250.0;

    pub fn new(id: DotId, position: Vec2, velocity: Vec2, color: Rgba) -> Self {
        Self {
            id,
            position,
            velocity,
            color,
        }
    }

    /// Spawn a dot at a random point of the annulus around `attractor`,
    /// with a small random velocity plus a tangential kick.
    pub fn spawn(attractor: &Attractor, id: DotId, rng: &mut Rng) -> Self {
        let angle = rng.angle();
        let dist = rng.range_f32(
            Self::SPAWN_BASE_DISTANCE,
            Self::SPAWN_BASE_DISTANCE + Self::SPAWN_DISTANCE_JITTER,
        );
        let position = attractor.position + Vec2::from_angle(angle).rotate(Vec2::new(dist, 0.0));

        let jitter = Vec2::new(
            rng.range_f32(-Self::VELOCITY_JITTER, Self::VELOCITY_JITTER),
            rng.range_f32(-Self::VELOCITY_JITTER, Self::VELOCITY_JITTER),
        );
        let inward = (attractor.position - position).normalize_or_zero();
        let velocity = jitter + inward.perp() * Self::TANGENTIAL_IMPULSE;

        let color = Rgba::new(
            rng.next_int(255) as u8,
            rng.next_int(255) as u8,
            rng.next_int(255) as u8,
            255,
        );

        Self::new(id, position, velocity, color)
    }

    /// Apply one tick of attraction and move. Returns the distance to the
    /// attractor measured *before* the move, which drives capture and alpha.
    ///
    /// Acceleration is `delta * dist * gravity`, i.e. it grows with distance.
    pub fn integrate(&mut self, attractor: &Attractor, gravity: f32) -> f32 {
        let delta = attractor.position - self.position;
        let dist = delta.length();
        self.velocity += delta * (dist * gravity);
        self.position += self.velocity;
        dist
    }

    /// Opacity for a dot `dist` away from an attractor of radius `radius`:
    /// a downward parabola peaking at `radius + ALPHA_PEAK_OFFSET`, floored at 0.
    pub fn alpha_at(dist: f32, radius: f32) -> f32 {
        let x = dist - radius - Self::ALPHA_PEAK_OFFSET;
        (-Self::ALPHA_CURVATURE * x * x + Self::ALPHA_PEAK).max(0.0)
    }

    /// Recompute this dot's alpha channel from its distance to the attractor.
    pub fn shade(&mut self, dist: f32, radius: f32) {
        self.color.a = Self::alpha_at(dist, radius) as u8;
    }
}
