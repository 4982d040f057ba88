use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::attractor::Attractor;
use crate::core::trail::TrailPolicy;
use crate::error::EngineError;

/// Live-tunable simulation parameters. Swapped in between ticks via
/// [`SimulationEngine::configure`](crate::SimulationEngine::configure).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Population the engine admits dots up to.
    pub target_count: usize,
    /// Attraction coefficient; acceleration is `delta * dist * gravity`.
    pub gravity: f32,
    /// Window length for `TrailPolicy::Windowed` trails.
    pub path_length: usize,
}

impl SimParams {
    /// Clamp to the legal domain: gravity finite and non-negative.
    pub fn sanitized(self) -> Self {
        let gravity = if self.gravity.is_finite() { self.gravity.max(0.0) } else { 0.0 };
        Self { gravity, ..self }
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            target_count: 100,
            gravity: 0.000002,
            path_length: 15,
        }
    }
}

/// What happens to a dot that falls inside the attractor radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePolicy {
    /// Always replace the captured dot with a fresh one in the same slot.
    RespawnInPlace,
    /// Replace it while the population is within target; remove it when the
    /// population is above target (after `target_count` was lowered).
    #[default]
    PruneOnCapacity,
}

/// Engine configuration, provided by the host. Loaded from JSON at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulation area width in world units.
    pub world_width: f32,
    /// Simulation area height in world units.
    pub world_height: f32,
    /// Initial attractor.
    pub attractor: Attractor,
    /// Initial tunable parameters.
    pub params: SimParams,
    pub capture_policy: CapturePolicy,
    pub trail_policy: TrailPolicy,
    /// Cap on dots admitted per tick. `None` fills to target immediately.
    pub max_spawns_per_tick: Option<usize>,
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Backlog cap for the fixed timestep accumulator.
    pub max_steps_per_frame: u32,
    /// Capacity of the dot instance buffer.
    pub max_dots: usize,
    /// Capacity of the trail line vertex buffer.
    pub max_line_vertices: usize,
    /// Rendered dot sprite size in world units.
    pub dot_size: f32,
    /// RNG seed. Hosts usually pass wall clock time.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_width: 600.0,
            world_height: 600.0,
            attractor: Attractor::new(Vec2::new(300.0, 300.0), 50.0),
            params: SimParams::default(),
            capture_policy: CapturePolicy::default(),
            trail_policy: TrailPolicy::default(),
            max_spawns_per_tick: Some(1),
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            max_dots: 1024,
            max_line_vertices: 1024 * 240 * 2,
            dot_size: 8.0,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Reject values the engine cannot run with; normalise the rest.
    pub fn validate(mut self) -> Result<Self, EngineError> {
        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return Err(EngineError::invalid("fixed_dt", format!("must be positive, got {}", self.fixed_dt)));
        }
        if !self.attractor.position.is_finite() {
            return Err(EngineError::invalid("attractor.position", "must be finite"));
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(EngineError::invalid(
                "world_width/world_height",
                format!("must be positive, got {}x{}", self.world_width, self.world_height),
            ));
        }
        if self.params.target_count > self.max_dots {
            return Err(EngineError::invalid(
                "params.target_count",
                format!("must not exceed max_dots ({}), got {}", self.max_dots, self.params.target_count),
            ));
        }
        self.attractor = Attractor::new(self.attractor.position, self.attractor.radius);
        self.params = self.params.sanitized();
        Ok(self)
    }
}
