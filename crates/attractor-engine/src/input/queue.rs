use glam::Vec2;

use crate::api::config::SimParams;
use crate::core::attractor::Attractor;

/// Events from the control surface (sliders, pointer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    SetTargetCount(u32),
    SetGravity(f32),
    SetPathLength(u32),
    /// Move the attractor to world coordinates (x, y).
    MoveAttractor { x: f32, y: f32 },
    SetAttractorRadius(f32),
}

/// A queue of control events.
/// JS writes events into the queue; Rust drains and applies them between ticks.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new control event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranges of the control surface sliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub max_target_count: u32,
    pub max_path_length: u32,
    pub min_gravity: f32,
    pub max_gravity: f32,
}

impl ControlLimits {
    /// Gravity as shown to the user: 1.0 is the default strength.
    pub const GRAVITY_DISPLAY_SCALE: f32 = 500_000.0;

    pub fn gravity_multiplier(gravity: f32) -> f32 {
        gravity * Self::GRAVITY_DISPLAY_SCALE
    }

    /// Fold `events` into the current parameters and attractor, clamping each
    /// value to the slider range. Later events win.
    pub fn apply(
        &self,
        events: &[ControlEvent],
        mut params: SimParams,
        mut attractor: Attractor,
    ) -> (SimParams, Attractor) {
        for event in events {
            match *event {
                ControlEvent::SetTargetCount(n) => {
                    params.target_count = n.min(self.max_target_count) as usize;
                }
                ControlEvent::SetGravity(g) => {
                    if g.is_finite() {
                        params.gravity = g.clamp(self.min_gravity, self.max_gravity);
                    }
                }
                ControlEvent::SetPathLength(n) => {
                    params.path_length = n.min(self.max_path_length) as usize;
                }
                ControlEvent::MoveAttractor { x, y } => {
                    let p = Vec2::new(x, y);
                    if p.is_finite() {
                        attractor = attractor.moved_to(p);
                    }
                }
                ControlEvent::SetAttractorRadius(r) => {
                    attractor = Attractor::new(attractor.position, r);
                }
            }
        }
        (params, attractor)
    }
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            max_target_count: 1000,
            max_path_length: 240,
            min_gravity: 0.000001,
            max_gravity: 0.000004,
        }
    }
}
