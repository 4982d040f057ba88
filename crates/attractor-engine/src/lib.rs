pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{EngineConfig, SimParams, CapturePolicy};
pub use api::types::{DotId, Rgba, TrailSample};
pub use crate::core::attractor::Attractor;
pub use crate::core::dot::Dot;
pub use crate::core::engine::SimulationEngine;
pub use crate::core::ids::IdAllocator;
pub use crate::core::rng::Rng;
pub use crate::core::snapshot::{Snapshot, OwnedSnapshot, TickStats};
pub use crate::core::time::FixedTimestep;
pub use crate::core::trail::{PathTrail, TrailPolicy, TrailState};
pub use renderer::instance::{DotInstance, LineVertex, RenderBuffer};
pub use systems::render::build_render_buffer;
pub use bridge::protocol::ProtocolLayout;
pub use input::queue::{ControlEvent, ControlQueue, ControlLimits};
pub use error::EngineError;
