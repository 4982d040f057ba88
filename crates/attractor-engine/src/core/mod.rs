pub mod attractor;
pub mod dot;
pub mod engine;
pub mod ids;
pub mod rng;
pub mod snapshot;
pub mod time;
pub mod trail;
