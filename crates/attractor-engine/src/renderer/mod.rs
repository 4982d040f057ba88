pub mod instance;

pub use instance::{DotInstance, LineVertex, RenderBuffer};
