//! SharedArrayBuffer layout.
//! Must stay in sync with the JS renderer's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Dots: max_dots × 8 floats]
//! [Lines: max_line_vertices × 6 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! The renderer reads them from the header to compute offsets.

use crate::api::config::EngineConfig;
use crate::core::attractor::Attractor;
use crate::renderer::instance::{DotInstance, LineVertex, RenderBuffer};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices. Slot 0 is reserved and always 0.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_DOTS: usize = 2;
pub const HEADER_DOT_COUNT: usize = 3;
pub const HEADER_MAX_LINE_VERTICES: usize = 4;
pub const HEADER_LINE_VERTEX_COUNT: usize = 5;
pub const HEADER_WORLD_WIDTH: usize = 6;
pub const HEADER_WORLD_HEIGHT: usize = 7;
pub const HEADER_ATTRACTOR_X: usize = 8;
pub const HEADER_ATTRACTOR_Y: usize = 9;
pub const HEADER_ATTRACTOR_RADIUS: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_dots: usize,
    pub max_line_vertices: usize,

    /// Offset (in floats) where dot instance data begins.
    pub dot_data_offset: usize,
    /// Offset (in floats) where line vertex data begins.
    pub line_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_dots: usize, max_line_vertices: usize) -> Self {
        let dot_data_offset = HEADER_FLOATS;
        let line_data_offset = dot_data_offset + max_dots * DotInstance::FLOATS;
        let buffer_total_floats = line_data_offset + max_line_vertices * LineVertex::FLOATS;

        Self {
            max_dots,
            max_line_vertices,
            dot_data_offset,
            line_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_dots, config.max_line_vertices)
    }

    /// Header values describing the current frame.
    pub fn header(
        &self,
        frame: u32,
        buffer: &RenderBuffer,
        config: &EngineConfig,
        attractor: &Attractor,
    ) -> [f32; HEADER_FLOATS] {
        let mut h = [0.0; HEADER_FLOATS];
        h[HEADER_FRAME_COUNTER] = frame as f32;
        h[HEADER_MAX_DOTS] = self.max_dots as f32;
        h[HEADER_DOT_COUNT] = buffer.dot_count() as f32;
        h[HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        h[HEADER_LINE_VERTEX_COUNT] = buffer.line_vertex_count() as f32;
        h[HEADER_WORLD_WIDTH] = config.world_width;
        h[HEADER_WORLD_HEIGHT] = config.world_height;
        h[HEADER_ATTRACTOR_X] = attractor.position.x;
        h[HEADER_ATTRACTOR_Y] = attractor.position.y;
        h[HEADER_ATTRACTOR_RADIUS] = attractor.radius;
        h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_sections() {
        let layout = ProtocolLayout::new(10, 20);
        assert_eq!(layout.dot_data_offset, 12);
        assert_eq!(layout.line_data_offset, 12 + 80);
        assert_eq!(layout.buffer_total_floats, 12 + 80 + 120);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn header_reports_counts() {
        let config = EngineConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        let mut buf = RenderBuffer::new();
        buf.push_dot(DotInstance::default());
        let h = layout.header(7, &buf, &config, &config.attractor);
        assert_eq!(h[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(h[HEADER_DOT_COUNT], 1.0);
        assert_eq!(h[HEADER_LINE_VERTEX_COUNT], 0.0);
        assert_eq!(h[HEADER_ATTRACTOR_RADIUS], 50.0);
        assert_eq!(h[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }
}
