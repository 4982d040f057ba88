use bytemuck::{Pod, Zeroable};

/// Per-dot sprite instance for the renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DotInstance {
    /// Sprite centre, world space.
    pub x: f32,
    pub y: f32,
    /// Rendered sprite size in world units.
    pub size: f32,
    /// Tint, 0.0..=1.0 per channel.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub _pad: f32,
}

impl DotInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One end of a trail line segment. Segments are emitted as vertex pairs
/// (line list), 6 floats per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat per-frame buffers the renderer reads: dot sprites and trail lines.
pub struct RenderBuffer {
    pub dots: Vec<DotInstance>,
    pub lines: Vec<LineVertex>,
    max_dots: usize,
    max_line_vertices: usize,
    /// Whether the last build overflowed, kept across `clear`.
    dots_truncated: bool,
    lines_truncated: bool,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024, 16384)
    }

    /// Buffers never grow past these capacities; overflow is dropped.
    pub fn with_capacity(max_dots: usize, max_line_vertices: usize) -> Self {
        Self {
            dots: Vec::with_capacity(max_dots),
            lines: Vec::with_capacity(max_line_vertices),
            max_dots,
            max_line_vertices,
            dots_truncated: false,
            lines_truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.dots.clear();
        self.lines.clear();
    }

    /// Returns false when the dot buffer is full.
    pub fn push_dot(&mut self, instance: DotInstance) -> bool {
        if self.dots.len() >= self.max_dots {
            return false;
        }
        self.dots.push(instance);
        true
    }

    /// Returns false when the line buffer cannot take another segment.
    pub fn push_segment(&mut self, from: LineVertex, to: LineVertex) -> bool {
        if self.lines.len() + 2 > self.max_line_vertices {
            return false;
        }
        self.lines.push(from);
        self.lines.push(to);
        true
    }

    /// Record whether this frame dropped dots. Returns true on a change.
    pub fn set_dots_truncated(&mut self, truncated: bool) -> bool {
        std::mem::replace(&mut self.dots_truncated, truncated) != truncated
    }

    /// Record whether this frame dropped trail segments. Returns true on a change.
    pub fn set_lines_truncated(&mut self, truncated: bool) -> bool {
        std::mem::replace(&mut self.lines_truncated, truncated) != truncated
    }

    pub fn dots_truncated(&self) -> bool {
        self.dots_truncated
    }

    pub fn lines_truncated(&self) -> bool {
        self.lines_truncated
    }

    pub fn dot_count(&self) -> u32 {
        self.dots.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Raw pointer to dot instance data for SharedArrayBuffer reads.
    pub fn dots_ptr(&self) -> *const f32 {
        self.dots.as_ptr() as *const f32
    }

    /// Raw pointer to line vertex data for SharedArrayBuffer reads.
    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    pub fn dot_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.dots)
    }

    pub fn line_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.lines)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_match_stride() {
        assert_eq!(std::mem::size_of::<DotInstance>(), DotInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<LineVertex>(), LineVertex::STRIDE_BYTES);
    }

    #[test]
    fn push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push_dot(DotInstance::default());
        buf.push_segment(LineVertex::default(), LineVertex::default());
        assert_eq!(buf.dot_count(), 1);
        assert_eq!(buf.line_vertex_count(), 2);
        assert_eq!(buf.dot_floats().len(), 8);
        assert_eq!(buf.line_floats().len(), 12);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut buf = RenderBuffer::with_capacity(1, 3);
        assert!(buf.push_dot(DotInstance::default()));
        assert!(!buf.push_dot(DotInstance::default()));
        assert!(buf.push_segment(LineVertex::default(), LineVertex::default()));
        assert!(!buf.push_segment(LineVertex::default(), LineVertex::default()));
        assert_eq!(buf.line_vertex_count(), 2);
    }

    #[test]
    fn truncation_flag_reports_changes_only() {
        let mut buf = RenderBuffer::new();
        assert!(!buf.set_lines_truncated(false));
        assert!(buf.set_lines_truncated(true));
        assert!(!buf.set_lines_truncated(true));
        buf.clear();
        assert!(buf.lines_truncated());
        assert!(buf.set_lines_truncated(false));
        assert!(!buf.dots_truncated());
    }

    #[test]
    fn clear_empties_both_buffers() {
        let mut buf = RenderBuffer::new();
        buf.push_dot(DotInstance::default());
        buf.push_segment(LineVertex::default(), LineVertex::default());
        buf.clear();
        assert_eq!(buf.dot_count(), 0);
        assert_eq!(buf.line_vertex_count(), 0);
    }
}
