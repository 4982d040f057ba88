use glam::Vec2;

use crate::api::types::Rgba;
use crate::core::snapshot::Snapshot;
use crate::renderer::instance::{DotInstance, LineVertex, RenderBuffer};

fn vertex(p: Vec2, color: Rgba) -> LineVertex {
    let [r, g, b, a] = color.to_f32();
    LineVertex { x: p.x, y: p.y, r, g, b, a }
}

/// Build the render buffer from a snapshot.
/// Trails first (drawn underneath), one segment per consecutive sample pair
/// colored by the earlier sample; then one sprite per dot.
pub fn build_render_buffer(snapshot: &Snapshot<'_>, dot_size: f32, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut lines_truncated = false;
    'trails: for trail in snapshot.trails.values() {
        for (from, to, color) in trail.segments() {
            if !buffer.push_segment(vertex(from, color), vertex(to, color)) {
                lines_truncated = true;
                break 'trails;
            }
        }
    }
    if buffer.set_lines_truncated(lines_truncated) {
        if lines_truncated {
            log::warn!("line buffer full, trails truncated");
        } else {
            log::debug!("line buffer no longer truncated");
        }
    }

    for dot in snapshot.dots {
        let [r, g, b, a] = dot.color.to_f32();
        let instance = DotInstance {
            x: dot.position.x,
            y: dot.position.y,
            size: dot_size,
            r,
            g,
            b,
            a,
            _pad: 0.0,
        };
        if !buffer.push_dot(instance) {
            break;
        }
    }
    let dropped = snapshot.dots.len() - buffer.dots.len();
    if buffer.set_dots_truncated(dropped > 0) {
        if dropped > 0 {
            log::warn!("dot buffer full, {} dots dropped", dropped);
        } else {
            log::debug!("dot buffer no longer truncated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{DotId, TrailSample};
    use crate::core::dot::Dot;
    use crate::core::snapshot::TickStats;
    use crate::core::trail::PathTrail;
    use std::collections::BTreeMap;

    fn trail(points: &[(f32, u8)]) -> PathTrail {
        let mut t = PathTrail::new();
        for &(x, a) in points {
            t.push(
                TrailSample { position: Vec2::new(x, 0.0), color: Rgba::new(255, 0, 0, a) },
                None,
            );
        }
        t
    }

    #[test]
    fn build_buffer_emits_segments_and_sprites() {
        let id = DotId::new(0, 1);
        let dots = vec![Dot::new(id, Vec2::new(5.0, 6.0), Vec2::ZERO, Rgba::new(0, 255, 0, 51))];
        let mut trails = BTreeMap::new();
        trails.insert(id, trail(&[(0.0, 255), (1.0, 0), (2.0, 0)]));
        let snap = Snapshot { dots: &dots, trails: &trails, stats: TickStats::default() };

        let mut buf = RenderBuffer::new();
        build_render_buffer(&snap, 8.0, &mut buf);

        assert_eq!(buf.dot_count(), 1);
        let d = buf.dots[0];
        assert_eq!((d.x, d.y, d.size), (5.0, 6.0, 8.0));
        assert_eq!((d.g, d.a), (1.0, 0.2));

        // 3 samples -> 2 segments -> 4 vertices
        assert_eq!(buf.line_vertex_count(), 4);
        // First segment carries the first sample's color on both ends.
        assert_eq!(buf.lines[0].a, 1.0);
        assert_eq!(buf.lines[1].a, 1.0);
        assert_eq!(buf.lines[1].x, 1.0);
        assert_eq!(buf.lines[2].a, 0.0);
    }

    #[test]
    fn short_trails_draw_nothing() {
        let mut trails = BTreeMap::new();
        trails.insert(DotId::new(0, 1), trail(&[]));
        trails.insert(DotId::new(0, 2), trail(&[(3.0, 9)]));
        let snap = Snapshot { dots: &[], trails: &trails, stats: TickStats::default() };

        let mut buf = RenderBuffer::new();
        build_render_buffer(&snap, 8.0, &mut buf);
        assert_eq!(buf.line_vertex_count(), 0);
        assert_eq!(buf.dot_count(), 0);
    }

    #[test]
    fn overflow_state_tracks_each_rebuild() {
        let mut trails = BTreeMap::new();
        trails.insert(DotId::new(0, 1), trail(&[(0.0, 255), (1.0, 255), (2.0, 255), (3.0, 255)]));
        let dots = vec![
            Dot::new(DotId::new(0, 1), Vec2::ZERO, Vec2::ZERO, Rgba::WHITE),
            Dot::new(DotId::new(0, 2), Vec2::ZERO, Vec2::ZERO, Rgba::WHITE),
        ];
        let full = Snapshot { dots: &dots, trails: &trails, stats: TickStats::default() };
        let mut buf = RenderBuffer::with_capacity(1, 4);

        build_render_buffer(&full, 8.0, &mut buf);
        assert!(buf.lines_truncated());
        assert!(buf.dots_truncated());
        assert_eq!(buf.line_vertex_count(), 4);
        assert_eq!(buf.dot_count(), 1);

        // A second overflowing frame is no state change.
        build_render_buffer(&full, 8.0, &mut buf);
        assert!(!buf.set_lines_truncated(true));
        assert!(!buf.set_dots_truncated(true));

        let empty = BTreeMap::new();
        let fits = Snapshot { dots: &dots[..1], trails: &empty, stats: TickStats::default() };
        build_render_buffer(&fits, 8.0, &mut buf);
        assert!(!buf.lines_truncated());
        assert!(!buf.dots_truncated());
    }

    #[test]
    fn rebuild_clears_previous_frame() {
        let dots = vec![Dot::new(DotId::new(0, 1), Vec2::ZERO, Vec2::ZERO, Rgba::WHITE)];
        let trails = BTreeMap::new();
        let snap = Snapshot { dots: &dots, trails: &trails, stats: TickStats::default() };
        let mut buf = RenderBuffer::new();
        build_render_buffer(&snap, 8.0, &mut buf);
        build_render_buffer(&snap, 8.0, &mut buf);
        assert_eq!(buf.dot_count(), 1);
    }
}
