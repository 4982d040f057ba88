//! Read-only views of the simulation handed to renderers.

use std::collections::BTreeMap;

use crate::api::types::DotId;
use crate::core::dot::Dot;
use crate::core::trail::PathTrail;

/// Counters for what happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Dots admitted to reach the target count.
    pub spawned: usize,
    /// Dots that fell inside the attractor radius.
    pub captured: usize,
    /// Captured dots replaced in place.
    pub respawned: usize,
    /// Captured dots removed because the population was above target.
    pub pruned: usize,
    /// Trails that finished decaying and were dropped.
    pub retired_trails: usize,
}

/// Borrowed view of the engine after a tick. Holding it keeps the engine
/// immutably borrowed, so nothing can change while a renderer reads it.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub dots: &'a [Dot],
    pub trails: &'a BTreeMap<DotId, PathTrail>,
    pub stats: TickStats,
}

impl<'a> Snapshot<'a> {
    pub fn dot(&self, id: DotId) -> Option<&'a Dot> {
        self.dots.iter().find(|d| d.id == id)
    }

    pub fn trail(&self, id: DotId) -> Option<&'a PathTrail> {
        self.trails.get(&id)
    }

    /// Number of line segments the trails will draw.
    pub fn segment_count(&self) -> usize {
        self.trails.values().map(|t| t.len().saturating_sub(1)).sum()
    }

    /// Value copy for a renderer that lives on another thread.
    pub fn to_owned(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            dots: self.dots.to_vec(),
            trails: self.trails.clone(),
            stats: self.stats,
        }
    }
}

/// Owned copy of a [`Snapshot`]; `Send` and independent of the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedSnapshot {
    pub dots: Vec<Dot>,
    pub trails: BTreeMap<DotId, PathTrail>,
    pub stats: TickStats,
}

impl OwnedSnapshot {
    pub fn view(&self) -> Snapshot<'_> {
        Snapshot {
            dots: &self.dots,
            trails: &self.trails,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Rgba, TrailSample};
    use glam::Vec2;

    fn fixture() -> (Vec<Dot>, BTreeMap<DotId, PathTrail>) {
        let id = DotId::new(0, 4);
        let dots = vec![Dot::new(id, Vec2::new(1.0, 2.0), Vec2::ZERO, Rgba::WHITE)];
        let mut trail = PathTrail::new();
        for x in 0..4 {
            trail.push(TrailSample { position: Vec2::new(x as f32, 0.0), color: Rgba::WHITE }, None);
        }
        let mut trails = BTreeMap::new();
        trails.insert(id, trail);
        (dots, trails)
    }

    #[test]
    fn lookup_by_id() {
        let (dots, trails) = fixture();
        let snap = Snapshot { dots: &dots, trails: &trails, stats: TickStats::default() };
        let id = DotId::new(0, 4);
        assert_eq!(snap.dot(id).map(|d| d.position), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(snap.trail(id).map(|t| t.len()), Some(4));
        assert!(snap.dot(DotId::new(0, 5)).is_none());
        assert_eq!(snap.segment_count(), 3);
    }

    #[test]
    fn owned_copy_round_trips_through_view() {
        let (dots, trails) = fixture();
        let snap = Snapshot { dots: &dots, trails: &trails, stats: TickStats::default() };
        let owned = snap.to_owned();
        drop(dots);
        let view = owned.view();
        assert_eq!(view.dots.len(), 1);
        assert_eq!(view.segment_count(), 3);
    }

    #[test]
    fn owned_snapshot_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<OwnedSnapshot>();
    }
}
