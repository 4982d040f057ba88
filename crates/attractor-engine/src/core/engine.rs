//! The simulation engine: owns the dots and their trails and advances
//! them one tick at a time.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::api::config::{CapturePolicy, EngineConfig, SimParams};
use crate::api::types::{DotId, Rgba, TrailSample};
use crate::core::attractor::Attractor;
use crate::core::dot::Dot;
use crate::core::ids::IdAllocator;
use crate::core::rng::Rng;
use crate::core::snapshot::{Snapshot, TickStats};
use crate::core::trail::{PathTrail, TrailPolicy};

pub struct SimulationEngine {
    dots: Vec<Dot>,
    trails: BTreeMap<DotId, PathTrail>,
    params: SimParams,
    /// Parameters waiting for the next tick boundary.
    pending: Option<SimParams>,
    ids: IdAllocator,
    rng: Rng,
    capture_policy: CapturePolicy,
    trail_policy: TrailPolicy,
    max_spawns_per_tick: Option<usize>,
    stats: TickStats,
    ticks: u64,
}

impl SimulationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dots: Vec::new(),
            trails: BTreeMap::new(),
            params: config.params.sanitized(),
            pending: None,
            ids: IdAllocator::new(),
            rng: Rng::new(config.seed),
            capture_policy: config.capture_policy,
            trail_policy: config.trail_policy,
            max_spawns_per_tick: config.max_spawns_per_tick,
            stats: TickStats::default(),
            ticks: 0,
        }
    }

    /// Replace the id allocator, e.g. to start near the wraparound point.
    pub fn with_ids(mut self, ids: IdAllocator) -> Self {
        self.ids = ids;
        self
    }

    /// Queue new parameters; they take effect at the start of the next tick.
    pub fn configure(&mut self, params: SimParams) {
        self.pending = Some(params.sanitized());
    }

    /// Parameters in force for the most recent tick.
    pub fn params(&self) -> SimParams {
        self.params
    }

    /// Parameters the next tick will use.
    pub fn next_params(&self) -> SimParams {
        self.pending.unwrap_or(self.params)
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Insert a dot at an exact state, with a fresh empty trail.
    /// It counts toward the population like any spawned dot.
    pub fn place_dot(&mut self, position: Vec2, velocity: Vec2, color: Rgba) -> DotId {
        let id = self.ids.next_id();
        self.admit(Dot::new(id, position, velocity, color));
        id
    }

    /// Current state without advancing.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            dots: &self.dots,
            trails: &self.trails,
            stats: self.stats,
        }
    }

    /// Advance the simulation by exactly one step against `attractor`.
    pub fn tick(&mut self, attractor: &Attractor) -> Snapshot<'_> {
        if let Some(params) = self.pending.take() {
            log::debug!(
                "params: target_count={} gravity={} path_length={}",
                params.target_count,
                params.gravity,
                params.path_length
            );
            self.params = params;
        }
        self.stats = TickStats::default();
        self.ticks += 1;

        self.admit_to_target(attractor);
        self.step_dots(attractor);
        self.advance_trails();

        log::trace!("tick {}: {} dots, {} trails, {:?}", self.ticks, self.dots.len(), self.trails.len(), self.stats);
        self.snapshot()
    }

    fn admit_to_target(&mut self, attractor: &Attractor) {
        let missing = self.params.target_count.saturating_sub(self.dots.len());
        let count = match self.max_spawns_per_tick {
            Some(max) => missing.min(max),
            None => missing,
        };
        for _ in 0..count {
            let dot = self.spawn(attractor);
            self.admit(dot);
        }
        self.stats.spawned = count;
    }

    /// Integrate, capture, shade and record every dot.
    fn step_dots(&mut self, attractor: &Attractor) {
        let gravity = self.params.gravity;
        let window = self.trail_policy.window(self.params.path_length);

        let mut i = 0;
        while i < self.dots.len() {
            let dist = self.dots[i].integrate(attractor, gravity);

            if attractor.captures(dist) {
                self.stats.captured += 1;
                let old_id = self.dots[i].id;
                self.retire_trail(old_id);

                if self.capture_policy == CapturePolicy::PruneOnCapacity
                    && self.dots.len() > self.params.target_count
                {
                    self.dots.swap_remove(i);
                    self.stats.pruned += 1;
                    log::debug!("pruned dot {} ({} left)", old_id, self.dots.len());
                    continue;
                }

                let fresh = self.spawn(attractor);
                self.open_trail(fresh.id);
                self.dots[i] = fresh;
                self.stats.respawned += 1;
            }

            // A respawned dot is shaded by the captured distance.
            let dot = &mut self.dots[i];
            dot.shade(dist, attractor.radius);
            let sample = TrailSample {
                position: dot.position,
                color: dot.color,
            };
            self.trails
                .entry(dot.id)
                .or_insert_with(PathTrail::new)
                .push(sample, window);

            i += 1;
        }
    }

    /// Advance every decaying trail and drop the ones that ran out.
    fn advance_trails(&mut self) {
        let step = self.trail_policy.decay_step();
        let mut retired = 0;
        self.trails.retain(|_, trail| {
            if trail.advance_decay(step) {
                retired += 1;
            }
            !trail.is_retired()
        });
        self.stats.retired_trails = retired;
    }

    fn spawn(&mut self, attractor: &Attractor) -> Dot {
        let id = self.ids.next_id();
        Dot::spawn(attractor, id, &mut self.rng)
    }

    fn admit(&mut self, dot: Dot) {
        self.open_trail(dot.id);
        self.dots.push(dot);
    }

    fn open_trail(&mut self, id: DotId) {
        if let Some(stale) = self.trails.insert(id, PathTrail::new()) {
            log::warn!("dot {} replaced a stale trail ({:?})", id, stale.state());
        }
    }

    fn retire_trail(&mut self, id: DotId) {
        if let Some(trail) = self.trails.get_mut(&id) {
            trail.begin_decay();
        }
    }
}
