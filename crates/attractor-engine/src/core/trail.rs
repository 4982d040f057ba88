//! Path trails and their decay state machine.
//!
//! A trail is the sample history of one dot. While its dot lives the trail
//! is `Growing`; once the dot is captured or pruned it becomes `Decaying`
//! and a cursor eats samples from the front until nothing is left, at which
//! point it is `Retired` and dropped from the registry.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Rgba, TrailSample};

/// How trails grow and fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TrailPolicy {
    /// Fixed-length window of the most recent `path_length` samples.
    /// Retired trails lose one sample per tick.
    Windowed,
    /// Unbounded history while the dot lives; `decay_step` samples are
    /// consumed per tick once it is gone.
    Fading { decay_step: u32 },
}

impl TrailPolicy {
    pub const DEFAULT_FADE_STEP: u32 = 3;

    pub fn fading() -> Self {
        TrailPolicy::Fading {
            decay_step: Self::DEFAULT_FADE_STEP,
        }
    }

    /// Samples consumed per tick from a decaying trail. Never 0.
    pub fn decay_step(&self) -> usize {
        match self {
            TrailPolicy::Windowed => 1,
            TrailPolicy::Fading { decay_step } => (*decay_step).max(1) as usize,
        }
    }

    /// Most samples a growing trail may hold, if bounded.
    pub fn window(&self, path_length: usize) -> Option<usize> {
        match self {
            TrailPolicy::Windowed => Some(path_length),
            TrailPolicy::Fading { .. } => None,
        }
    }
}

impl Default for TrailPolicy {
    fn default() -> Self {
        TrailPolicy::Windowed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailState {
    Growing,
    Decaying,
    Retired,
}

/// Sample history of one dot.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTrail {
    samples: VecDeque<TrailSample>,
    /// Samples consumed from the front so far. Never decreases.
    start: usize,
    state: TrailState,
}

impl PathTrail {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            start: 0,
            state: TrailState::Growing,
        }
    }

    pub fn state(&self) -> TrailState {
        self.state
    }

    pub fn is_decaying(&self) -> bool {
        self.state == TrailState::Decaying
    }

    pub fn is_retired(&self) -> bool {
        self.state == TrailState::Retired
    }

    /// Cursor into the logical sequence; everything before it has been dropped.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Logical length: consumed samples plus the ones still held.
    pub fn total_len(&self) -> usize {
        self.start + self.samples.len()
    }

    /// Samples still visible, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &TrailSample> + DoubleEndedIterator {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consecutive sample pairs, each tagged with the earlier sample's color.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.samples
            .iter()
            .zip(self.samples.iter().skip(1))
            .map(|(prev, cur)| (prev.position, cur.position, prev.color))
    }

    /// Append a sample. Ignored unless the trail is still growing.
    /// `window` bounds how many samples a growing trail keeps.
    pub fn push(&mut self, sample: TrailSample, window: Option<usize>) {
        if self.state != TrailState::Growing {
            return;
        }
        self.samples.push_back(sample);
        if let Some(max) = window {
            let excess = self.samples.len().saturating_sub(max);
            self.consume(excess);
        }
    }

    /// Owner is gone: stop growing and start fading. No-op unless growing.
    pub fn begin_decay(&mut self) {
        if self.state == TrailState::Growing {
            self.state = TrailState::Decaying;
        }
    }

    /// Advance the decay cursor by `step`. Returns true when this call
    /// retired the trail.
    pub fn advance_decay(&mut self, step: usize) -> bool {
        if self.state != TrailState::Decaying {
            return false;
        }
        self.consume(step);
        if self.samples.is_empty() {
            self.state = TrailState::Retired;
            return true;
        }
        false
    }

    fn consume(&mut self, n: usize) {
        let n = n.min(self.samples.len());
        self.samples.drain(..n);
        self.start += n;
    }
}

impl Default for PathTrail {
    fn default() -> Self {
        Self::new()
    }
}
