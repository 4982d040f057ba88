use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of a dot.
///
/// `serial` is the engine's spawn counter and wraps to 0 on overflow.
/// `epoch` counts those wraparounds, so two ids with the same serial from
/// different epochs never compare equal. Ordering is `(epoch, serial)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DotId {
    epoch: u32,
    serial: u64,
}

impl DotId {
    pub const fn new(epoch: u32, serial: u64) -> Self {
        Self { epoch, serial }
    }

    /// Raw wrapping spawn counter.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Number of counter wraparounds before this id was issued.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}

impl fmt::Display for DotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch == 0 {
            write!(f, "#{}", self.serial)
        } else {
            write!(f, "#{}@{}", self.serial, self.epoch)
        }
    }
}

/// 8-bit RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels normalised to 0.0..=1.0, for GPU-side tinting.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// One historical point of a trail, with the color the dot had when it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailSample {
    pub position: Vec2,
    pub color: Rgba,
}
