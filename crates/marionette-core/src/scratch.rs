//! Per-engine scratch buffers reused across frames.
//!
//! Each skeleton instance owns its own arena; nothing here is shared between
//! engines, so two skeletons can be sampled on different threads as long as
//! each has its own `Engine`.

use glam::Mat4;

use crate::config::Config;
use crate::pose::{AbsolutePose, Pose};

#[derive(Debug, Default)]
pub struct Scratch {
    /// Sampled local pose for the primary (and, after mixing, blended) clip.
    pub local: Pose,
    /// Composed world-space pose; what `Engine::sample` hands back.
    pub absolute: AbsolutePose,
    /// Palette buffer reused by `Engine::skin_palette`.
    pub palette: Vec<Mat4>,
}

impl Scratch {
    pub fn new(cfg: &Config) -> Self {
        Self {
            local: Pose::with_capacity(cfg.scratch_bones),
            absolute: AbsolutePose::with_capacity(cfg.scratch_bones),
            palette: Vec::with_capacity(cfg.palette_capacity),
        }
    }
}
