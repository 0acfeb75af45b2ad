//! Core configuration for marionette-core.

use serde::{Deserialize, Serialize};

/// Default matrix palette capacity, matching the common shader register
/// budget for GPU skinning. Content that binds more bones per mesh than this
/// is rejected at bind time.
pub const MAX_PALETTE_SIZE: usize = 72;

/// Configuration for engine sizing and validation limits.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum palette slots per mesh; skin bindings are validated against
    /// this when a mesh is registered, never per frame.
    pub palette_capacity: usize,

    /// Initial capacity hint for the per-engine pose/palette scratch buffers.
    pub scratch_bones: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette_capacity: MAX_PALETTE_SIZE,
            scratch_bones: 64,
        }
    }
}
