//! Marionette Core (engine-agnostic)
//!
//! Skeletal-animation sampling and pose composition: given a bone hierarchy
//! and keyframed clips, produce per-bone local transforms at an arbitrary
//! elapsed time, compose them into world-space poses, and build the matrix
//! palettes consumed by a GPU-skinning renderer. Two clips can be blended
//! per bone, and a precomputed table trades memory for per-frame CPU cost.
//!
//! Model/animation file parsing, GPU resources, and frame scheduling belong
//! to the host; this crate purely maps (skeleton, clips, time) to poses and
//! palettes.

pub mod clip;
pub mod config;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod player;
pub mod pose;
pub mod sampling;
pub mod scratch;
pub mod skinning;
pub mod table;

// Re-exports for consumers (adapters)
pub use clip::{AnimationClip, Keyframe, KeyframeTrack, Ticks, TICKS_PER_SECOND};
pub use config::{Config, MAX_PALETTE_SIZE};
pub use engine::Engine;
pub use error::CoreError;
pub use hierarchy::{Bone, BoneDesc, BoneHierarchy};
pub use ids::{ClipId, MeshIndex};
pub use interp::InterpolationMethod;
pub use outputs::{Outputs, PlaybackEvent};
pub use player::{BlendState, PlaybackState, RunningAnimation};
pub use pose::{compose, AbsolutePose, Pose};
pub use sampling::{find_bracket, sample_clip_pose, sample_track, TrackCursor};
pub use scratch::Scratch;
pub use skinning::{SkinBinding, SkinBindingSet};
pub use table::{InterpolationTable, PaletteTable};
