//! Error taxonomy for the core.
//!
//! Configuration variants are detected at load/bind time and indicate
//! malformed content that must be fixed upstream. Lookup variants fire at the
//! call site for names/ids the caller never loaded. Degenerate table
//! timesteps are deliberately NOT an error: the table degrades to a single
//! frame and the condition is surfaced via `log::warn!` and a playback event.

use thiserror::Error;

use crate::ids::{ClipId, MeshIndex};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    // Configuration errors (malformed skeleton/clip/binding data).
    #[error("bone {bone} declares parent {parent}, which does not precede it in topological order")]
    NonTopologicalParent { bone: usize, parent: usize },
    #[error("track for bone {bone} has no keyframes")]
    EmptyTrack { bone: usize },
    #[error("track for bone {bone} has non-increasing keyframe times at keyframe {index}")]
    NonMonotonicKeyframes { bone: usize, index: usize },
    #[error("track for bone {bone} has a negative keyframe time")]
    NegativeKeyframeTime { bone: usize },
    #[error("track references bone {bone} but the hierarchy has {bone_count} bones")]
    BoneIndexOutOfRange { bone: usize, bone_count: usize },
    #[error("mesh binds {bones} bones but the palette capacity is {capacity}")]
    PaletteCapacityExceeded { bones: usize, capacity: usize },
    #[error("palette slot {slot} is out of range or assigned twice")]
    PaletteSlotInvalid { slot: usize },
    #[error("skin binding references bone {bone} but the hierarchy has {bone_count} bones")]
    SkinBoneOutOfRange { bone: usize, bone_count: usize },

    // Lookup errors (unknown names/ids passed to the API).
    #[error("unknown clip '{0}'")]
    UnknownClip(String),
    #[error("unknown clip id {0:?}")]
    UnknownClipId(ClipId),
    #[error("unknown bone '{0}'")]
    UnknownBone(String),
    #[error("unknown mesh index {0:?}")]
    UnknownMesh(MeshIndex),
    #[error("no clip is currently playing")]
    NoActiveClip,
    #[error("no precomputed table has been built for the active clip")]
    NoTable,
}
