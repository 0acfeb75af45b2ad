//! Canonical animation data model: keyframes, per-bone tracks, clips.
//!
//! Times are integer ticks; the conventional rate is
//! [`TICKS_PER_SECOND`] = 10,000,000 ticks per second.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::ClipId;

/// Integer time unit used for keyframe times and elapsed playback time.
pub type Ticks = i64;

/// Conventional tick rate (10,000,000 per second).
pub const TICKS_PER_SECOND: Ticks = 10_000_000;

/// A single (time, transform) sample within a track.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    /// Time in ticks, >= 0; strictly increasing within a track.
    pub time: Ticks,
    /// Local transform at this time (4x4 affine).
    pub transform: Mat4,
}

/// Ordered keyframe list for one bone within one clip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyframeTrack {
    /// Bone index into the hierarchy this track animates.
    pub bone: usize,
    pub keyframes: Vec<Keyframe>,
}

impl KeyframeTrack {
    /// Duration = time of the last keyframe (tracks are validated non-empty).
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.keyframes.last().map(|k| k.time).unwrap_or(0)
    }

    /// A single-keyframe track is static: no interpolation needed.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.keyframes.len() == 1
    }
}

/// A named collection of per-bone keyframe tracks.
///
/// Bones with no track use the hierarchy's default transform when sampled.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimationClip {
    /// Optional internal id assigned when loaded into the engine.
    #[serde(skip)]
    pub id: Option<ClipId>,
    pub name: String,
    pub tracks: Vec<KeyframeTrack>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, tracks: Vec<KeyframeTrack>) -> Self {
        Self {
            id: None,
            name: name.into(),
            tracks,
        }
    }

    /// Duration = max over all tracks' durations. A clip with no tracks has
    /// duration 0 and samples to the pure hierarchy default pose.
    pub fn duration(&self) -> Ticks {
        self.tracks.iter().map(KeyframeTrack::duration).max().unwrap_or(0)
    }

    /// First track animating `bone`, if any.
    pub fn track_for(&self, bone: usize) -> Option<&KeyframeTrack> {
        self.tracks.iter().find(|t| t.bone == bone)
    }

    /// Validate invariants against a hierarchy of `bone_count` bones:
    /// non-empty tracks, in-range bone indices, non-negative and strictly
    /// increasing keyframe times.
    pub fn validate(&self, bone_count: usize) -> Result<(), CoreError> {
        for track in &self.tracks {
            if track.bone >= bone_count {
                return Err(CoreError::BoneIndexOutOfRange {
                    bone: track.bone,
                    bone_count,
                });
            }
            if track.keyframes.is_empty() {
                return Err(CoreError::EmptyTrack { bone: track.bone });
            }
            if track.keyframes[0].time < 0 {
                return Err(CoreError::NegativeKeyframeTime { bone: track.bone });
            }
            for (index, pair) in track.keyframes.windows(2).enumerate() {
                if pair[1].time <= pair[0].time {
                    return Err(CoreError::NonMonotonicKeyframes {
                        bone: track.bone,
                        index: index + 1,
                    });
                }
            }
        }
        Ok(())
    }
}
