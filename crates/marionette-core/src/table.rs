//! Precomputed pose tables: trade memory for per-frame CPU cost.
//!
//! Building replays the sampler + composer once over the whole clip at a
//! fixed timestep; playback then becomes an O(1) clamped index lookup.
//! Tables are read-only after build and must be rebuilt when their source
//! clip, timestep, or interpolation method changes.

use glam::Mat4;
use log::{debug, warn};

use crate::clip::{AnimationClip, Ticks};
use crate::hierarchy::BoneHierarchy;
use crate::ids::{ClipId, MeshIndex};
use crate::interp::InterpolationMethod;
use crate::pose::{compose, AbsolutePose, Pose};
use crate::sampling::{sample_clip_pose, TrackCursor};
use crate::skinning::SkinBindingSet;

/// Frame count for a clip/timestep pair, plus whether the request degraded
/// to the 1-frame case (timestep <= 0 or timestep >= duration).
fn frame_count(duration: Ticks, timestep: Ticks) -> (usize, bool) {
    if timestep <= 0 || timestep >= duration {
        (1, true)
    } else {
        ((duration / timestep) as usize, false)
    }
}

/// Dense table of absolute poses sampled at fixed intervals.
#[derive(Clone, Debug)]
pub struct InterpolationTable {
    clip: ClipId,
    timestep: Ticks,
    degenerate: bool,
    frames: Vec<AbsolutePose>,
}

impl InterpolationTable {
    /// Drive the sampler + composer forward through the whole clip exactly
    /// once, recording each frame's absolute pose. Uses its own cursor set,
    /// never the live playback state.
    pub fn build(
        hierarchy: &BoneHierarchy,
        clip: &AnimationClip,
        clip_id: ClipId,
        timestep: Ticks,
        method: InterpolationMethod,
    ) -> Self {
        let duration = clip.duration();
        let (frames, degenerate) = frame_count(duration, timestep);
        if degenerate {
            warn!(
                "clip '{}' (duration {duration} ticks) with timestep {timestep}: \
                 degenerate 1-frame table",
                clip.name
            );
        }

        let mut cursors = vec![TrackCursor::default(); clip.tracks.len()];
        let mut local = Pose::with_capacity(hierarchy.len());
        let mut out = Vec::with_capacity(frames);
        for frame in 0..frames {
            let time = frame as Ticks * timestep.max(0);
            sample_clip_pose(hierarchy, clip, &mut cursors, time, method, &mut local);
            let mut absolute = AbsolutePose::with_capacity(hierarchy.len());
            compose(hierarchy, &local, &mut absolute);
            out.push(absolute);
        }
        debug!(
            "built table for clip '{}': {} frame(s) at {timestep} ticks",
            clip.name,
            out.len()
        );

        Self {
            clip: clip_id,
            timestep,
            degenerate,
            frames: out,
        }
    }

    #[inline]
    pub fn clip(&self) -> ClipId {
        self.clip
    }

    #[inline]
    pub fn timestep(&self) -> Ticks {
        self.timestep
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether the build degraded to a single frame.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// `floor(elapsed / timestep)`, clamped to `[0, frame_count - 1]`.
    #[inline]
    pub fn frame_index(&self, elapsed: Ticks) -> usize {
        if self.timestep <= 0 {
            return 0;
        }
        ((elapsed.max(0) / self.timestep) as usize).min(self.frames.len() - 1)
    }

    #[inline]
    pub fn pose_at(&self, elapsed: Ticks) -> &AbsolutePose {
        &self.frames[self.frame_index(elapsed)]
    }
}

/// Mesh-reduced table: per frame, only the palette for one mesh's skin
/// bindings instead of the full skeleton pose.
#[derive(Clone, Debug)]
pub struct PaletteTable {
    clip: ClipId,
    mesh: MeshIndex,
    timestep: Ticks,
    degenerate: bool,
    frames: Vec<Vec<Mat4>>,
}

impl PaletteTable {
    pub fn build(
        hierarchy: &BoneHierarchy,
        clip: &AnimationClip,
        clip_id: ClipId,
        mesh: MeshIndex,
        bindings: &SkinBindingSet,
        timestep: Ticks,
        method: InterpolationMethod,
    ) -> Self {
        let duration = clip.duration();
        let (frames, degenerate) = frame_count(duration, timestep);
        if degenerate {
            warn!(
                "clip '{}' palette table for mesh {mesh:?}: degenerate 1-frame table",
                clip.name
            );
        }

        let mut cursors = vec![TrackCursor::default(); clip.tracks.len()];
        let mut local = Pose::with_capacity(hierarchy.len());
        let mut absolute = AbsolutePose::with_capacity(hierarchy.len());
        let mut out = Vec::with_capacity(frames);
        for frame in 0..frames {
            let time = frame as Ticks * timestep.max(0);
            sample_clip_pose(hierarchy, clip, &mut cursors, time, method, &mut local);
            compose(hierarchy, &local, &mut absolute);
            let mut palette = Vec::with_capacity(bindings.len());
            bindings.build_palette(&absolute, &mut palette);
            out.push(palette);
        }

        Self {
            clip: clip_id,
            mesh,
            timestep,
            degenerate,
            frames: out,
        }
    }

    #[inline]
    pub fn clip(&self) -> ClipId {
        self.clip
    }

    #[inline]
    pub fn mesh(&self) -> MeshIndex {
        self.mesh
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    #[inline]
    pub fn palette_at(&self, elapsed: Ticks) -> &[Mat4] {
        if self.timestep <= 0 {
            return &self.frames[0];
        }
        let index = ((elapsed.max(0) / self.timestep) as usize).min(self.frames.len() - 1);
        &self.frames[index]
    }
}
