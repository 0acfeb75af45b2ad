//! Engine: data ownership and the public playback API.
//!
//! One engine owns one skeleton, a clip library, per-mesh skin bindings, the
//! primary running animation plus an optional blend layer, and an optional
//! precomputed table. The per-frame calling order is
//! `advance_time` -> `sample` -> `skin_palette` per mesh.

use glam::Mat4;

use crate::clip::{AnimationClip, Ticks};
use crate::config::Config;
use crate::error::CoreError;
use crate::hierarchy::BoneHierarchy;
use crate::ids::{ClipId, MeshIndex};
use crate::interp::InterpolationMethod;
use crate::outputs::{Outputs, PlaybackEvent};
use crate::player::{BlendState, PlaybackState, RunningAnimation};
use crate::pose::{compose, AbsolutePose};
use crate::sampling::{sample_clip_pose, sample_track};
use crate::skinning::{SkinBinding, SkinBindingSet};
use crate::table::{InterpolationTable, PaletteTable};

/// Minimal clip library storage.
#[derive(Default, Debug)]
struct ClipLib {
    items: Vec<(ClipId, AnimationClip)>,
}

impl ClipLib {
    fn insert(&mut self, id: ClipId, clip: AnimationClip) {
        self.items.push((id, clip));
    }

    fn get(&self, id: ClipId) -> Option<&AnimationClip> {
        self.items
            .iter()
            .find_map(|(c, clip)| if *c == id { Some(clip) } else { None })
    }

    fn find(&self, name: &str) -> Option<ClipId> {
        self.items
            .iter()
            .find_map(|(c, clip)| if clip.name == name { Some(*c) } else { None })
    }
}

/// Engine facade over one skeleton instance.
#[derive(Debug)]
pub struct Engine {
    // Owned data
    cfg: Config,
    hierarchy: BoneHierarchy,
    next_clip_id: u32,
    clips: ClipLib,
    meshes: Vec<SkinBindingSet>,

    // Playback state
    method: InterpolationMethod,
    primary: Option<RunningAnimation>,
    blend: Option<BlendState>,
    table: Option<InterpolationTable>,

    // Per-frame buffers and outputs
    scratch: crate::scratch::Scratch,
    outputs: Outputs,
}

impl Engine {
    /// Create an engine for one skeleton. The scratch pose starts at the
    /// composed bind pose, so palette queries are valid before the first
    /// `sample` call.
    pub fn new(hierarchy: BoneHierarchy, cfg: Config) -> Self {
        let mut scratch = crate::scratch::Scratch::new(&cfg);
        scratch.local.reset_to_defaults(&hierarchy);
        compose(&hierarchy, &scratch.local, &mut scratch.absolute);
        Self {
            cfg,
            hierarchy,
            next_clip_id: 0,
            clips: ClipLib::default(),
            meshes: Vec::new(),
            method: InterpolationMethod::default(),
            primary: None,
            blend: None,
            table: None,
            scratch,
            outputs: Outputs::default(),
        }
    }

    #[inline]
    pub fn hierarchy(&self) -> &BoneHierarchy {
        &self.hierarchy
    }

    #[inline]
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Switch interpolation policy. Invalidates any precomputed table, which
    /// was built with the previous method.
    pub fn set_method(&mut self, method: InterpolationMethod) {
        if self.method != method {
            self.method = method;
            self.table = None;
        }
    }

    /// Load a validated clip into the library, returning its id.
    pub fn load_clip(&mut self, mut clip: AnimationClip) -> Result<ClipId, CoreError> {
        clip.validate(self.hierarchy.len())?;
        let id = ClipId(self.next_clip_id);
        self.next_clip_id += 1;
        clip.id = Some(id);
        self.clips.insert(id, clip);
        Ok(id)
    }

    #[inline]
    pub fn clip(&self, id: ClipId) -> Option<&AnimationClip> {
        self.clips.get(id)
    }

    pub fn resolve_clip(&self, name: &str) -> Result<ClipId, CoreError> {
        self.clips
            .find(name)
            .ok_or_else(|| CoreError::UnknownClip(name.to_string()))
    }

    pub fn resolve_bone(&self, name: &str) -> Result<usize, CoreError> {
        self.hierarchy
            .resolve(name)
            .ok_or_else(|| CoreError::UnknownBone(name.to_string()))
    }

    /// Register a mesh's skin bindings. Palette capacity and slot layout are
    /// validated here, once, never per frame.
    pub fn register_mesh(&mut self, bindings: Vec<SkinBinding>) -> Result<MeshIndex, CoreError> {
        let set = SkinBindingSet::new(bindings, self.hierarchy.len(), self.cfg.palette_capacity)?;
        let index = MeshIndex(self.meshes.len() as u32);
        self.meshes.push(set);
        Ok(index)
    }

    /// Start (or restart) playback of `clip` from elapsed = 0. Any dependent
    /// precomputed table is invalidated; rebuild it or fall back to live
    /// sampling.
    pub fn play(&mut self, clip: ClipId) -> Result<(), CoreError> {
        let track_count = self
            .clips
            .get(clip)
            .ok_or(CoreError::UnknownClipId(clip))?
            .tracks
            .len();
        self.primary = Some(RunningAnimation::new(clip, track_count));
        self.table = None;
        Ok(())
    }

    /// Switch the active clip by name; resets elapsed time.
    pub fn change_clip(&mut self, name: &str) -> Result<ClipId, CoreError> {
        let id = self.resolve_clip(name)?;
        self.play(id)?;
        Ok(id)
    }

    pub fn stop(&mut self) {
        if let Some(primary) = self.primary.as_mut() {
            primary.stop();
        }
    }

    pub fn reset(&mut self) {
        if let Some(primary) = self.primary.as_mut() {
            primary.reset();
        }
        if let Some(blend) = self.blend.as_mut() {
            blend.anim.reset();
        }
    }

    pub fn set_looping(&mut self, looping: bool) -> Result<(), CoreError> {
        let primary = self.primary.as_mut().ok_or(CoreError::NoActiveClip)?;
        primary.looping = looping;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), CoreError> {
        let primary = self.primary.as_mut().ok_or(CoreError::NoActiveClip)?;
        primary.speed = speed;
        Ok(())
    }

    #[inline]
    pub fn active_clip(&self) -> Option<ClipId> {
        self.primary.as_ref().map(|p| p.clip)
    }

    #[inline]
    pub fn elapsed(&self) -> Option<Ticks> {
        self.primary.as_ref().map(|p| p.elapsed)
    }

    #[inline]
    pub fn state(&self) -> Option<PlaybackState> {
        self.primary.as_ref().map(|p| p.state)
    }

    /// Duration of the active clip.
    pub fn clip_duration(&self) -> Result<Ticks, CoreError> {
        let primary = self.primary.as_ref().ok_or(CoreError::NoActiveClip)?;
        let clip = self
            .clips
            .get(primary.clip)
            .ok_or(CoreError::UnknownClipId(primary.clip))?;
        Ok(clip.duration())
    }

    /// Attach a secondary animation blended over the primary with `factor`
    /// in [0,1]. Bones absent from the blend clip pass the primary through.
    /// While a blend is attached, `sample` bypasses any precomputed table.
    pub fn set_blend_clip(&mut self, clip: ClipId, factor: f32) -> Result<(), CoreError> {
        let track_count = self
            .clips
            .get(clip)
            .ok_or(CoreError::UnknownClipId(clip))?
            .tracks
            .len();
        self.blend = Some(BlendState::new(
            RunningAnimation::new(clip, track_count),
            factor,
        ));
        Ok(())
    }

    /// Update the blend factor. The factor belongs to the blend relationship
    /// and may be animated by the caller frame-to-frame (crossfades); the
    /// core never auto-animates it.
    pub fn set_blend_factor(&mut self, factor: f32) -> Result<(), CoreError> {
        let blend = self.blend.as_mut().ok_or(CoreError::NoActiveClip)?;
        blend.set_factor(factor);
        Ok(())
    }

    pub fn clear_blend(&mut self) {
        self.blend = None;
    }

    /// Advance the primary (and blend) animation by `delta` ticks, scaled by
    /// each animation's speed factor. Returns the events raised by this step.
    pub fn advance_time(&mut self, delta: Ticks) -> &Outputs {
        self.outputs.clear();
        if let Some(primary) = self.primary.as_mut() {
            if let Some(clip) = self.clips.get(primary.clip) {
                let duration = clip.duration();
                primary.advance(delta, duration, &mut self.outputs);
            }
        }
        if let Some(blend) = self.blend.as_mut() {
            if let Some(clip) = self.clips.get(blend.anim.clip) {
                let duration = clip.duration();
                blend.anim.advance(delta, duration, &mut self.outputs);
            }
        }
        &self.outputs
    }

    #[inline]
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Current composed pose for the whole skeleton. Uses the precomputed
    /// table when one is built for the active clip, live sampling otherwise.
    /// Tables hold single-clip poses, so an active blend layer forces the
    /// live path until it is cleared.
    pub fn sample(&mut self) -> Result<&AbsolutePose, CoreError> {
        let primary = self.primary.as_mut().ok_or(CoreError::NoActiveClip)?;

        if let Some(table) = &self.table {
            if self.blend.is_none() && table.clip() == primary.clip {
                self.scratch.absolute.copy_from(table.pose_at(primary.elapsed));
                return Ok(&self.scratch.absolute);
            }
        }

        let clip = self
            .clips
            .get(primary.clip)
            .ok_or(CoreError::UnknownClipId(primary.clip))?;
        sample_clip_pose(
            &self.hierarchy,
            clip,
            &mut primary.cursors,
            primary.elapsed,
            self.method,
            &mut self.scratch.local,
        );

        if let Some(blend) = self.blend.as_mut() {
            if let Some(blend_clip) = self.clips.get(blend.anim.clip) {
                let factor = blend.factor();
                let elapsed = blend.anim.elapsed;
                for (track, cursor) in
                    blend_clip.tracks.iter().zip(blend.anim.cursors.iter_mut())
                {
                    let sampled = sample_track(track, cursor, elapsed, self.method);
                    let current = self.scratch.local.transforms[track.bone];
                    self.scratch.local.transforms[track.bone] =
                        self.method.blend(&current, &sampled, factor);
                }
            }
        }

        compose(&self.hierarchy, &self.scratch.local, &mut self.scratch.absolute);
        Ok(&self.scratch.absolute)
    }

    /// Build a precomputed table for the active clip at `timestep` ticks.
    /// A degenerate timestep (<= 0 or >= duration) still yields a usable
    /// 1-frame table and raises a `TableQuantized` event instead of failing.
    pub fn build_table(&mut self, timestep: Ticks) -> Result<(), CoreError> {
        let clip_id = self.primary.as_ref().ok_or(CoreError::NoActiveClip)?.clip;
        let clip = self
            .clips
            .get(clip_id)
            .ok_or(CoreError::UnknownClipId(clip_id))?;
        let table =
            InterpolationTable::build(&self.hierarchy, clip, clip_id, timestep, self.method);
        if table.is_degenerate() {
            self.outputs.push_event(PlaybackEvent::TableQuantized {
                clip: clip_id,
                timestep,
            });
        }
        self.table = Some(table);
        Ok(())
    }

    #[inline]
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    pub fn clear_table(&mut self) {
        self.table = None;
    }

    /// Table-path pose lookup at an arbitrary elapsed time.
    pub fn pose_at(&self, elapsed: Ticks) -> Result<&AbsolutePose, CoreError> {
        let table = self.table.as_ref().ok_or(CoreError::NoTable)?;
        Ok(table.pose_at(elapsed))
    }

    /// Build a mesh-reduced palette table for the active clip. The table is
    /// handed to the caller; it stays valid regardless of later clip changes
    /// on this engine (it references nothing but its own frames).
    pub fn build_palette_table(
        &self,
        mesh: MeshIndex,
        timestep: Ticks,
    ) -> Result<PaletteTable, CoreError> {
        let clip_id = self.primary.as_ref().ok_or(CoreError::NoActiveClip)?.clip;
        let clip = self
            .clips
            .get(clip_id)
            .ok_or(CoreError::UnknownClipId(clip_id))?;
        let bindings = self
            .meshes
            .get(mesh.0 as usize)
            .ok_or(CoreError::UnknownMesh(mesh))?;
        Ok(PaletteTable::build(
            &self.hierarchy,
            clip,
            clip_id,
            mesh,
            bindings,
            timestep,
            self.method,
        ))
    }

    /// Matrix palette for one mesh, built from the most recently sampled
    /// pose. Call after `sample`; consumed immediately before the draw call.
    pub fn skin_palette(&mut self, mesh: MeshIndex) -> Result<&[Mat4], CoreError> {
        let set = self
            .meshes
            .get(mesh.0 as usize)
            .ok_or(CoreError::UnknownMesh(mesh))?;
        set.build_palette(&self.scratch.absolute, &mut self.scratch.palette);
        Ok(&self.scratch.palette)
    }

    /// Pass-through for unskinned meshes: the mesh root bone's current
    /// world-space transform (the renderer multiplies its own world matrix).
    pub fn mesh_root_transform(&self, bone: usize) -> Result<Mat4, CoreError> {
        self.scratch
            .absolute
            .transforms
            .get(bone)
            .copied()
            .ok_or(CoreError::BoneIndexOutOfRange {
                bone,
                bone_count: self.hierarchy.len(),
            })
    }
}
