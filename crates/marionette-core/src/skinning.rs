//! Skin bindings and matrix-palette construction.
//!
//! Capacity and slot validation happens once when a mesh is registered;
//! per-frame palette construction is a straight multiply per binding.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::pose::AbsolutePose;

/// Per skinned bone: bone index, inverse bind-pose transform, palette slot.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SkinBinding {
    pub bone: usize,
    pub inverse_bind: Mat4,
    pub slot: usize,
}

/// Validated set of skin bindings for one mesh. Palette length equals the
/// number of skinned bones; slots are a permutation of `0..len`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkinBindingSet {
    bindings: Vec<SkinBinding>,
}

impl SkinBindingSet {
    /// Validate at bind time: bone indices in range, slot indices dense and
    /// unique, total count within the palette capacity. Never checked again
    /// per frame.
    pub fn new(
        bindings: Vec<SkinBinding>,
        bone_count: usize,
        capacity: usize,
    ) -> Result<Self, CoreError> {
        if bindings.len() > capacity {
            return Err(CoreError::PaletteCapacityExceeded {
                bones: bindings.len(),
                capacity,
            });
        }
        let mut seen = vec![false; bindings.len()];
        for binding in &bindings {
            if binding.bone >= bone_count {
                return Err(CoreError::SkinBoneOutOfRange {
                    bone: binding.bone,
                    bone_count,
                });
            }
            if binding.slot >= bindings.len() || seen[binding.slot] {
                return Err(CoreError::PaletteSlotInvalid { slot: binding.slot });
            }
            seen[binding.slot] = true;
        }
        Ok(Self { bindings })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    pub fn bindings(&self) -> &[SkinBinding] {
        &self.bindings
    }

    /// `palette[slot] = world[bone] * inverse_bind` for every binding.
    /// Output length always equals the skinned-bone count for the mesh.
    pub fn build_palette(&self, absolute: &AbsolutePose, out: &mut Vec<Mat4>) {
        out.clear();
        out.resize(self.bindings.len(), Mat4::IDENTITY);
        for binding in &self.bindings {
            out[binding.slot] = absolute.transforms[binding.bone] * binding.inverse_bind;
        }
    }
}
