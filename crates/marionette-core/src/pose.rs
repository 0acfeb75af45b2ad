//! Local and absolute (world-space) pose buffers and the hierarchical
//! composition pass.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::hierarchy::BoneHierarchy;

/// Dense array of per-bone local transforms, indexed by bone index.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    pub transforms: Vec<Mat4>,
}

impl Pose {
    pub fn with_capacity(bones: usize) -> Self {
        Self {
            transforms: Vec::with_capacity(bones),
        }
    }

    /// Reset to the hierarchy's default (bind) local transforms.
    pub fn reset_to_defaults(&mut self, hierarchy: &BoneHierarchy) {
        self.transforms.clear();
        self.transforms
            .extend(hierarchy.bones().iter().map(|b| b.default_transform));
    }
}

/// Dense array of per-bone world-space transforms. Derived data: always
/// recomputed from a [`Pose`] via [`compose`], never mutated directly.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AbsolutePose {
    pub transforms: Vec<Mat4>,
}

impl AbsolutePose {
    pub fn with_capacity(bones: usize) -> Self {
        Self {
            transforms: Vec::with_capacity(bones),
        }
    }

    #[inline]
    pub fn copy_from(&mut self, other: &AbsolutePose) {
        self.transforms.clear();
        self.transforms.extend_from_slice(&other.transforms);
    }
}

/// Propagate parent transforms down the hierarchy:
/// `world[i] = world[parent] * local[i]`, roots pass through unchanged.
///
/// One iterative pass in index order is sufficient because construction
/// guarantees parents precede children. This runs once per frame per
/// skeleton and is the performance-critical path.
pub fn compose(hierarchy: &BoneHierarchy, local: &Pose, out: &mut AbsolutePose) {
    out.transforms.clear();
    out.transforms.reserve(local.transforms.len());
    for (i, bone) in hierarchy.bones().iter().enumerate() {
        let world = match bone.parent {
            Some(parent) => out.transforms[parent] * local.transforms[i],
            None => local.transforms[i],
        };
        out.transforms.push(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::BoneDesc;
    use glam::Vec3;

    fn chain(transforms: &[Mat4]) -> BoneHierarchy {
        let descs = transforms
            .iter()
            .enumerate()
            .map(|(i, &m)| BoneDesc {
                name: None,
                parent: if i == 0 { None } else { Some(i - 1) },
                default_transform: m,
            })
            .collect();
        BoneHierarchy::build(descs).unwrap()
    }

    #[test]
    fn compose_accumulates_down_the_chain() {
        let t = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let h = chain(&[Mat4::IDENTITY, t, Mat4::IDENTITY]);
        let mut local = Pose::default();
        local.reset_to_defaults(&h);
        let mut world = AbsolutePose::default();
        compose(&h, &local, &mut world);

        // Head inherits Spine's translation; Root stays identity.
        assert_eq!(world.transforms[0], Mat4::IDENTITY);
        assert_eq!(world.transforms[1], t);
        assert_eq!(world.transforms[2], t);
    }

    #[test]
    fn compose_handles_multiple_roots() {
        let a = Mat4::from_translation(Vec3::X);
        let b = Mat4::from_translation(Vec3::Y);
        let h = BoneHierarchy::build(vec![
            BoneDesc {
                name: None,
                parent: None,
                default_transform: a,
            },
            BoneDesc {
                name: None,
                parent: None,
                default_transform: b,
            },
        ])
        .unwrap();
        let mut local = Pose::default();
        local.reset_to_defaults(&h);
        let mut world = AbsolutePose::default();
        compose(&h, &local, &mut world);
        assert_eq!(world.transforms[0], a);
        assert_eq!(world.transforms[1], b);
    }
}
