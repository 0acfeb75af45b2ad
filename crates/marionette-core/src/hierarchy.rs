//! Immutable skeleton description: parent/child links, per-bone bind
//! transforms, and name lookup.
//!
//! The bone array doubles as the traversal order: construction rejects any
//! bone whose parent index is not strictly less than its own index, so a
//! single forward pass visits parents before children.

use glam::Mat4;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Input description for one bone, as handed over by the content loader.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoneDesc {
    /// Optional author-given name; unnamed bones get a generated placeholder.
    #[serde(default)]
    pub name: Option<String>,
    /// Parent index, or None for a root.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Default (bind) local transform.
    pub default_transform: Mat4,
}

/// One bone after construction. Owned exclusively by [`BoneHierarchy`].
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent: Option<usize>,
    pub default_transform: Mat4,
}

/// Immutable tree description of a skeleton.
#[derive(Debug)]
pub struct BoneHierarchy {
    bones: Vec<Bone>,
    roots: Vec<usize>,
    by_name: HashMap<String, usize>,
}

impl BoneHierarchy {
    /// Build from loader descriptions, validating topological order and
    /// normalizing bone names (placeholders for unnamed bones, dedup on
    /// collision). This is the only constructor; the result never mutates.
    pub fn build(descs: Vec<BoneDesc>) -> Result<Self, CoreError> {
        let mut bones = Vec::with_capacity(descs.len());
        let mut roots = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(descs.len());

        for (index, desc) in descs.into_iter().enumerate() {
            match desc.parent {
                Some(parent) if parent >= index => {
                    return Err(CoreError::NonTopologicalParent { bone: index, parent });
                }
                Some(_) => {}
                None => roots.push(index),
            }

            let mut name = desc
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("__bone{index}"));
            if by_name.contains_key(&name) {
                name = format!("{name}#{index}");
            }
            by_name.insert(name.clone(), index);

            bones.push(Bone {
                name,
                parent: desc.parent,
                default_transform: desc.default_transform,
            });
        }

        Ok(Self {
            bones,
            roots,
            by_name,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// O(1) name lookup.
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.bones[index].parent
    }

    #[inline]
    pub fn default_transform(&self, index: usize) -> Mat4 {
        self.bones[index].default_transform
    }

    #[inline]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[inline]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }
}
