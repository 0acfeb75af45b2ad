//! Interpolation policies over 4x4 affine transforms:
//! - Linear: component-wise matrix lerp
//! - SphericalLinear: TRS decompose, slerp rotation, lerp translation/scale

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Interpolation policy, selected per sampler/engine instance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Component-wise linear interpolation of the two matrices. Fast but not
    /// rotation-correct (mid-interpolation shear/scale drift); acceptable for
    /// coarse or low-quality playback.
    Linear,
    /// Decompose each endpoint into translation/rotation/scale, slerp the
    /// rotations, lerp the rest, recompose. Exact only for matrices without
    /// skew; skewed input is decomposed on a best-effort basis.
    #[default]
    SphericalLinear,
}

impl InterpolationMethod {
    /// Interpolate between two keyframe transforms with fraction `t` in [0,1].
    #[inline]
    pub fn interpolate(&self, a: &Mat4, b: &Mat4, t: f32) -> Mat4 {
        match self {
            InterpolationMethod::Linear => lerp_mat4(a, b, t),
            InterpolationMethod::SphericalLinear => slerp_mat4(a, b, t),
        }
    }

    /// Blend operator used by the blend mixer. Same math as interpolation;
    /// kept as a separate entry point because the inputs come from two
    /// different clips rather than one track's bracketing keyframes.
    #[inline]
    pub fn blend(&self, primary: &Mat4, secondary: &Mat4, factor: f32) -> Mat4 {
        self.interpolate(primary, secondary, factor)
    }
}

/// Component-wise linear interpolation of two matrices.
#[inline]
pub fn lerp_mat4(a: &Mat4, b: &Mat4, t: f32) -> Mat4 {
    *a * (1.0 - t) + *b * t
}

/// TRS interpolation: lerp translation and scale, slerp rotation
/// (shortest-arc), recompose.
#[inline]
pub fn slerp_mat4(a: &Mat4, b: &Mat4, t: f32) -> Mat4 {
    let (scale_a, rot_a, trans_a) = a.to_scale_rotation_translation();
    let (scale_b, rot_b, trans_b) = b.to_scale_rotation_translation();
    Mat4::from_scale_rotation_translation(
        scale_a.lerp(scale_b, t),
        rot_a.slerp(rot_b, t),
        trans_a.lerp(trans_b, t),
    )
}
