use glam::{Mat4, Vec3};
use marionette_core::{
    AnimationClip, BoneDesc, BoneHierarchy, ClipId, Config, CoreError, Engine, InterpolationMethod,
    InterpolationTable, Keyframe, KeyframeTrack, PlaybackEvent, SkinBinding, Ticks,
};

fn approx_mat4(a: &Mat4, b: &Mat4, eps: f32) {
    let (ca, cb) = (a.to_cols_array(), b.to_cols_array());
    for i in 0..16 {
        assert!(
            (ca[i] - cb[i]).abs() <= eps,
            "component {i}: left={} right={}",
            ca[i],
            cb[i]
        );
    }
}

fn hierarchy() -> BoneHierarchy {
    BoneHierarchy::build(vec![
        BoneDesc {
            name: Some("Root".into()),
            parent: None,
            default_transform: Mat4::IDENTITY,
        },
        BoneDesc {
            name: Some("Spine".into()),
            parent: Some(0),
            default_transform: Mat4::from_translation(Vec3::Y),
        },
    ])
    .unwrap()
}

const DURATION: Ticks = 6_000_000;

fn swing_clip() -> AnimationClip {
    AnimationClip::new(
        "Swing",
        vec![KeyframeTrack {
            bone: 1,
            keyframes: vec![
                Keyframe {
                    time: 0,
                    transform: Mat4::IDENTITY,
                },
                Keyframe {
                    time: DURATION,
                    transform: Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
                },
            ],
        }],
    )
}

/// it should produce floor(duration / timestep) frames below the duration and
/// exactly one frame at or beyond it
#[test]
fn frame_counts() {
    let h = hierarchy();
    let clip = swing_clip();
    let t = InterpolationTable::build(
        &h,
        &clip,
        ClipId(0),
        1_000_000,
        InterpolationMethod::SphericalLinear,
    );
    assert_eq!(t.frame_count(), 6);
    assert!(!t.is_degenerate());

    let t = InterpolationTable::build(
        &h,
        &clip,
        ClipId(0),
        DURATION,
        InterpolationMethod::SphericalLinear,
    );
    assert_eq!(t.frame_count(), 1);
    assert!(t.is_degenerate());

    let t = InterpolationTable::build(
        &h,
        &clip,
        ClipId(0),
        0,
        InterpolationMethod::SphericalLinear,
    );
    assert_eq!(t.frame_count(), 1);
    assert!(t.is_degenerate());
}

/// it should match live sampling at each frame's discretized time
#[test]
fn table_matches_live_sampling() {
    let timestep: Ticks = 1_000_000;
    let mut eng = Engine::new(hierarchy(), Config::default());
    let id = eng.load_clip(swing_clip()).unwrap();
    eng.play(id).unwrap();
    eng.build_table(timestep).unwrap();

    for elapsed in [0, 300_000, 1_500_000, 2_999_999, 5_900_000] {
        let discretized = (elapsed / timestep) * timestep;
        let table_pose = eng.pose_at(elapsed).unwrap().clone();

        let mut live = Engine::new(hierarchy(), Config::default());
        let id2 = live.load_clip(swing_clip()).unwrap();
        live.play(id2).unwrap();
        live.advance_time(discretized);
        let live_pose = live.sample().unwrap();
        for (a, b) in table_pose.transforms.iter().zip(live_pose.transforms.iter()) {
            approx_mat4(a, b, 1e-5);
        }
    }
}

/// it should clamp lookups past the last frame
#[test]
fn lookup_clamps_to_last_frame() {
    let h = hierarchy();
    let clip = swing_clip();
    let t = InterpolationTable::build(
        &h,
        &clip,
        ClipId(0),
        1_000_000,
        InterpolationMethod::SphericalLinear,
    );
    assert_eq!(t.frame_index(DURATION * 10), t.frame_count() - 1);
    assert_eq!(t.frame_index(-5), 0);
}

/// it should degrade a too-coarse timestep to one frame and raise the
/// quantization event instead of failing
#[test]
fn degenerate_timestep_warns_but_works() {
    let mut eng = Engine::new(hierarchy(), Config::default());
    let id = eng.load_clip(swing_clip()).unwrap();
    eng.play(id).unwrap();
    eng.build_table(DURATION * 2).unwrap();
    assert!(eng.outputs().events.contains(&PlaybackEvent::TableQuantized {
        clip: id,
        timestep: DURATION * 2,
    }));

    // Still usable: every lookup lands on the single frame 0 pose, where the
    // track overwrites Spine's local with the first keyframe (identity).
    let pose = eng.pose_at(DURATION - 1).unwrap();
    approx_mat4(&pose.transforms[1], &Mat4::IDENTITY, 1e-6);
}

/// it should route sample() through the table once one is built
#[test]
fn sample_uses_table_when_built() {
    let timestep: Ticks = 1_000_000;
    let mut eng = Engine::new(hierarchy(), Config::default());
    let id = eng.load_clip(swing_clip()).unwrap();
    eng.play(id).unwrap();
    eng.build_table(timestep).unwrap();

    // Halfway between frames 1 and 2: the table path returns frame 1's pose,
    // not a freshly interpolated one.
    eng.advance_time(1_500_000);
    let sampled = eng.sample().unwrap().clone();
    let frame1 = eng.pose_at(1_000_000).unwrap();
    for (a, b) in sampled.transforms.iter().zip(frame1.transforms.iter()) {
        approx_mat4(a, b, 1e-6);
    }
}

/// it should fall back to live sampling while a blend layer is attached so
/// the blend contribution is never dropped
#[test]
fn blend_bypasses_table_path() {
    let mut eng = Engine::new(hierarchy(), Config::default());
    let primary = eng.load_clip(swing_clip()).unwrap();
    let shifted = eng
        .load_clip(AnimationClip::new(
            "Shifted",
            vec![KeyframeTrack {
                bone: 1,
                keyframes: vec![Keyframe {
                    time: 0,
                    transform: Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)),
                }],
            }],
        ))
        .unwrap();
    eng.play(primary).unwrap();
    eng.build_table(1_000_000).unwrap();

    // Factor 1.0 must land exactly on the blend clip's transform even though
    // a table exists for the primary.
    eng.set_blend_clip(shifted, 1.0).unwrap();
    let pose = eng.sample().unwrap();
    assert!(
        (pose.transforms[1].w_axis.x - 10.0).abs() < 1e-5,
        "blend dropped: x = {}",
        pose.transforms[1].w_axis.x
    );

    // Clearing the blend restores the table path.
    eng.clear_blend();
    let pose = eng.sample().unwrap();
    assert!(pose.transforms[1].w_axis.x.abs() < 1e-5);
}

/// it should require a table before table-path lookups
#[test]
fn pose_at_requires_table() {
    let mut eng = Engine::new(hierarchy(), Config::default());
    let id = eng.load_clip(swing_clip()).unwrap();
    eng.play(id).unwrap();
    assert_eq!(eng.pose_at(0).unwrap_err(), CoreError::NoTable);
}

/// it should build mesh-reduced palette tables matching the live palette at
/// discretized times
#[test]
fn palette_table_matches_live_palette() {
    let timestep: Ticks = 2_000_000;
    let inv = Mat4::from_translation(-Vec3::Y);
    let mut eng = Engine::new(hierarchy(), Config::default());
    let mesh = eng
        .register_mesh(vec![SkinBinding {
            bone: 1,
            inverse_bind: inv,
            slot: 0,
        }])
        .unwrap();
    let id = eng.load_clip(swing_clip()).unwrap();
    eng.play(id).unwrap();

    let table = eng.build_palette_table(mesh, timestep).unwrap();
    assert_eq!(table.frame_count(), 3);
    assert!(!table.is_degenerate());

    for elapsed in [0, 2_000_000, 4_000_000] {
        let from_table = table.palette_at(elapsed).to_vec();

        let mut live = Engine::new(hierarchy(), Config::default());
        let mesh2 = live
            .register_mesh(vec![SkinBinding {
                bone: 1,
                inverse_bind: inv,
                slot: 0,
            }])
            .unwrap();
        let id2 = live.load_clip(swing_clip()).unwrap();
        live.play(id2).unwrap();
        live.advance_time(elapsed);
        live.sample().unwrap();
        let live_palette = live.skin_palette(mesh2).unwrap();
        assert_eq!(from_table.len(), live_palette.len());
        for (a, b) in from_table.iter().zip(live_palette.iter()) {
            approx_mat4(a, b, 1e-5);
        }
    }
}
