use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec3};
use marionette_core::{
    AnimationClip, BoneDesc, BoneHierarchy, Config, Engine, Keyframe, KeyframeTrack,
    TICKS_PER_SECOND,
};

const BONES: usize = 32;
const STEP: i64 = TICKS_PER_SECOND / 60;

fn chain(bones: usize) -> BoneHierarchy {
    let descs = (0..bones)
        .map(|i| BoneDesc {
            name: None,
            parent: if i == 0 { None } else { Some(i - 1) },
            default_transform: Mat4::from_translation(Vec3::new(0.0, 0.1, 0.0)),
        })
        .collect();
    BoneHierarchy::build(descs).unwrap()
}

fn wave_clip(bones: usize) -> AnimationClip {
    let duration = 2 * TICKS_PER_SECOND;
    let tracks = (0..bones)
        .map(|bone| KeyframeTrack {
            bone,
            keyframes: (0..=8)
                .map(|k| Keyframe {
                    time: k * duration / 8,
                    transform: Mat4::from_rotation_z(
                        (k as f32 / 8.0 + bone as f32 * 0.05).sin() * 0.4,
                    ),
                })
                .collect(),
        })
        .collect();
    AnimationClip::new("Wave", tracks)
}

fn bench_live_step(c: &mut Criterion) {
    let mut eng = Engine::new(chain(BONES), Config::default());
    let id = eng.load_clip(wave_clip(BONES)).unwrap();
    eng.play(id).unwrap();

    c.bench_function("advance_and_sample_live_32_bones", |b| {
        b.iter(|| {
            eng.advance_time(STEP);
            std::hint::black_box(eng.sample().unwrap());
        })
    });
}

fn bench_table_step(c: &mut Criterion) {
    let mut eng = Engine::new(chain(BONES), Config::default());
    let id = eng.load_clip(wave_clip(BONES)).unwrap();
    eng.play(id).unwrap();
    eng.build_table(STEP).unwrap();

    c.bench_function("advance_and_sample_table_32_bones", |b| {
        b.iter(|| {
            eng.advance_time(STEP);
            std::hint::black_box(eng.sample().unwrap());
        })
    });
}

criterion_group!(benches, bench_live_step, bench_table_step);
criterion_main!(benches);
