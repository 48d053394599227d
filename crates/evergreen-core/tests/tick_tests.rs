// Host-side tests for the interpolation/tick engine.

use evergreen_core::layout::FocusFrame;
use evergreen_core::tick::{self, ease, ease_vec3};
use evergreen_core::{
    Camera, Mode, ParticleKind, ParticleRegistry, SceneContext, Smoothing, FOCUS_SCALE,
};
use glam::Vec3;

fn smoothing() -> Smoothing {
    Smoothing {
        position: 0.05,
        scale: 0.1,
        rotation: 0.05,
    }
}

fn populated(seed: u64) -> ParticleRegistry {
    let mut registry = ParticleRegistry::new(seed, 25.0);
    for i in 0..200 {
        let kind = match i % 3 {
            0 => ParticleKind::Decor,
            1 => ParticleKind::Dust,
            _ => ParticleKind::Photo,
        };
        registry.create(kind);
    }
    registry
}

fn strictly_between(value: f32, a: f32, b: f32) -> bool {
    value > a.min(b) && value < a.max(b)
}

#[test]
fn ease_moves_a_fixed_fraction() {
    assert!((ease(0.0, 10.0, 0.05) - 0.5).abs() < 1e-6);
    assert!((ease(10.0, 0.0, 0.1) - 9.0).abs() < 1e-6);
    let v = ease_vec3(Vec3::ZERO, Vec3::new(20.0, -20.0, 40.0), 0.05);
    assert!(v.distance(Vec3::new(1.0, -1.0, 2.0)) < 1e-5);
}

#[test]
fn tick_never_overshoots_any_axis() {
    for mode in [Mode::Tree, Mode::Scatter, Mode::Focus] {
        let mut registry = populated(9);
        let mut ctx = SceneContext::new(mode, 1);
        let camera = Camera::default();
        for step in 0..30 {
            let before: Vec<(Vec3, f32)> = registry
                .iter()
                .map(|p| (p.current().position, p.current().scale))
                .collect();
            tick::tick(&mut registry, &mut ctx, &camera, &smoothing(), step as f32 / 60.0);
            for (p, (pos, scale)) in registry.iter().zip(before) {
                let target = p.target();
                let now = p.current();
                for axis in 0..3 {
                    if (pos[axis] - target.position[axis]).abs() > 1e-3 {
                        assert!(
                            strictly_between(now.position[axis], pos[axis], target.position[axis]),
                            "{mode} {} axis {axis}: {} not between {} and {}",
                            p.id(),
                            now.position[axis],
                            pos[axis],
                            target.position[axis]
                        );
                    }
                }
                if (scale - target.scale).abs() > 1e-3 {
                    assert!(strictly_between(now.scale, scale, target.scale));
                }
            }
        }
    }
}

#[test]
fn frozen_time_converges_on_targets() {
    let mut registry = populated(4);
    let mut ctx = SceneContext::new(Mode::Scatter, 1);
    let camera = Camera::default();
    for _ in 0..400 {
        tick::tick(&mut registry, &mut ctx, &camera, &smoothing(), 0.0);
    }
    for p in registry.iter() {
        assert!(p.current().position.distance(p.target().position) < 1e-3);
        assert!((p.current().scale - p.base_scale()).abs() < 1e-3);
    }
}

#[test]
fn focused_photo_snaps_orientation_and_grows() {
    let mut registry = populated(5);
    let mut ctx = SceneContext::new(Mode::Focus, 1);
    let camera = Camera::default();
    tick::tick(&mut registry, &mut ctx, &camera, &smoothing(), 0.0);
    let id = ctx.focus().expect("a photo is selected");
    let frame = FocusFrame::new(&camera, &ctx.rotation());

    let p = registry.get(id).expect("focused particle exists");
    assert_eq!(p.kind(), ParticleKind::Photo);
    assert_eq!(p.current().rotation, frame.orientation);
    assert_eq!(p.target().scale, FOCUS_SCALE);
    assert!(p.current().scale > p.base_scale());
}

#[test]
fn spin_accumulator_advances_in_every_mode() {
    for mode in [Mode::Tree, Mode::Scatter] {
        let mut registry = populated(6);
        let mut ctx = SceneContext::new(mode, 1);
        let before: Vec<Vec3> = registry.iter().map(|p| p.spin()).collect();
        tick::tick(&mut registry, &mut ctx, &Camera::default(), &smoothing(), 0.0);
        for (p, spin) in registry.iter().zip(before) {
            let expected = spin + p.rotation_speed();
            let wrapped = Vec3::new(
                expected.x.rem_euclid(std::f32::consts::TAU),
                expected.y.rem_euclid(std::f32::consts::TAU),
                expected.z.rem_euclid(std::f32::consts::TAU),
            );
            assert!(p.spin().distance(wrapped) < 1e-4, "{mode} {}", p.id());
        }
    }
}

#[test]
fn scene_rotation_eases_toward_intent() {
    let mut registry = populated(7);
    let mut ctx = SceneContext::new(Mode::Tree, 1);
    ctx.set_rotation_intent(evergreen_core::RotationIntent::new(1.0, 0.0));
    let mut prev = 0.0;
    for _ in 0..50 {
        tick::tick(&mut registry, &mut ctx, &Camera::default(), &smoothing(), 0.0);
        let yaw = ctx.rotation().yaw;
        assert!(yaw > prev && yaw < std::f32::consts::PI);
        prev = yaw;
    }
}
