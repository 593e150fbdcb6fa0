use glam::{Affine3A, Quat, Vec3};
use snowpack_core::types::PaintMode;

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub resolution: u32,
    pub actor_count: u32,
    pub paint_mode: PaintMode,
}

/// Return the standard suite of benchmark scenes (256^2 to 2048^2 cells,
/// 4 to 64 four-wheeled actors).
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "256-4",
            resolution: 256,
            actor_count: 4,
            paint_mode: PaintMode::Direct,
        },
        SceneConfig {
            name: "512-16",
            resolution: 512,
            actor_count: 16,
            paint_mode: PaintMode::Direct,
        },
        SceneConfig {
            name: "1024-32",
            resolution: 1024,
            actor_count: 32,
            paint_mode: PaintMode::Direct,
        },
        SceneConfig {
            name: "1024-32-deferred",
            resolution: 1024,
            actor_count: 32,
            paint_mode: PaintMode::Deferred,
        },
        SceneConfig {
            name: "2048-64",
            resolution: 2048,
            actor_count: 64,
            paint_mode: PaintMode::Direct,
        },
    ]
}

/// Wheel offsets for a car-sized actor, in its local frame.
pub fn wheel_offsets() -> [Vec3; 4] {
    [
        Vec3::new(-0.8, 1.3, 0.0),
        Vec3::new(0.8, 1.3, 0.0),
        Vec3::new(-0.8, -1.3, 0.0),
        Vec3::new(0.8, -1.3, 0.0),
    ]
}

/// Deterministic pose for an actor driving circles around the arena.
/// Each actor gets its own ring radius and phase so tracks cross.
pub fn actor_pose(actor_index: u32, tick: u32, world_extent: f32, dt: f32) -> (Affine3A, Vec3) {
    const SPEED: f32 = 15.0;
    let ring = world_extent * (0.1 + 0.35 * ((actor_index * 7919) % 97) as f32 / 97.0);
    let phase = actor_index as f32 * 0.618 * std::f32::consts::TAU;
    let angle = phase + SPEED * dt * tick as f32 / ring;
    let position = Vec3::new(ring * angle.cos(), ring * angle.sin(), 0.0);
    let heading = angle + std::f32::consts::FRAC_PI_2;
    let velocity = Vec3::new(heading.cos(), heading.sin(), 0.0) * SPEED;
    // Wheel offsets point along local +Y; rotate so +Y follows the heading
    let rotation = Quat::from_rotation_z(heading - std::f32::consts::FRAC_PI_2);
    (Affine3A::from_rotation_translation(rotation, position), velocity)
}
