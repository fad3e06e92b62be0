//! GPU instance records for a unit-quad / unit-circle renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::frame::FrameSnapshot;

/// Which unit mesh an instance stretches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mesh {
    Quad,
    Circle,
}

/// One transformed mesh instance
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub translate: Vec2,
    pub scale: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    pub color: [f32; 4],
}

impl Instance {
    pub fn new(translate: Vec2, scale: Vec2, rotation: f32, color: [f32; 4]) -> Self {
        Self {
            translate,
            scale,
            rotation,
            color,
        }
    }
}

/// Colors for scene elements
pub mod colors {
    pub const PROJECTILE: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const CANNON: [f32; 4] = [0.15, 0.15, 0.15, 1.0];
    pub const BARREL: [f32; 4] = [0.35, 0.35, 0.35, 1.0];
    pub const TARGET: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BARRIER: [f32; 4] = [0.55, 0.35, 0.2, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
}

/// Side of the square target mesh
pub const TARGET_SIZE: f32 = 0.4;
/// Cannon base radius and barrel dimensions
pub const CANNON_RADIUS: f32 = 0.3;
pub const BARREL_SIZE: Vec2 = Vec2::new(0.6, 0.12);
/// Speed bar placement (left edge, vertical center) and thickness
pub const SPEED_BAR_ANCHOR: Vec2 = Vec2::new(-3.5, -3.75);
pub const SPEED_BAR_HEIGHT: f32 = 0.5;

/// Build instances for one frame, grouped by mesh, in draw order.
///
/// Hidden targets are skipped entirely.
pub fn build_instances(frame: &FrameSnapshot) -> Vec<(Mesh, Instance)> {
    let mut out = Vec::with_capacity(frame.targets.len() + frame.barriers.len() + 5);

    for target in frame.visible_targets() {
        out.push((
            Mesh::Quad,
            Instance::new(
                target.pos.as_vec2(),
                Vec2::splat(TARGET_SIZE),
                0.0,
                colors::TARGET,
            ),
        ));
    }

    for barrier in &frame.barriers {
        out.push((
            Mesh::Quad,
            Instance::new(
                barrier.center().as_vec2(),
                barrier.size().as_vec2(),
                0.0,
                colors::BARRIER,
            ),
        ));
    }

    // Barrel pivots on the cannon; the quad is offset half its length along the aim
    let angle = (frame.cannon.angle_deg as f32).to_radians();
    let cannon = frame.cannon.pos.as_vec2();
    let barrel_center = cannon + Vec2::from_angle(angle) * (BARREL_SIZE.x / 2.0);
    out.push((
        Mesh::Quad,
        Instance::new(barrel_center, BARREL_SIZE, angle, colors::BARREL),
    ));
    out.push((
        Mesh::Circle,
        Instance::new(cannon, Vec2::splat(CANNON_RADIUS), 0.0, colors::CANNON),
    ));

    out.push((
        Mesh::Circle,
        Instance::new(
            frame.projectile.as_vec2(),
            Vec2::splat(frame.projectile_radius as f32),
            0.0,
            colors::PROJECTILE,
        ),
    ));

    // Speed bar: two halves carry the gradient ends
    let bar = frame.speed_bar;
    let half = bar.width as f32 / 2.0;
    let left = SPEED_BAR_ANCHOR + Vec2::new(half / 2.0, 0.0);
    let right = SPEED_BAR_ANCHOR + Vec2::new(half * 1.5, 0.0);
    let size = Vec2::new(half, SPEED_BAR_HEIGHT);
    out.push((Mesh::Quad, Instance::new(left, size, 0.0, bar.color_start)));
    out.push((Mesh::Quad, Instance::new(right, size, 0.0, bar.color_end)));

    out
}

/// Raw bytes for upload, one buffer per mesh
pub fn instance_bytes(instances: &[(Mesh, Instance)], mesh: Mesh) -> Vec<u8> {
    let filtered: Vec<Instance> = instances
        .iter()
        .filter(|(m, _)| *m == mesh)
        .map(|(_, i)| *i)
        .collect();
    bytemuck::cast_slice(&filtered).to_vec()
}
