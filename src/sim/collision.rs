//! Collision detection and response
//!
//! Three kinds of contact, all tested against the projectile *center*:
//! - targets: circle-vs-circle, strict `<` on the combined radius, one-shot
//! - barriers: point-in-box with strict edges, reflect x only, no guard
//! - floor: below `floor_y`, reflect y only, position is never clamped

use glam::DVec2;

use super::state::{Barrier, SimEvent, SimulationState, Target};

/// Does a projectile of `projectile_radius` at `pos` overlap `target`?
///
/// Touching exactly at the combined radius is not a hit.
#[inline]
pub fn target_overlap(pos: DVec2, projectile_radius: f64, target: &Target) -> bool {
    pos.distance(target.center) < projectile_radius + target.radius
}

/// Strict point-in-box test against a barrier
#[inline]
pub fn barrier_contains(barrier: &Barrier, pos: DVec2) -> bool {
    pos.x > barrier.min.x && pos.x < barrier.max.x && pos.y > barrier.min.y && pos.y < barrier.max.y
}

/// Is the projectile below the floor?
#[inline]
pub fn floor_contact(pos: DVec2, floor_y: f64) -> bool {
    pos.y < floor_y
}

/// Reflect y-velocity off the floor with restitution `bounce`
#[inline]
pub fn floor_response(vel: DVec2, bounce: f64) -> DVec2 {
    DVec2::new(vel.x, -vel.y * bounce)
}

/// Reflect x-velocity off a barrier with restitution `bounce`
#[inline]
pub fn barrier_response(vel: DVec2, bounce: f64) -> DVec2 {
    DVec2::new(-vel.x * bounce, vel.y)
}

/// Velocities after the projectile strikes a target: (projectile, target x)
///
/// Not momentum-conserving; the target's share is a fixed fraction of the
/// projectile's x-velocity and y is untouched.
#[inline]
pub fn target_response(vel: DVec2, restitution: f64, momentum_divisor: f64) -> (DVec2, f64) {
    let knockback_x = vel.x / momentum_divisor;
    (DVec2::new(-restitution * vel.x, vel.y), knockback_x)
}

/// Apply the floor bounce if the projectile is below the floor
pub fn resolve_floor(state: &mut SimulationState) -> Option<SimEvent> {
    let projectile = &mut state.projectile;
    if !floor_contact(projectile.pos, state.physics.floor_y) {
        return None;
    }
    projectile.vel = floor_response(projectile.vel, state.physics.bounce);
    log::debug!("Floor bounce at x={:.3}, vel.y -> {:.4}", projectile.pos.x, projectile.vel.y);
    Some(SimEvent::FloorBounce {
        vel_y: projectile.vel.y,
    })
}

/// Reflect off every barrier containing the projectile.
///
/// Each overlapping barrier reflects independently, so two overlapping boxes
/// in the same step cancel each other's sign flip.
pub fn resolve_barriers(state: &mut SimulationState, events: &mut Vec<SimEvent>) {
    let projectile = &mut state.projectile;
    for (index, barrier) in state.barriers.iter().enumerate() {
        if barrier_contains(barrier, projectile.pos) {
            projectile.vel = barrier_response(projectile.vel, state.physics.bounce);
            log::debug!("Barrier {} bounce, vel.x -> {:.4}", index, projectile.vel.x);
            events.push(SimEvent::BarrierBounce {
                barrier: index,
                vel_x: projectile.vel.x,
            });
        }
    }
}

/// Scan live targets in ascending id order and resolve the first overlap.
///
/// Only one target can be struck per step: the scan stops at the first
/// newly destroyed target even if others overlap too.
pub fn resolve_targets(state: &mut SimulationState) -> Option<SimEvent> {
    let pos = state.projectile.pos;
    let radius = state.physics.projectile_radius;
    let (vel, knockback_x) = target_response(
        state.projectile.vel,
        state.physics.target_restitution,
        state.physics.momentum_divisor,
    );
    let id = state
        .targets
        .strike_first(|t| target_overlap(pos, radius, t), knockback_x)?;
    state.projectile.vel = vel;
    log::info!(
        "Target {} hit (knockback {:.4}), {} remaining",
        id,
        knockback_x,
        state.targets.remaining()
    );
    Some(SimEvent::TargetHit { id, knockback_x })
}
