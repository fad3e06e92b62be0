//! Cannon Range - a 2D projectile physics demo
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectile state, collisions, fixed step, input intents)
//! - `view`: Orthographic viewport and screen-to-world mapping
//! - `renderer`: Per-frame snapshot handed to an external renderer
//! - `settings`: Data-driven physics tuning and scenario layout

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Reference scenario constants
pub mod consts {
    /// Fixed simulation step (simulation-time units per step)
    pub const SIM_DELAY: f64 = 0.01;

    /// Horizontal velocity retained per step
    pub const AIR_RESISTANCE: f64 = 0.998;
    /// Vertical velocity removed per step
    pub const GRAVITY: f64 = 0.02;
    /// Restitution for floor and barrier bounces
    pub const BOUNCE: f64 = 0.7;
    /// Below this height the floor reflects the projectile
    pub const FLOOR_Y: f64 = -2.0;

    /// Projectile collision radius
    pub const PROJECTILE_RADIUS: f64 = 0.1;
    /// Target collision radius (circumscribes the 0.4 x 0.4 square)
    pub const TARGET_RADIUS: f64 = 0.28;
    /// x-restitution of the projectile after striking a target
    pub const TARGET_RESTITUTION: f64 = 0.8;
    /// A struck target takes the projectile's x-velocity divided by this
    /// (area ratio circle 0.35 vs rect 0.16, rounded to a third)
    pub const MOMENTUM_DIVISOR: f64 = 3.0;

    /// Cannon muzzle reference point
    pub const CANNON_ORIGIN: (f64, f64) = (-3.0, -2.0);

    /// Launch speed per world unit of pointer distance from the cannon
    pub const POINTER_SPEED_FACTOR: f64 = 0.8;
    pub const SPEED_STEP_UP: f64 = 1.5;
    pub const SPEED_STEP_DOWN: f64 = 1.0;
    /// Degrees per rotate-aim key press
    pub const ROTATE_STEP_DEG: f64 = 5.0;

    /// Where destroyed targets are parked for drawing
    pub const OFFSCREEN: (f64, f64) = (100.0, 100.0);
}

/// Convert polar (r, theta in degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta_deg: f64) -> DVec2 {
    let theta = theta_deg.to_radians();
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Aim angle (degrees) and distance for an offset from the cannon origin.
///
/// A zero offset yields `(0.0, 0.0)` rather than an undefined angle.
#[inline]
pub fn aim_from_offset(offset: DVec2) -> (f64, f64) {
    let distance = offset.length();
    if distance == 0.0 || !distance.is_finite() {
        return (0.0, 0.0);
    }
    (offset.y.atan2(offset.x).to_degrees(), distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_cartesian_quarter_turn() {
        let v = polar_to_cartesian(2.0, 90.0);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_aim_from_zero_offset() {
        assert_eq!(aim_from_offset(DVec2::ZERO), (0.0, 0.0));
    }

    #[test]
    fn test_aim_from_offset_diagonal() {
        let (angle, distance) = aim_from_offset(DVec2::new(1.0, 1.0));
        assert!((angle - 45.0).abs() < 1e-9);
        assert!((distance - 2f64.sqrt()).abs() < 1e-12);
    }
}
