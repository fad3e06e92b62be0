//! Per-frame snapshot of everything the renderer draws

use glam::DVec2;

use crate::consts::OFFSCREEN;
use crate::sim::state::{Barrier, FlightMode, SimulationState};
use crate::view::Viewport;

use super::instance::colors;

/// Base width of the speed bar before any speed is added
pub const SPEED_BAR_BASE: f64 = 0.2;

/// Cannon barrel pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannonPose {
    pub pos: DVec2,
    pub angle_deg: f64,
}

/// A target as drawn; destroyed targets are parked off-screen and hidden
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSprite {
    pub id: u32,
    pub pos: DVec2,
    pub visible: bool,
}

/// Launch speed indicator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBar {
    /// Bar length in world units
    pub width: f64,
    /// Gradient start (left) and end (right) colors
    pub color_start: [f32; 4],
    pub color_end: [f32; 4],
}

impl SpeedBar {
    /// Bar grows by a third of the speed; colors shift from cyan-white toward
    /// orange as speed approaches 2
    pub fn for_speed(speed: f64) -> Self {
        let t = (speed / 2.0).clamp(0.0, 1.0) as f32;
        Self {
            width: SPEED_BAR_BASE + speed / 3.0,
            color_start: [1.0 - t, 1.0, 1.0, 1.0],
            color_end: [1.0, t, 0.0, 1.0],
        }
    }
}

/// Read-only view of one frame, captured after input and physics
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub projectile: DVec2,
    pub projectile_radius: f64,
    pub mode: FlightMode,
    pub cannon: CannonPose,
    pub targets: Vec<TargetSprite>,
    pub barriers: Vec<Barrier>,
    pub speed_bar: SpeedBar,
    /// `[left, right, bottom, top]`
    pub ortho: [f32; 4],
    /// Window size in pixels the ortho bounds are stretched over
    pub screen_size: DVec2,
    pub clear_color: [f32; 4],
}

impl FrameSnapshot {
    pub fn capture(state: &SimulationState, viewport: &Viewport) -> Self {
        let projectile = &state.projectile;
        let targets = state
            .targets
            .iter()
            .map(|t| TargetSprite {
                id: t.id,
                pos: if t.destroyed {
                    DVec2::new(OFFSCREEN.0, OFFSCREEN.1)
                } else {
                    t.center
                },
                visible: !t.destroyed,
            })
            .collect();

        Self {
            projectile: projectile.pos,
            projectile_radius: state.physics.projectile_radius,
            mode: projectile.mode,
            cannon: CannonPose {
                pos: projectile.origin(),
                angle_deg: projectile.launch_angle_deg,
            },
            targets,
            barriers: state.barriers.clone(),
            speed_bar: SpeedBar::for_speed(projectile.launch_speed),
            ortho: viewport.ortho_bounds(),
            screen_size: viewport.screen_size(),
            clear_color: colors::BACKGROUND,
        }
    }

    /// Targets still on screen
    pub fn visible_targets(&self) -> impl Iterator<Item = &TargetSprite> {
        self.targets.iter().filter(|t| t.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_bar_grows_with_speed() {
        let idle = SpeedBar::for_speed(0.0);
        assert!((idle.width - SPEED_BAR_BASE).abs() < 1e-12);
        assert_eq!(idle.color_start, [1.0, 1.0, 1.0, 1.0]);

        let fast = SpeedBar::for_speed(3.0);
        assert!((fast.width - 1.2).abs() < 1e-12);
        // Color ramp saturates
        assert_eq!(fast.color_end, [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_capture_hides_destroyed_targets() {
        let mut state = SimulationState::default();
        state.targets.mark_destroyed(2, 0.5);
        state.projectile.set_aim(30.0, 1.5);

        let frame = FrameSnapshot::capture(&state, &Viewport::default());
        assert_eq!(frame.targets.len(), 4);
        assert_eq!(frame.visible_targets().count(), 3);

        let hidden = frame.targets.iter().find(|t| t.id == 2).unwrap();
        assert!(!hidden.visible);
        assert_eq!(hidden.pos, DVec2::new(100.0, 100.0));

        assert_eq!(frame.cannon.angle_deg, 30.0);
        assert_eq!(frame.cannon.pos, DVec2::new(-3.0, -2.0));
        assert_eq!(frame.ortho, [-4.0, 4.0, -4.0, 4.0]);
        assert_eq!(frame.screen_size, DVec2::new(600.0, 600.0));
        assert_eq!(frame.clear_color, colors::BACKGROUND);
    }
}
