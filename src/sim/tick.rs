//! Fixed step integration
//!
//! One step, in order: drag, gravity, floor, barriers, first target, then
//! position. Collisions see the damped velocity and the position update uses
//! whatever velocity the collisions left behind (semi-implicit Euler).

use super::collision::{resolve_barriers, resolve_floor, resolve_targets};
use super::state::{SimEvent, SimulationState};

/// Advance the simulation by one fixed step of `state.physics.delay`.
///
/// Does nothing while the projectile is aiming. Returns what happened.
pub fn step(state: &mut SimulationState) -> Vec<SimEvent> {
    let mut events = Vec::new();
    if !state.projectile.in_flight() {
        return events;
    }

    let physics = &state.physics;
    let projectile = &mut state.projectile;
    projectile.vel.x *= physics.air_resistance;
    projectile.vel.y -= physics.gravity;

    events.extend(resolve_floor(state));
    resolve_barriers(state, &mut events);
    events.extend(resolve_targets(state));

    let delay = state.physics.delay;
    let projectile = &mut state.projectile;
    projectile.pos += projectile.vel * delay;
    state.steps += 1;

    events
}

/// Wall-clock gate for `step`
///
/// A step is due once at least `delay` seconds have passed since the last
/// one. At most one step per poll; a slow frame delays physics rather than
/// triggering catch-up steps.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    delay: f64,
    last_update: f64,
}

impl FixedStepClock {
    /// Start the clock at wall time `now` (seconds)
    pub fn new(delay: f64, now: f64) -> Self {
        Self {
            delay,
            last_update: now,
        }
    }

    /// Whether a step is due at `now`; if so, records `now` as the last update
    pub fn poll(&mut self, now: f64) -> bool {
        if now - self.last_update >= self.delay {
            self.last_update = now;
            true
        } else {
            false
        }
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FlightMode;
    use glam::DVec2;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_step_integration_reference() {
        let mut state = SimulationState::default();
        state.projectile.pos = DVec2::new(-3.0, -2.0);
        state.projectile.vel = DVec2::new(5.0, 5.0);
        state.projectile.mode = FlightMode::Flying;

        let events = step(&mut state);
        assert!(events.is_empty());
        assert_close(state.projectile.vel.x, 4.99);
        assert_close(state.projectile.vel.y, 4.98);
        assert_close(state.projectile.pos.x, -3.0 + 0.0499);
        assert_close(state.projectile.pos.y, -2.0 + 0.0498);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_step_idle_while_aiming() {
        let mut state = SimulationState::default();
        state.projectile.set_aim(45.0, 5.0);
        let before = state.projectile.clone();
        assert!(step(&mut state).is_empty());
        assert_eq!(state.projectile, before);
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_floor_bounce_inside_step() {
        let mut state = SimulationState::default();
        state.projectile.pos = DVec2::new(-3.0, -2.1);
        state.projectile.vel = DVec2::new(0.0, -0.98);
        state.projectile.mode = FlightMode::Flying;

        let events = step(&mut state);
        // Gravity first (-1.0), then bounce
        assert_close(state.projectile.vel.y, 0.7);
        assert!(matches!(events.as_slice(), [SimEvent::FloorBounce { .. }]));
        assert_close(state.projectile.pos.y, -2.1 + 0.007);
    }

    #[test]
    fn test_target_hit_moves_with_rebound_velocity() {
        let mut state = SimulationState::default();
        state.projectile.pos = DVec2::new(-0.2, 2.0);
        state.projectile.vel = DVec2::new(3.0, 0.02);
        state.projectile.mode = FlightMode::Flying;

        let events = step(&mut state);
        assert_eq!(events.len(), 1);
        assert!(state.targets.get(2).unwrap().destroyed);
        // Integrated with the rebounded x-velocity
        assert_close(state.projectile.vel.x, -0.8 * 3.0 * 0.998);
        assert_close(state.projectile.pos.x, -0.2 + state.projectile.vel.x * 0.01);
    }

    #[test]
    fn test_clock_gates_on_delay() {
        let mut clock = FixedStepClock::new(0.01, 10.0);
        assert!(!clock.poll(10.005));
        assert!(clock.poll(10.0101));
        assert_eq!(clock.last_update(), 10.0101);
        // No catch-up after a long frame
        assert!(clock.poll(11.0));
        assert!(!clock.poll(11.0));
    }
}
