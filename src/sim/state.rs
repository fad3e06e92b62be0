//! Simulation state and core types
//!
//! Everything the tick, the collision engine and the input mapper mutate lives
//! in one owned `SimulationState`; nothing is global.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;
use crate::settings::{AimTuning, PhysicsTuning, Settings, TargetPlacement};

/// Whether the projectile is still on the cannon or already launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightMode {
    /// Pinned to the muzzle; angle and speed may change
    #[default]
    Aiming,
    /// Integrating under gravity and drag; angle and speed are frozen
    Flying,
}

/// The single projectile and its pre-launch aim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub pos: DVec2,
    /// World units per simulation-time unit
    pub vel: DVec2,
    pub launch_angle_deg: f64,
    /// Never negative
    pub launch_speed: f64,
    pub mode: FlightMode,
    origin: DVec2,
}

impl ProjectileState {
    /// A projectile resting on the cannon at `origin`
    pub fn new(origin: DVec2) -> Self {
        Self {
            pos: origin,
            vel: DVec2::ZERO,
            launch_angle_deg: 0.0,
            launch_speed: 0.0,
            mode: FlightMode::Aiming,
            origin,
        }
    }

    /// Cannon muzzle reference point
    #[inline]
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    #[inline]
    pub fn in_flight(&self) -> bool {
        self.mode == FlightMode::Flying
    }

    /// Overwrite angle and speed. Ignored while flying; returns whether applied.
    pub fn set_aim(&mut self, angle_deg: f64, speed: f64) -> bool {
        if self.in_flight() {
            return false;
        }
        self.launch_angle_deg = angle_deg;
        self.launch_speed = speed.max(0.0);
        true
    }

    /// Nudge launch speed, clamping at zero. Ignored while flying.
    pub fn adjust_speed(&mut self, delta: f64) -> bool {
        if self.in_flight() {
            return false;
        }
        self.launch_speed = (self.launch_speed + delta).max(0.0);
        true
    }

    /// Rotate the barrel. Ignored while flying.
    pub fn rotate_aim(&mut self, delta_deg: f64) -> bool {
        if self.in_flight() {
            return false;
        }
        self.launch_angle_deg += delta_deg;
        true
    }

    /// Fire along the current aim. A second launch while flying is a no-op.
    pub fn launch(&mut self) -> bool {
        if self.in_flight() {
            return false;
        }
        self.vel = polar_to_cartesian(self.launch_speed, self.launch_angle_deg);
        self.mode = FlightMode::Flying;
        true
    }

    /// Back onto the cannon with zeroed aim, from either mode
    pub fn reset(&mut self) {
        *self = Self::new(self.origin);
    }
}

/// A square target; only `destroyed` and `knockback_x` ever change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub center: DVec2,
    /// Collision radius
    pub radius: f64,
    /// One-shot: false -> true once, never back
    pub destroyed: bool,
    /// x-velocity handed over by the projectile when struck
    pub knockback_x: f64,
}

impl Target {
    pub fn new(id: u32, center: DVec2, radius: f64) -> Self {
        Self {
            id,
            center,
            radius,
            destroyed: false,
            knockback_x: 0.0,
        }
    }
}

impl From<&TargetPlacement> for Target {
    fn from(placement: &TargetPlacement) -> Self {
        Self::new(placement.id, placement.center, placement.radius)
    }
}

/// Fixed set of targets, kept sorted by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new(mut targets: Vec<Target>) -> Self {
        targets.sort_by_key(|t| t.id);
        Self { targets }
    }

    /// All targets in ascending id order, destroyed ones included
    pub fn iter(&self) -> impl Iterator<Item = &Target> + Clone {
        self.targets.iter()
    }

    /// Targets still in play, ascending id order. Restartable via `Clone`.
    pub fn active(&self) -> impl Iterator<Item = &Target> + Clone {
        self.targets.iter().filter(|t| !t.destroyed)
    }

    pub fn get(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of targets not yet destroyed
    pub fn remaining(&self) -> usize {
        self.active().count()
    }

    /// Destroy target `id`, recording the velocity it received.
    ///
    /// Returns true only on the false -> true transition; unknown ids and
    /// already-destroyed targets are left untouched.
    pub fn mark_destroyed(&mut self, id: u32, knockback_x: f64) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) if !target.destroyed => {
                target.destroyed = true;
                target.knockback_x = knockback_x;
                true
            }
            _ => false,
        }
    }

    /// Destroy the first live target, in id order, for which `hit` holds.
    ///
    /// Works on registry position rather than id, so a duplicated id can never
    /// shadow a live target behind an already-destroyed one.
    pub fn strike_first<F>(&mut self, hit: F, knockback_x: f64) -> Option<u32>
    where
        F: Fn(&Target) -> bool,
    {
        let target = self.targets.iter_mut().find(|t| !t.destroyed && hit(t))?;
        target.destroyed = true;
        target.knockback_x = knockback_x;
        Some(target.id)
    }
}

/// Axis-aligned permanent obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub min: DVec2,
    pub max: DVec2,
}

impl Barrier {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Box center (for drawing)
    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Something that happened during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    FloorBounce { vel_y: f64 },
    /// Index into `SimulationState::barriers`
    BarrierBounce { barrier: usize, vel_x: f64 },
    TargetHit { id: u32, knockback_x: f64 },
}

/// Complete simulation state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub projectile: ProjectileState,
    pub targets: TargetRegistry,
    pub barriers: Vec<Barrier>,
    pub physics: PhysicsTuning,
    pub aim: AimTuning,
    /// Steps applied since start
    pub steps: u64,
}

impl SimulationState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            projectile: ProjectileState::new(settings.cannon_origin),
            targets: TargetRegistry::new(settings.targets.iter().map(Target::from).collect()),
            barriers: settings.barriers.clone(),
            physics: settings.physics.clone(),
            aim: settings.aim.clone(),
            steps: 0,
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
