//! Physics tuning and scenario layout
//!
//! Defaults reproduce the reference range: four targets, two barriers and a
//! floor at y = -2. A JSON file can override any subset of fields.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::Barrier;

/// Forces and collision coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Horizontal velocity multiplier applied every step
    pub air_resistance: f64,
    /// Subtracted from vertical velocity every step
    pub gravity: f64,
    /// Restitution for floor and barrier bounces
    pub bounce: f64,
    /// Fixed step length, both for wall-clock gating and position integration
    pub delay: f64,
    pub floor_y: f64,
    pub projectile_radius: f64,
    /// Projectile x-restitution after a target hit
    pub target_restitution: f64,
    /// A struck target receives the projectile's x-velocity divided by this
    pub momentum_divisor: f64,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            air_resistance: AIR_RESISTANCE,
            gravity: GRAVITY,
            bounce: BOUNCE,
            delay: SIM_DELAY,
            floor_y: FLOOR_Y,
            projectile_radius: PROJECTILE_RADIUS,
            target_restitution: TARGET_RESTITUTION,
            momentum_divisor: MOMENTUM_DIVISOR,
        }
    }
}

/// How input maps onto aim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    pub pointer_speed_factor: f64,
    pub speed_step_up: f64,
    pub speed_step_down: f64,
    pub rotate_step_deg: f64,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            pointer_speed_factor: POINTER_SPEED_FACTOR,
            speed_step_up: SPEED_STEP_UP,
            speed_step_down: SPEED_STEP_DOWN,
            rotate_step_deg: ROTATE_STEP_DEG,
        }
    }
}

/// Initial viewport and the window it is drawn into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    /// Ortho bounds start at ±half_extent on both axes
    pub half_extent: f64,
    /// Pan/zoom increment
    pub step: f64,
    pub screen_width: f64,
    pub screen_height: f64,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            half_extent: 4.0,
            step: 0.5,
            screen_width: 600.0,
            screen_height: 600.0,
        }
    }
}

/// Placement of one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPlacement {
    pub id: u32,
    pub center: DVec2,
    pub radius: f64,
}

/// Full configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsTuning,
    pub aim: AimTuning,
    pub view: ViewTuning,
    /// Cannon muzzle; the projectile rests here while aiming
    pub cannon_origin: DVec2,
    pub targets: Vec<TargetPlacement>,
    pub barriers: Vec<Barrier>,
}

impl Default for Settings {
    fn default() -> Self {
        let target = |id, x, y| TargetPlacement {
            id,
            center: DVec2::new(x, y),
            radius: TARGET_RADIUS,
        };
        Self {
            physics: PhysicsTuning::default(),
            aim: AimTuning::default(),
            view: ViewTuning::default(),
            cannon_origin: DVec2::new(CANNON_ORIGIN.0, CANNON_ORIGIN.1),
            targets: vec![
                target(1, 0.0, 0.0),
                target(2, 0.0, 2.0),
                target(3, -1.0, 3.0),
                target(4, 2.5, -1.0),
            ],
            barriers: vec![
                Barrier::new(DVec2::new(-1.3, -2.0), DVec2::new(0.9, 1.1)),
                Barrier::new(DVec2::new(-0.7, -1.1), DVec2::new(1.3, 0.1)),
            ],
        }
    }
}

/// Failure to read, parse or accept a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Well-formed JSON describing an unusable scenario
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Invalid(reason) => write!(f, "rejected settings: {}", reason),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject tuning or layouts the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(reason)) };
        let physics = &self.physics;
        if physics.delay <= 0.0 {
            return invalid(format!("physics.delay must be positive, got {}", physics.delay));
        }
        if physics.momentum_divisor == 0.0 {
            return invalid("physics.momentum_divisor must be non-zero".to_string());
        }
        if self.view.half_extent <= 0.0 {
            return invalid(format!("view.half_extent must be positive, got {}", self.view.half_extent));
        }
        if self.view.step <= 0.0 {
            return invalid(format!("view.step must be positive, got {}", self.view.step));
        }
        let mut ids = HashSet::new();
        for target in &self.targets {
            if !ids.insert(target.id) {
                return invalid(format!("duplicate target id {}", target.id));
            }
        }
        Ok(())
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} targets, {} barriers)",
            path.display(),
            settings.targets.len(),
            settings.barriers.len()
        );
        Ok(settings)
    }

    /// Read settings from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> String {
        // Settings holds only plain numbers and vectors, which always serialize.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
