//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed step only (wall-clock time only decides *whether* to step)
//! - Stable iteration order (targets by ascending id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{barrier_contains, floor_contact, target_overlap};
pub use input::{Control, InputEvent, Intent, Key, MouseButton, apply_intent, map_event};
pub use state::{
    Barrier, FlightMode, ProjectileState, SimEvent, SimulationState, Target, TargetRegistry,
};
pub use tick::{FixedStepClock, step};
