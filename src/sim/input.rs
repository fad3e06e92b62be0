//! Input-to-intent mapping
//!
//! Raw, edge-triggered input events become `Intent`s, and intents mutate the
//! simulation. Aim-related intents only take effect while aiming.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::SimulationState;
use crate::aim_from_offset;
use crate::settings::AimTuning;
use crate::view::{ViewCommand, Viewport};

/// Keys the demo reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    F,
    S,
    Space,
    R,
    Q,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// One physical action from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer position in window pixels (origin top-left)
    PointerMoved { x: f64, y: f64 },
    KeyPressed(Key),
    KeyReleased(Key),
    MouseReleased(MouseButton),
    CloseRequested,
}

/// What the user means, in simulation terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Aim at a point in simulation coordinates
    Aim(DVec2),
    AdjustSpeed(f64),
    /// Rotate the barrel by this many degrees
    RotateAim(f64),
    Launch,
    Reset,
    View(ViewCommand),
    Quit,
}

/// Whether the main loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Translate one input event into intents.
///
/// Gameplay keys act on release, quit acts on press. Left/right arrows both
/// pan the view and rotate the barrel.
pub fn map_event(event: &InputEvent, viewport: &Viewport, aim: &AimTuning) -> Vec<Intent> {
    match *event {
        InputEvent::PointerMoved { x, y } => vec![Intent::Aim(viewport.screen_to_world(x, y))],
        InputEvent::KeyReleased(key) => match key {
            Key::Up => vec![Intent::View(ViewCommand::ZoomIn)],
            Key::Down => vec![Intent::View(ViewCommand::ZoomOut)],
            Key::Left => vec![
                Intent::View(ViewCommand::PanLeft),
                Intent::RotateAim(aim.rotate_step_deg),
            ],
            Key::Right => vec![
                Intent::View(ViewCommand::PanRight),
                Intent::RotateAim(-aim.rotate_step_deg),
            ],
            Key::F => vec![Intent::AdjustSpeed(aim.speed_step_up)],
            Key::S => vec![Intent::AdjustSpeed(-aim.speed_step_down)],
            Key::Space => vec![Intent::Launch],
            Key::R => vec![Intent::Reset],
            Key::Q | Key::Escape => Vec::new(),
        },
        InputEvent::KeyPressed(Key::Escape | Key::Q) => vec![Intent::Quit],
        InputEvent::KeyPressed(_) => Vec::new(),
        InputEvent::MouseReleased(MouseButton::Left) => vec![Intent::Launch],
        InputEvent::MouseReleased(MouseButton::Right) => Vec::new(),
        InputEvent::CloseRequested => vec![Intent::Quit],
    }
}

/// Apply one intent to the simulation and viewport
pub fn apply_intent(state: &mut SimulationState, viewport: &mut Viewport, intent: Intent) -> Control {
    let projectile = &mut state.projectile;
    match intent {
        Intent::Aim(target) => {
            let (angle, distance) = aim_from_offset(target - projectile.origin());
            if projectile.set_aim(angle, distance * state.aim.pointer_speed_factor) {
                log::trace!("Aim {:.1} deg, speed {:.3}", angle, projectile.launch_speed);
            }
        }
        Intent::AdjustSpeed(delta) => {
            if projectile.adjust_speed(delta) {
                log::debug!("Launch speed {:.3}", projectile.launch_speed);
            }
        }
        Intent::RotateAim(delta) => {
            if projectile.rotate_aim(delta) {
                log::debug!("Launch angle {:.1} deg", projectile.launch_angle_deg);
            }
        }
        Intent::Launch => {
            if projectile.launch() {
                log::info!(
                    "Launched at {:.1} deg, speed {:.3}",
                    projectile.launch_angle_deg,
                    projectile.launch_speed
                );
            }
        }
        Intent::Reset => {
            projectile.reset();
            log::info!("Projectile reset ({} targets remaining)", state.targets.remaining());
        }
        Intent::View(command) => viewport.apply(command),
        Intent::Quit => return Control::Quit,
    }
    Control::Continue
}
