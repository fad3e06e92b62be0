//! Cannon Range entry point
//!
//! Headless native driver: replays a scripted input session through the
//! intent mapper and runs the cooperative draw/poll/step loop in real time.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use cannon_range::Settings;
use cannon_range::renderer::{FrameSnapshot, Renderer, build_instances};
use cannon_range::sim::{
    Control, FixedStepClock, InputEvent, Key, MouseButton, SimulationState, apply_intent,
    map_event, step,
};
use cannon_range::view::Viewport;

/// Hard stop for the headless session (seconds)
const SESSION_LIMIT: f64 = 8.0;

/// Logs a summary of every 50th frame
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if self.frames % 50 == 0 {
            log::debug!(
                "Frame {}: projectile ({:.3}, {:.3}) {:?}, {} targets visible, {} instances",
                self.frames,
                frame.projectile.x,
                frame.projectile.y,
                frame.mode,
                frame.visible_targets().count(),
                build_instances(frame).len()
            );
        }
    }
}

/// Scripted input: (seconds since start, event)
fn session_script() -> Vec<(f64, InputEvent)> {
    vec![
        (0.05, InputEvent::PointerMoved { x: 450.0, y: 150.0 }),
        (0.10, InputEvent::KeyReleased(Key::S)),
        (0.15, InputEvent::KeyReleased(Key::Right)),
        (0.20, InputEvent::MouseReleased(MouseButton::Left)),
        // Ignored: already flying
        (0.25, InputEvent::KeyReleased(Key::F)),
        (4.00, InputEvent::KeyReleased(Key::R)),
        (4.05, InputEvent::PointerMoved { x: 330.0, y: 120.0 }),
        (4.10, InputEvent::KeyReleased(Key::Space)),
        (SESSION_LIMIT, InputEvent::KeyPressed(Key::Escape)),
    ]
}

fn main() {
    env_logger::init();
    log::info!("Cannon Range (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let mut state = SimulationState::new(&settings);
    let mut viewport = Viewport::new(&settings.view);
    let mut renderer = LogRenderer::default();

    let start = Instant::now();
    let now = || start.elapsed().as_secs_f64();
    let mut clock = FixedStepClock::new(settings.physics.delay, now());
    let mut script = session_script().into_iter().peekable();

    'run: loop {
        renderer.draw(&FrameSnapshot::capture(&state, &viewport));

        // Poll input
        while let Some((_, event)) = script.next_if(|(at, _)| *at <= now()) {
            for intent in map_event(&event, &viewport, &state.aim) {
                if apply_intent(&mut state, &mut viewport, intent) == Control::Quit {
                    break 'run;
                }
            }
        }

        if clock.poll(now()) {
            for event in step(&mut state) {
                log::debug!("{:?}", event);
            }
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    let destroyed: Vec<u32> = state
        .targets
        .iter()
        .filter(|t| t.destroyed)
        .map(|t| t.id)
        .collect();
    log::info!(
        "Session over after {} steps and {} frames; destroyed targets {:?}, {} remaining",
        state.steps,
        renderer.frames,
        destroyed,
        state.targets.remaining()
    );
}
