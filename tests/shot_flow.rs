//! Whole shots driven through the public API: input events -> intents ->
//! fixed steps -> frame snapshots.

use cannon_range::Settings;
use cannon_range::renderer::{FrameSnapshot, RecordingRenderer, Renderer};
use cannon_range::sim::{
    Control, FlightMode, InputEvent, Key, SimEvent, SimulationState, apply_intent, map_event, step,
};
use cannon_range::view::Viewport;
use glam::DVec2;

struct Harness {
    state: SimulationState,
    viewport: Viewport,
    renderer: RecordingRenderer,
}

impl Harness {
    fn new() -> Self {
        let settings = Settings::default();
        Self {
            state: SimulationState::new(&settings),
            viewport: Viewport::new(&settings.view),
            renderer: RecordingRenderer::default(),
        }
    }

    fn send(&mut self, event: InputEvent) -> Control {
        for intent in map_event(&event, &self.viewport, &self.state.aim) {
            if apply_intent(&mut self.state, &mut self.viewport, intent) == Control::Quit {
                return Control::Quit;
            }
        }
        Control::Continue
    }

    /// Step `n` times, drawing after each step
    fn run(&mut self, n: usize) -> Vec<(u64, SimEvent)> {
        let mut log = Vec::new();
        for _ in 0..n {
            for event in step(&mut self.state) {
                log.push((self.state.steps, event));
            }
            self.renderer
                .draw(&FrameSnapshot::capture(&self.state, &self.viewport));
        }
        log
    }

    /// Aim at target 3 (-1, 3) with the pointer, then add speed for a flat-ish lob
    fn aim_at_target_three(&mut self) {
        self.send(InputEvent::PointerMoved { x: 225.0, y: 75.0 });
        for _ in 0..18 {
            self.send(InputEvent::KeyReleased(Key::F));
        }
    }
}

#[test]
fn pointer_aim_targets_world_point() {
    let mut h = Harness::new();
    h.send(InputEvent::PointerMoved { x: 225.0, y: 75.0 });
    let p = &h.state.projectile;
    // Offset (2, 5) from the cannon
    assert!((p.launch_angle_deg - 5f64.atan2(2.0).to_degrees()).abs() < 1e-9);
    assert!((p.launch_speed - 0.8 * 29f64.sqrt()).abs() < 1e-9);
}

#[test]
fn lob_destroys_target_three_and_rebounds() {
    let mut h = Harness::new();
    h.aim_at_target_three();
    h.send(InputEvent::KeyReleased(Key::Space));
    assert_eq!(h.state.projectile.mode, FlightMode::Flying);

    let events = h.run(40);
    let hits: Vec<_> = events
        .iter()
        .filter_map(|(at, e)| match e {
            SimEvent::TargetHit { id, knockback_x } => Some((*at, *id, *knockback_x)),
            _ => None,
        })
        .collect();

    assert_eq!(hits.len(), 1, "events: {:?}", events);
    let (at, id, knockback_x) = hits[0];
    assert_eq!(id, 3);
    assert!(knockback_x > 3.0);

    // The frame drawn right after the hit step hides target 3
    let frame = &h.renderer.frames[(at - 1) as usize];
    assert!(!frame.targets.iter().find(|t| t.id == 3).unwrap().visible);
    assert_eq!(frame.visible_targets().count(), 3);

    // Rebounded leftward
    assert!(h.state.projectile.vel.x < 0.0);
    assert_eq!(h.state.targets.remaining(), 3);
}

#[test]
fn reset_keeps_destroyed_targets_destroyed() {
    let mut h = Harness::new();
    h.aim_at_target_three();
    h.send(InputEvent::KeyReleased(Key::Space));
    h.run(40);
    assert!(h.state.targets.get(3).unwrap().destroyed);

    h.send(InputEvent::KeyReleased(Key::R));
    assert_eq!(h.state.projectile.mode, FlightMode::Aiming);
    assert_eq!(h.state.projectile.pos, DVec2::new(-3.0, -2.0));
    assert_eq!(h.state.projectile.vel, DVec2::ZERO);
    assert_eq!(h.state.projectile.launch_speed, 0.0);
    assert_eq!(h.state.projectile.launch_angle_deg, 0.0);

    // Same shot again sails through where target 3 used to be
    h.aim_at_target_three();
    h.send(InputEvent::KeyReleased(Key::Space));
    let events = h.run(40);
    assert!(
        !events
            .iter()
            .any(|(_, e)| matches!(e, SimEvent::TargetHit { .. }))
    );
    assert!(h.state.projectile.vel.x > 0.0);
}

#[test]
fn flat_shot_dips_below_floor_then_bounces() {
    let mut h = Harness::new();
    h.state.projectile.set_aim(0.0, 5.0);
    h.send(InputEvent::KeyReleased(Key::Space));

    h.run(1);
    // Gravity took it under the floor and nothing clamps it
    assert!(h.state.projectile.pos.y < -2.0);

    let events = h.run(1);
    assert!(matches!(events.as_slice(), [(2, SimEvent::FloorBounce { .. })]));
    assert!(h.state.projectile.vel.y > 0.0);
}

#[test]
fn step_events_keep_collision_order() {
    let mut h = Harness::new();
    h.state.projectile.set_aim(35.0, 6.0);
    h.send(InputEvent::KeyReleased(Key::Space));

    let rank = |e: &SimEvent| match e {
        SimEvent::FloorBounce { .. } => 0,
        SimEvent::BarrierBounce { .. } => 1,
        SimEvent::TargetHit { .. } => 2,
    };
    let events = h.run(600);
    for pair in events.windows(2) {
        let ((a_at, a), (b_at, b)) = (&pair[0], &pair[1]);
        if a_at == b_at {
            assert!(rank(a) <= rank(b), "{:?} before {:?}", a, b);
            assert!(!(rank(a) == 2 && rank(b) == 2), "two hits in one step");
        }
    }
}

#[test]
fn quit_stops_session() {
    let mut h = Harness::new();
    assert_eq!(h.send(InputEvent::KeyReleased(Key::Escape)), Control::Continue);
    assert_eq!(h.send(InputEvent::KeyPressed(Key::Q)), Control::Quit);
    assert_eq!(h.send(InputEvent::CloseRequested), Control::Quit);
}
