//! Renderer seam
//!
//! The simulation never draws. Each frame it captures a `FrameSnapshot`, and
//! whatever implements `Renderer` turns that into pixels.

pub mod frame;
pub mod instance;

pub use frame::{CannonPose, FrameSnapshot, SpeedBar, TargetSprite};
pub use instance::{Instance, Mesh, build_instances, instance_bytes};

/// Anything that can present a frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Renderer that only records frames; useful headless
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<FrameSnapshot>,
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        self.frames.push(frame.clone());
    }
}
