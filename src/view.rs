//! Orthographic viewport
//!
//! Purely presentational: pan and zoom change what the renderer shows and how
//! pointer pixels map into the world, never the physics.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::settings::ViewTuning;

/// Discrete view changes (arrow keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCommand {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
}

/// World-space rectangle shown in the window, plus the window size in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    step: f64,
    screen: DVec2,
}

impl Viewport {
    pub fn new(tuning: &ViewTuning) -> Self {
        let h = tuning.half_extent;
        Self {
            x_min: -h,
            x_max: h,
            y_min: -h,
            y_max: h,
            step: tuning.step,
            screen: DVec2::new(tuning.screen_width, tuning.screen_height),
        }
    }

    /// Move both low bounds by `d_min` and both high bounds by `d_max`
    fn shift(&mut self, d_min: f64, d_max: f64) {
        self.x_min += d_min;
        self.y_min += d_min;
        self.x_max += d_max;
        self.y_max += d_max;
    }

    /// Apply a pan/zoom step. A zoom that would collapse or invert the view
    /// is undone by pushing every bound back out one step, whatever the sign
    /// of the configured step.
    pub fn apply(&mut self, command: ViewCommand) {
        let s = self.step;
        match command {
            ViewCommand::ZoomIn => self.shift(s, -s),
            ViewCommand::ZoomOut => self.shift(-s, s),
            ViewCommand::PanLeft => self.shift(-s, -s),
            ViewCommand::PanRight => self.shift(s, s),
        }
        if self.y_max <= self.y_min {
            self.shift(-s.abs(), s.abs());
        }
        log::debug!(
            "View {:?}: x [{}, {}] y [{}, {}]",
            command,
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max
        );
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Window size in pixels
    pub fn screen_size(&self) -> DVec2 {
        self.screen
    }

    /// Convert a pointer position in window pixels (origin top-left, y down)
    /// into simulation coordinates. All screen-space knowledge lives here.
    pub fn screen_to_world(&self, px: f64, py: f64) -> DVec2 {
        let sx = if self.screen.x > 0.0 { px / self.screen.x } else { 0.0 };
        let sy = if self.screen.y > 0.0 { py / self.screen.y } else { 0.0 };
        DVec2::new(self.x_min + sx * self.width(), self.y_max - sy * self.height())
    }

    /// Ortho bounds as `[left, right, bottom, top]` for a projection matrix
    pub fn ortho_bounds(&self) -> [f32; 4] {
        [self.x_min as f32, self.x_max as f32, self.y_min as f32, self.y_max as f32]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewTuning::default())
    }
}
