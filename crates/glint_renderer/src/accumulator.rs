//! Progressive accumulation across frames.
//!
//! Frame 0 displays the gamma-corrected estimate as is. Every later frame `N`
//! blends its gamma-corrected estimate with the previously displayed value,
//! which counts for `N - 1` frames:
//!
//! ```text
//! displayed = (sqrt(estimate) + previous * (N - 1)) / (1 + (N - 1))
//! ```
//!
//! Resetting the render chain sends the counter back to 0 and the next frame
//! overwrites whatever was displayed.

use glint_core::Color;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Blend one pixel's new estimate into the displayed value for `frame_index`.
pub fn blend(estimate: Color, previous: Color, frame_index: u32) -> Color {
    let corrected = Color::new(
        linear_to_gamma(estimate.x),
        linear_to_gamma(estimate.y),
        linear_to_gamma(estimate.z),
    );

    if frame_index == 0 {
        return corrected;
    }

    let weight = (frame_index - 1) as f32;
    (corrected + previous * weight) / (1.0 + weight)
}

/// Frame counter of the render chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator {
    frame_index: u32,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the frame about to be blended.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Blend a pixel for the current frame.
    pub fn blend(&self, estimate: Color, previous: Color) -> Color {
        blend(estimate, previous, self.frame_index)
    }

    /// Mark the current frame as displayed.
    pub fn advance(&mut self) {
        self.frame_index = self.frame_index.saturating_add(1);
    }

    /// Discard convergence; the next frame starts a new chain.
    pub fn reset(&mut self) {
        self.frame_index = 0;
    }
}
