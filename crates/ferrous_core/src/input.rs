//! Pointer input and the screen → NDC mapping used before picking.

use glam::Vec2;

/// Mouse buttons the editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A pointer press in window pixel coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub button: MouseButton,
}

impl PointerEvent {
    /// Left-button press at `(x, y)`.
    pub fn left(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            button: MouseButton::Left,
        }
    }
}

/// Area of the window dedicated to the 3-D view, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Aspect ratio (width / height). Returns 1.0 if height is zero.
    #[inline]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Converts a pixel position into normalised device coordinates.
    ///
    /// `x` maps `[0, width]` onto `[-1, 1]`; `y` is flipped so that the top
    /// edge is `+1`.  Returns `None` while the viewport has no area.
    pub fn to_ndc(&self, x: f64, y: f64) -> Option<Vec2> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let nx = (x / self.width as f64) * 2.0 - 1.0;
        let ny = -(y / self.height as f64) * 2.0 + 1.0;
        Some(Vec2::new(nx as f32, ny as f32))
    }
}
