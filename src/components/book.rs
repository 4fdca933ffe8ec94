//! Components for the bookshelf scene.

use bevy::prelude::*;

/// Full range of lean around the vertical axis, in degrees (±half at the edges).
pub const TILT_RANGE_Y: f32 = 8.0;
/// Full range of lean around the horizontal axis, in degrees (±half at the edges).
pub const TILT_RANGE_X: f32 = 6.0;

/// A clickable book on the shelf.
#[derive(Component, Debug, Clone)]
pub struct BookSpine {
    /// Index into `ShelfLayout::books`.
    pub id: usize,
    /// Width and height in pixels, used for hit-testing.
    pub size: Vec2,
}

/// Root of the shelf; its children lean with the cursor.
#[derive(Component, Debug, Clone)]
pub struct ShelfFrame {
    pub size: Vec2,
}

/// Current and desired lean of the shelf, in degrees.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ShelfTilt {
    pub rx: f32,
    pub ry: f32,
    pub target_rx: f32,
    pub target_ry: f32,
}

impl ShelfTilt {
    /// Points the tilt at the cursor, given its normalized position over the
    /// frame ((0,0) top-left). `None` means the cursor left the frame.
    pub fn aim(&mut self, normalized: Option<Vec2>) {
        let (rx, ry) = normalized.map_or((0.0, 0.0), tilt_from_normalized);
        self.target_rx = rx;
        self.target_ry = ry;
    }

    /// Eases the current lean toward the target.
    pub fn settle(&mut self, dt: f32, stiffness: f32) {
        let t = (dt * stiffness).clamp(0.0, 1.0);
        self.rx += (self.target_rx - self.rx) * t;
        self.ry += (self.target_ry - self.ry) * t;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rx.to_radians(), self.ry.to_radians(), 0.0)
    }
}

/// Lean `(rx, ry)` in degrees for a cursor at `normalized` over the frame.
pub fn tilt_from_normalized(normalized: Vec2) -> (f32, f32) {
    let ry = (normalized.x - 0.5) * TILT_RANGE_Y;
    let rx = (0.5 - normalized.y) * TILT_RANGE_X;
    (rx, ry)
}

/// The "Pick me" tag hanging off the target book.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickMeLabel;
