// src/ui/core.rs
//! Core geometry and input types shared by the phone and its apps.
//!
//! All coordinates are `f32` screen units in a bottom-left-origin space:
//! `y` grows upwards. [`Canvas`](super::canvas::Canvas) flips them into
//! embedded-graphics' top-left space at draw time.

/// A point on the host window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its center point.
    pub fn centered(center: ScreenPoint, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        self.left() <= point.x
            && point.x <= self.right()
            && self.bottom() <= point.y
            && point.y <= self.top()
    }
}

/// Pointer buttons the host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Non-text keys the phone cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Enter,
    Other,
}

/// Raw input forwarded by the host.
///
/// Resize and tick are not events; the host calls
/// [`Phone::resize`](crate::phone::Phone::resize) and
/// [`Phone::update`](crate::phone::Phone::update) directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer button pressed at a point
    Press {
        point: ScreenPoint,
        button: MouseButton,
    },
    /// Pointer button released at a point
    Release {
        point: ScreenPoint,
        button: MouseButton,
    },
    /// Pointer moved; `dx`/`dy` are deltas in screen units
    Motion { point: ScreenPoint, dx: f32, dy: f32 },
    /// Non-text key pressed
    Key(Key),
    /// Printable character typed
    Text(char),
}
