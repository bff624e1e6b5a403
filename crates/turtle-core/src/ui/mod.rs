// src/ui/mod.rs
//! Phone UI toolkit
//!
//! This module provides:
//! - Geometry and raw input types in a bottom-left-origin space
//! - A [`Canvas`] that draws that geometry onto any embedded-graphics target
//! - Styled components (buttons, text helpers)

pub mod canvas;
pub mod components;
pub mod core;
pub mod styling;

// Re-export commonly used items
pub use canvas::Canvas;
pub use components::{Anchor, Button, TextSize};
pub use self::core::{InputEvent, Key, MouseButton, Rect, ScreenPoint};
pub use styling::{ButtonVariant, Style};
