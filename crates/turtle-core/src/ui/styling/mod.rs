//! Styling for the phone chrome and apps
//!
//! - [`colors`] - RGB565 color constants
//! - [`style`] - Style configuration and button variants

pub mod colors;
pub mod style;

pub use style::{ButtonVariant, Style};
