//! Reusable UI components

pub mod button;
pub mod text;

pub use button::Button;
pub use text::{Anchor, HAnchor, TextSize, VAnchor, truncate_label, wrap_text};
