// src/ui/components/text.rs
//! Text sizing and anchoring for the mono fonts the canvas draws with

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_8X13, FONT_10X20};
use embedded_graphics::text::{Alignment, Baseline};

/// Text size variants
///
/// Point sizes requested by the layout code (already multiplied by the phone
/// scale factor) are bucketed into three embedded-graphics fonts:
/// - `Small`: 6x10 font, below 13pt
/// - `Medium`: 8x13 font, below 20pt
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn from_points(points: f32) -> Self {
        if points < 13.0 {
            TextSize::Small
        } else if points < 20.0 {
            TextSize::Medium
        } else {
            TextSize::Large
        }
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_6X10,
            TextSize::Medium => &FONT_8X13,
            TextSize::Large => &FONT_10X20,
        }
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        let font = self.font();
        text.chars().count() as u32 * (font.character_size.width + font.character_spacing)
    }
}

/// Horizontal anchor of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAnchor {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAnchor {
    Top,
    Middle,
    Bottom,
}

/// Where a text position sits on the rendered text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub horizontal: HAnchor,
    pub vertical: VAnchor,
}

impl Anchor {
    pub const TOP_LEFT: Self = Self::new(HAnchor::Left, VAnchor::Top);
    pub const TOP_CENTER: Self = Self::new(HAnchor::Center, VAnchor::Top);
    pub const TOP_RIGHT: Self = Self::new(HAnchor::Right, VAnchor::Top);
    pub const MIDDLE_LEFT: Self = Self::new(HAnchor::Left, VAnchor::Middle);
    pub const CENTER: Self = Self::new(HAnchor::Center, VAnchor::Middle);

    pub const fn new(horizontal: HAnchor, vertical: VAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub(crate) fn alignment(&self) -> Alignment {
        match self.horizontal {
            HAnchor::Left => Alignment::Left,
            HAnchor::Center => Alignment::Center,
            HAnchor::Right => Alignment::Right,
        }
    }

    pub(crate) fn baseline(&self) -> Baseline {
        match self.vertical {
            VAnchor::Top => Baseline::Top,
            VAnchor::Middle => Baseline::Middle,
            VAnchor::Bottom => Baseline::Bottom,
        }
    }
}

/// Shorten `label` to what fits in `available_width` at `points`, using the
/// half-em character estimate, and mark the cut with "...".
pub fn truncate_label(label: &str, available_width: f32, points: f32) -> String {
    let max_chars = (available_width / (points * 0.5)).max(0.0) as usize;
    if label.chars().count() > max_chars {
        let keep = max_chars.saturating_sub(3);
        let mut out: String = label.chars().take(keep).collect();
        out.push_str("...");
        out
    } else {
        label.to_string()
    }
}

/// Greedy word wrap of `text` into lines that fit `available_width` at
/// `points`, with the same half-em estimate as [`truncate_label`]. Words
/// longer than a line get a line of their own.
pub fn wrap_text(text: &str, available_width: f32, points: f32) -> Vec<String> {
    let max_chars = ((available_width / (points * 0.5)).max(1.0)) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = line.chars().count() + usize::from(!line.is_empty()) + word.chars().count();
        if !line.is_empty() && needed > max_chars {
            lines.push(core::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
