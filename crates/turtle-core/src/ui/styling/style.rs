//! Style configuration for phone components
//!
//! Provides the `Style` struct and the button variants used by the app
//! keypads.

use embedded_graphics::pixelcolor::Rgb565;

use super::colors::{BLACK, CALC_DIGIT, CALC_FUNCTION, WHITE};

// ============================================================================
// Style
// ============================================================================

/// Visual style of a filled component
///
/// Use the builder methods to construct styles incrementally:
///
/// ```ignore
/// let style = Style::new()
///     .with_background(CALC_DIGIT)
///     .with_foreground(WHITE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// Background fill color (if any)
    pub background_color: Option<Rgb565>,

    /// Foreground/text color
    pub foreground_color: Rgb565,

    /// Corner radius in unscaled units
    pub corner_radius: f32,
}

impl Default for Style {
    /// White text, no background, square corners
    fn default() -> Self {
        Self {
            background_color: None,
            foreground_color: WHITE,
            corner_radius: 0.0,
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Rgb565) -> Self {
        self.foreground_color = color;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

// ============================================================================
// Button Variants
// ============================================================================

/// Keypad button variants
///
/// ```ignore
/// let style = ButtonVariant::Operator.to_style();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Light key with dark text: arithmetic operators and `=`
    Operator,

    /// Mid-gray key: clear, sign and percent
    Function,

    /// Dark key: digits and the decimal point
    Digit,
}

impl ButtonVariant {
    pub fn to_style(&self) -> Style {
        let style = Style::new().with_corner_radius(15.0);
        match self {
            ButtonVariant::Operator => style.with_background(WHITE).with_foreground(BLACK),
            ButtonVariant::Function => style.with_background(CALC_FUNCTION),
            ButtonVariant::Digit => style.with_background(CALC_DIGIT),
        }
    }
}
