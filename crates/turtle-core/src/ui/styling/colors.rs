//! Color definitions for the phone chrome and its apps
//!
//! Colors are RGB565, written as 8-bit RGB shifted down:
//! R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for secondary text
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(150 >> 3, 150 >> 2, 150 >> 3);

/// Medium gray - for hints and disabled text
pub const GRAY: Rgb565 = Rgb565::new(128 >> 3, 128 >> 2, 128 >> 3);

/// Dark gray used to dim blocked hardware buttons
pub const DIM: Rgb565 = Rgb565::new(64 >> 3, 64 >> 2, 64 >> 3);

// ============================================================================
// Host controls
// ============================================================================

pub const CLOSE_RED: Rgb565 = Rgb565::new(220 >> 3, 40 >> 2, 40 >> 3);

// ============================================================================
// Calculator
// ============================================================================

pub const CALC_BACKGROUND: Rgb565 = Rgb565::new(10 >> 3, 10 >> 2, 10 >> 3);
pub const CALC_DIGIT: Rgb565 = Rgb565::new(30 >> 3, 30 >> 2, 30 >> 3);
pub const CALC_FUNCTION: Rgb565 = Rgb565::new(80 >> 3, 80 >> 2, 80 >> 3);

// ============================================================================
// Feed
// ============================================================================

/// Translucent-black stand-in for overlays (header, caption box, buttons)
pub const OVERLAY: Rgb565 = Rgb565::new(20 >> 3, 20 >> 2, 20 >> 3);
pub const PANEL_BACKGROUND: Rgb565 = Rgb565::new(25 >> 3, 25 >> 2, 25 >> 3);
pub const PANEL_FOOTER: Rgb565 = Rgb565::new(35 >> 3, 35 >> 2, 35 >> 3);
pub const PANEL_DIVIDER: Rgb565 = Rgb565::new(50 >> 3, 50 >> 2, 50 >> 3);
pub const INPUT_IDLE: Rgb565 = Rgb565::new(50 >> 3, 50 >> 2, 50 >> 3);
pub const INPUT_ACTIVE: Rgb565 = Rgb565::new(60 >> 3, 60 >> 2, 60 >> 3);
