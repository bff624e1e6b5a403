// src/ui/components/button.rs
//! Keypad button with a label, a variant and a pressed state

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::assets::TextureProvider;
use crate::ui::canvas::Canvas;
use crate::ui::components::text::{Anchor, TextSize};
use crate::ui::core::{InputEvent, MouseButton, Rect, ScreenPoint};
use crate::ui::styling::{ButtonVariant, Style};

/// Button state
#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Normal,
    Pressed,
}

/// Button that reports its action on a primary press
///
/// # Touch Behavior
/// - Triggers the action immediately on press
/// - Shows a darkened background while held
/// - Drops the pressed look when the pointer leaves the button or is released
///
/// ```ignore
/// let key = Button::new(rect, "7", CalcKey::Digit(7))
///     .with_variant(ButtonVariant::Digit);
/// ```
pub struct Button<A> {
    bounds: Rect,
    label: heapless::String<8>,
    action: A,
    state: ButtonState,
    variant: ButtonVariant,
}

impl<A: Copy> Button<A> {
    /// Create a new button. Labels longer than 8 bytes are dropped.
    ///
    /// By default, buttons use the `Digit` variant.
    pub fn new(bounds: Rect, label: &str, action: A) -> Self {
        let mut label_string = heapless::String::new();
        label_string.push_str(label).ok();

        Self {
            bounds,
            label: label_string,
            action,
            state: ButtonState::Normal,
            variant: ButtonVariant::Digit,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> A {
        self.action
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        self.bounds.contains(point)
    }

    /// Feed a raw event to the button. Returns the action when the event is a
    /// primary press inside it.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<A> {
        match *event {
            InputEvent::Press {
                point,
                button: MouseButton::Left,
            } if self.contains(point) => {
                self.state = ButtonState::Pressed;
                Some(self.action)
            }
            InputEvent::Motion { point, .. } if !self.contains(point) => {
                self.state = ButtonState::Normal;
                None
            }
            InputEvent::Release { .. } => {
                self.state = ButtonState::Normal;
                None
            }
            _ => None,
        }
    }

    fn get_style(&self) -> Style {
        let base_style = self.variant.to_style();

        match self.state {
            ButtonState::Normal => base_style,
            ButtonState::Pressed => {
                // Darken the background for pressed state
                let bg = base_style.background_color.unwrap_or(Rgb565::BLACK);
                let darkened = Rgb565::new(
                    bg.r().saturating_sub(4),
                    bg.g().saturating_sub(8),
                    bg.b().saturating_sub(4),
                );
                base_style.with_background(darkened)
            }
        }
    }

    /// Draw the button; `scale` sizes the corner radius and label font.
    pub fn draw<D, T>(&self, canvas: &mut Canvas<'_, D, T>, scale: f32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        T: TextureProvider,
    {
        let style = self.get_style();

        if let Some(bg) = style.background_color {
            canvas.fill_rounded_rect(self.bounds, style.corner_radius * scale, bg)?;
        }

        canvas.text(
            &self.label,
            self.bounds.center(),
            TextSize::from_points(18.0 * scale),
            style.foreground_color,
            Anchor::CENTER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(x: f32, y: f32, button: MouseButton) -> InputEvent {
        InputEvent::Press {
            point: ScreenPoint::new(x, y),
            button,
        }
    }

    #[test]
    fn test_press_inside_returns_action() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 10.0, 10.0), "7", 7u8);
        assert_eq!(button.handle_event(&press(5.0, 5.0, MouseButton::Left)), Some(7));
        assert!(button.is_pressed());

        button.handle_event(&InputEvent::Release {
            point: ScreenPoint::new(5.0, 5.0),
            button: MouseButton::Left,
        });
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_secondary_press_and_outside_press_are_ignored() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 10.0, 10.0), "7", 7u8);
        assert_eq!(button.handle_event(&press(5.0, 5.0, MouseButton::Right)), None);
        assert_eq!(button.handle_event(&press(15.0, 5.0, MouseButton::Left)), None);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_dragging_off_clears_pressed_state() {
        let mut button = Button::new(Rect::new(0.0, 0.0, 10.0, 10.0), "=", 0u8)
            .with_variant(ButtonVariant::Operator);
        button.handle_event(&press(5.0, 5.0, MouseButton::Left));
        button.handle_event(&InputEvent::Motion {
            point: ScreenPoint::new(20.0, 5.0),
            dx: 15.0,
            dy: 0.0,
        });
        assert!(!button.is_pressed());
        assert_eq!(button.get_style(), ButtonVariant::Operator.to_style());
    }
}
