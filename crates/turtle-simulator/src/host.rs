//! Window chrome and translation of SDL events into phone input.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::{Keycode, Mod, MouseButton as SdlButton};
use turtle_core::assets::TextureProvider;
use turtle_core::ui::components::text::{Anchor, TextSize};
use turtle_core::ui::styling::colors::{CLOSE_RED, GRAY, WHITE};
use turtle_core::ui::{Canvas, InputEvent, Key, MouseButton, Rect, ScreenPoint};

/// Edge of the host's close and fullscreen buttons
const CONTROL_SIZE: f32 = 50.0;

/// What the host should do with one SDL event.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    Quit,
    ToggleFullscreen,
    Phone(InputEvent),
    Ignore,
}

/// Close and fullscreen buttons in the top-right corner of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostControls {
    close: Rect,
    fullscreen: Rect,
}

impl HostControls {
    pub fn new(width: f32, height: f32) -> Self {
        let close = Rect::new(
            width - CONTROL_SIZE,
            height - CONTROL_SIZE,
            CONTROL_SIZE,
            CONTROL_SIZE,
        );
        let fullscreen = Rect::new(close.x - CONTROL_SIZE, close.y, CONTROL_SIZE, CONTROL_SIZE);
        Self { close, fullscreen }
    }

    pub fn close(&self) -> Rect {
        self.close
    }

    pub fn fullscreen(&self) -> Rect {
        self.fullscreen
    }

    pub fn draw<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let size = TextSize::from_points(16.0);
        canvas.fill_rect(self.close, CLOSE_RED)?;
        canvas.text("X", self.close.center(), size, WHITE, Anchor::CENTER)?;
        canvas.fill_rect(self.fullscreen, GRAY)?;
        canvas.text("[ ]", self.fullscreen.center(), size, WHITE, Anchor::CENTER)
    }
}

/// Stateful SDL → [`InputEvent`] translator.
///
/// SDL reports top-left window coordinates; the phone works bottom-left, so
/// every point is flipped against the display height. Motion deltas come
/// from successive pointer positions.
pub struct InputTranslator {
    height: f32,
    controls: HostControls,
    last_pointer: Option<ScreenPoint>,
}

impl InputTranslator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            height: height as f32,
            controls: HostControls::new(width as f32, height as f32),
            last_pointer: None,
        }
    }

    pub fn controls(&self) -> &HostControls {
        &self.controls
    }

    fn flip(&self, point: Point) -> ScreenPoint {
        ScreenPoint::new(point.x as f32, self.height - point.y as f32)
    }

    pub fn translate(&mut self, event: SimulatorEvent) -> HostAction {
        match event {
            SimulatorEvent::Quit => HostAction::Quit,
            SimulatorEvent::KeyDown {
                keycode, keymod, ..
            } => self.key_down(keycode, keymod),
            SimulatorEvent::MouseButtonDown { mouse_btn, point } => {
                let point = self.flip(point);
                self.last_pointer = Some(point);
                let Some(button) = mouse_button(mouse_btn) else {
                    return HostAction::Ignore;
                };
                if button == MouseButton::Left {
                    if self.controls.close.contains(point) {
                        return HostAction::Quit;
                    }
                    if self.controls.fullscreen.contains(point) {
                        return HostAction::ToggleFullscreen;
                    }
                }
                HostAction::Phone(InputEvent::Press { point, button })
            }
            SimulatorEvent::MouseButtonUp { mouse_btn, point } => {
                let point = self.flip(point);
                self.last_pointer = Some(point);
                match mouse_button(mouse_btn) {
                    Some(button) => HostAction::Phone(InputEvent::Release { point, button }),
                    None => HostAction::Ignore,
                }
            }
            SimulatorEvent::MouseMove { point } => {
                let point = self.flip(point);
                let last = self.last_pointer.replace(point).unwrap_or(point);
                HostAction::Phone(InputEvent::Motion {
                    point,
                    dx: point.x - last.x,
                    dy: point.y - last.y,
                })
            }
            _ => HostAction::Ignore,
        }
    }

    fn key_down(&self, keycode: Keycode, keymod: Mod) -> HostAction {
        match keycode {
            Keycode::Escape => HostAction::Quit,
            Keycode::F11 => HostAction::ToggleFullscreen,
            Keycode::Backspace => HostAction::Phone(InputEvent::Key(Key::Backspace)),
            Keycode::Return | Keycode::KpEnter => HostAction::Phone(InputEvent::Key(Key::Enter)),
            _ => {
                let shift = keymod.intersects(Mod::LSHIFTMOD | Mod::RSHIFTMOD);
                match key_char(&keycode.name(), shift) {
                    Some(c) => HostAction::Phone(InputEvent::Text(c)),
                    None => HostAction::Phone(InputEvent::Key(Key::Other)),
                }
            }
        }
    }
}

fn mouse_button(button: SdlButton) -> Option<MouseButton> {
    match button {
        SdlButton::Left => Some(MouseButton::Left),
        SdlButton::Right => Some(MouseButton::Right),
        SdlButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Printable character for an SDL key name, US layout.
fn key_char(name: &str, shift: bool) -> Option<char> {
    if name == "Space" {
        return Some(' ');
    }
    let name = name.strip_prefix("Keypad ").unwrap_or(name);
    let mut chars = name.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !shift {
        return Some(c.to_ascii_lowercase());
    }
    Some(match c {
        '1' => '!',
        '5' => '%',
        '8' => '*',
        '=' => '+',
        '/' => '?',
        ',' => '<',
        '.' => '>',
        '-' => '_',
        c => c.to_ascii_uppercase(),
    })
}
