//! Calculator app: a keypad over the [`CalcState`] engine.

pub mod engine;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use super::{App, AppId};
use crate::assets::TextureProvider;
use crate::ui::canvas::Canvas;
use crate::ui::components::button::Button;
use crate::ui::components::text::{Anchor, TextSize};
use crate::ui::core::{InputEvent, Key, MouseButton, Rect, ScreenPoint};
use crate::ui::styling::ButtonVariant;
use crate::ui::styling::colors::{CALC_BACKGROUND, LIGHT_GRAY, WHITE};

pub use engine::{CalcKey, CalcState, ERROR, Operator, format_number};

/// Keypad rows, top to bottom. `0` spans two columns.
const KEY_ROWS: [&str; 5] = ["C±%/", "789*", "456-", "123+", "0.="];
const COLUMNS: usize = 4;
/// Share of the viewport height taken by the display.
const DISPLAY_RATIO: f32 = 0.35;

pub struct CalculatorApp {
    state: CalcState,
    running: bool,
    viewport: Rect,
    scale: f32,
    keys: Vec<Button<CalcKey>>,
}

impl CalculatorApp {
    pub fn new(viewport: Rect, scale: f32) -> Self {
        let mut app = Self {
            state: CalcState::new(),
            running: false,
            viewport,
            scale,
            keys: Vec::new(),
        };
        app.layout_keys();
        app
    }

    pub fn state(&self) -> &CalcState {
        &self.state
    }

    pub fn keys(&self) -> &[Button<CalcKey>] {
        &self.keys
    }

    /// Center of the key labelled `label`, if there is one.
    pub fn key_center(&self, label: char) -> Option<ScreenPoint> {
        self.keys
            .iter()
            .find(|k| k.action().label() == label)
            .map(|k| k.bounds().center())
    }

    fn layout_keys(&mut self) {
        self.keys.clear();
        let Rect {
            x,
            y,
            width,
            height,
        } = self.viewport;
        let padding = 10.0 * self.scale;
        let keys_height = height * (1.0 - DISPLAY_RATIO);
        let rows = KEY_ROWS.len() as f32;
        let cols = COLUMNS as f32;

        let key_w = (width - padding * (cols + 1.0)) / cols;
        let key_h = (keys_height - padding * (rows + 1.0)) / rows;
        let top_row_y = y + keys_height - padding - key_h;

        for (row_idx, row) in KEY_ROWS.iter().enumerate() {
            let mut col = 0usize;
            for c in row.chars() {
                let Some(key) = CalcKey::from_char(c) else {
                    continue;
                };
                let span = if key == CalcKey::Digit(0) { 2 } else { 1 };
                let w = key_w * span as f32 + padding * (span - 1) as f32;
                let bounds = Rect::new(
                    x + padding + col as f32 * (key_w + padding),
                    top_row_y - row_idx as f32 * (key_h + padding),
                    w,
                    key_h,
                );
                let mut label = [0u8; 4];
                self.keys.push(
                    Button::new(bounds, c.encode_utf8(&mut label), key)
                        .with_variant(variant_for(key)),
                );
                col += span;
            }
        }
    }

    fn press_key(&mut self, key: CalcKey) {
        debug!("Calculator key {}", key);
        self.state.input(key);
    }
}

fn variant_for(key: CalcKey) -> ButtonVariant {
    match key {
        CalcKey::Op(_) | CalcKey::Equals => ButtonVariant::Operator,
        CalcKey::Clear | CalcKey::Negate | CalcKey::Percent => ButtonVariant::Function,
        CalcKey::Digit(_) | CalcKey::Point => ButtonVariant::Digit,
    }
}

impl App for CalculatorApp {
    fn id(&self) -> AppId {
        AppId::Calculator
    }

    fn title(&self) -> &str {
        "Calculator"
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.state.clear_all();
        for key in &mut self.keys {
            key.handle_event(&InputEvent::Release {
                point: ScreenPoint::default(),
                button: MouseButton::Left,
            });
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn resize(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.layout_keys();
    }

    fn on_event(&mut self, event: &InputEvent) -> bool {
        if !self.running {
            return false;
        }

        match *event {
            InputEvent::Press { point, button } => {
                if !self.viewport.contains(point) {
                    return false;
                }
                if button == MouseButton::Left {
                    let hit = self.keys.iter_mut().find_map(|k| k.handle_event(event));
                    if let Some(key) = hit {
                        self.press_key(key);
                    }
                }
                // Presses anywhere inside the calculator stay in it.
                true
            }
            InputEvent::Release { .. } | InputEvent::Motion { .. } => {
                for key in &mut self.keys {
                    key.handle_event(event);
                }
                false
            }
            InputEvent::Text(c) => match CalcKey::from_char(c) {
                Some(key) => {
                    self.press_key(key);
                    true
                }
                None => false,
            },
            InputEvent::Key(Key::Enter) => {
                self.press_key(CalcKey::Equals);
                true
            }
            InputEvent::Key(_) => false,
        }
    }

    fn draw<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        if !self.running {
            return Ok(());
        }
        let s = self.scale;
        let vp = self.viewport;
        canvas.fill_rect(vp, CALC_BACKGROUND)?;

        let text_x = vp.right() - 20.0 * s;
        let display_y = vp.top() - 20.0 * s;
        if !self.state.expression().is_empty() {
            canvas.text(
                self.state.expression(),
                ScreenPoint::new(text_x, display_y),
                TextSize::from_points(16.0 * s),
                LIGHT_GRAY,
                Anchor::TOP_RIGHT,
            )?;
        }
        canvas.text(
            self.state.display(),
            ScreenPoint::new(text_x, display_y - 30.0 * s),
            TextSize::from_points(36.0 * s),
            WHITE,
            Anchor::TOP_RIGHT,
        )?;

        for key in &self.keys {
            key.draw(canvas, s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureAtlas;
    use crate::framebuffer::FrameBuffer;

    fn app() -> CalculatorApp {
        let mut app = CalculatorApp::new(Rect::new(100.0, 50.0, 230.0, 435.0), 1.0);
        app.start();
        app
    }

    fn tap(app: &mut CalculatorApp, label: char) -> bool {
        let point = app.key_center(label).unwrap();
        let consumed = app.on_event(&InputEvent::Press {
            point,
            button: MouseButton::Left,
        });
        app.on_event(&InputEvent::Release {
            point,
            button: MouseButton::Left,
        });
        consumed
    }

    #[test]
    fn test_keypad_layout() {
        let app = app();
        assert_eq!(app.keys().len(), 19);

        let zero = app.keys().iter().find(|k| k.label() == "0").unwrap();
        let one = app.keys().iter().find(|k| k.label() == "1").unwrap();
        let point = app.keys().iter().find(|k| k.label() == ".").unwrap();
        // 0 covers the 1 and 2 columns plus the gap between them
        assert!((zero.bounds().width - (one.bounds().width * 2.0 + 10.0)).abs() < 1e-3);
        assert!((zero.bounds().left() - one.bounds().left()).abs() < 1e-3);
        assert!(point.bounds().left() > zero.bounds().right());

        // Keys stay below the display area
        let display_bottom = 50.0 + 435.0 * (1.0 - DISPLAY_RATIO);
        assert!(app.keys().iter().all(|k| k.bounds().top() <= display_bottom));
        assert_eq!(app.keys()[0].variant(), ButtonVariant::Function);
    }

    #[test]
    fn test_pressing_keys_runs_engine() {
        let mut app = app();
        for label in ['2', '+', '3', '*', '4', '='] {
            assert!(tap(&mut app, label));
        }
        assert_eq!(app.state().display(), "20");
    }

    #[test]
    fn test_press_in_gap_is_consumed_without_input() {
        let mut app = app();
        let consumed = app.on_event(&InputEvent::Press {
            point: ScreenPoint::new(105.0, 480.0),
            button: MouseButton::Left,
        });
        assert!(consumed);
        assert_eq!(app.state(), &CalcState::new());

        let outside = app.on_event(&InputEvent::Press {
            point: ScreenPoint::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(!outside);
    }

    #[test]
    fn test_keyboard_input() {
        let mut app = app();
        for c in "10/4".chars() {
            assert!(app.on_event(&InputEvent::Text(c)));
        }
        assert!(!app.on_event(&InputEvent::Text('x')));
        assert!(app.on_event(&InputEvent::Key(Key::Enter)));
        assert_eq!(app.state().display(), "2.5");
    }

    #[test]
    fn test_stop_resets_state_and_ignores_input() {
        let mut app = app();
        tap(&mut app, '7');
        app.stop();
        assert_eq!(app.state().display(), "0");
        assert!(!app.on_event(&InputEvent::Text('1')));
    }

    #[test]
    fn test_resize_moves_keys() {
        let mut app = app();
        let before = app.key_center('5').unwrap();
        app.resize(Rect::new(300.0, 50.0, 230.0, 435.0));
        let after = app.key_center('5').unwrap();
        assert!((after.x - before.x - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_draw_fills_viewport() {
        let app = app();
        let mut fb = FrameBuffer::new(Size::new(400, 500));
        let atlas = TextureAtlas::new();
        let mut canvas = Canvas::new(&mut fb, &atlas);
        app.draw(&mut canvas).unwrap();
        // Bottom-left padding corner of the viewport, flipped
        assert_eq!(fb.pixel(102, 500 - 52), Some(CALC_BACKGROUND));
    }
}
