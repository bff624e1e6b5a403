//! Comment sheet shown over the lower part of the feed.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::assets::TextureProvider;
use crate::storage::Comment;
use crate::ui::canvas::Canvas;
use crate::ui::components::text::{Anchor, TextSize, truncate_label};
use crate::ui::core::{Key, Rect, ScreenPoint};
use crate::ui::styling::colors::{
    GRAY, INPUT_ACTIVE, INPUT_IDLE, LIGHT_GRAY, PANEL_BACKGROUND, PANEL_DIVIDER, PANEL_FOOTER,
    WHITE,
};

/// Share of the viewport height the panel covers, measured from the bottom.
pub const PANEL_RATIO: f32 = 0.65;

/// Byte capacity of the input buffer; four bytes per character covers any
/// UTF-8 input up to the configured length.
const INPUT_CAPACITY: usize = 256;

/// Most recent comments listed.
const VISIBLE_COMMENTS: usize = 5;

/// What a press on the open panel did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Close box hit
    Close,
    /// Press landed outside the panel
    Outside,
    /// Press landed on the panel
    Consumed,
}

pub struct CommentPanel {
    input: heapless::String<INPUT_CAPACITY>,
    typing: bool,
    max_chars: usize,
}

impl CommentPanel {
    pub fn new(max_chars: usize) -> Self {
        Self {
            input: heapless::String::new(),
            typing: false,
            max_chars: max_chars.min(INPUT_CAPACITY / 4),
        }
    }

    /// Panel rectangle for a feed viewport.
    pub fn bounds(viewport: Rect) -> Rect {
        Rect::new(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height * PANEL_RATIO,
        )
    }

    /// Close box in the top-right corner, with a margin.
    pub fn close_bounds(panel: Rect, scale: f32) -> Rect {
        let size = 30.0 * scale + 10.0 * scale;
        Rect::new(panel.right() - size, panel.top() - size, size, size)
    }

    /// Text entry strip along the bottom edge.
    pub fn input_bounds(panel: Rect, scale: f32) -> Rect {
        Rect::new(
            panel.x + 10.0 * scale,
            panel.y + 10.0 * scale,
            panel.width - 20.0 * scale,
            30.0 * scale,
        )
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn on_press(&mut self, point: ScreenPoint, panel: Rect, scale: f32) -> PanelAction {
        if !panel.contains(point) {
            self.typing = false;
            return PanelAction::Outside;
        }
        if Self::close_bounds(panel, scale).contains(point) {
            self.typing = false;
            return PanelAction::Close;
        }
        self.typing = Self::input_bounds(panel, scale).contains(point);
        PanelAction::Consumed
    }

    /// Append a typed character while the input is focused.
    pub fn on_text(&mut self, c: char) {
        if self.typing && !c.is_control() && self.input.chars().count() < self.max_chars {
            self.input.push(c).ok();
        }
    }

    /// Handle editing keys. Returns the trimmed text when Enter submits a
    /// non-blank comment; the input is then cleared and unfocused.
    pub fn on_key(&mut self, key: Key) -> Option<String> {
        if !self.typing {
            return None;
        }
        match key {
            Key::Backspace => {
                self.input.pop();
                None
            }
            Key::Enter => {
                let text = self.input.trim();
                if text.is_empty() {
                    return None;
                }
                let text = text.to_string();
                self.input.clear();
                self.typing = false;
                Some(text)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.typing = false;
    }

    pub fn draw<D, A>(
        &self,
        canvas: &mut Canvas<'_, D, A>,
        panel: Rect,
        scale: f32,
        comments: &[Comment],
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let s = scale;
        canvas.fill_rect(panel, PANEL_BACKGROUND)?;

        let count = match comments.len() {
            1 => "1 comment".to_string(),
            n => format!("{n} comments"),
        };
        canvas.text(
            &count,
            ScreenPoint::new(panel.center().x, panel.top() - 15.0 * s),
            TextSize::from_points(14.0 * s),
            WHITE,
            Anchor::TOP_CENTER,
        )?;

        // Close cross
        let cx = panel.right() - 20.0 * s;
        let cy = panel.top() - 20.0 * s;
        let arm = 6.0 * s;
        canvas.line(
            ScreenPoint::new(cx - arm, cy - arm),
            ScreenPoint::new(cx + arm, cy + arm),
            GRAY,
            2,
        )?;
        canvas.line(
            ScreenPoint::new(cx - arm, cy + arm),
            ScreenPoint::new(cx + arm, cy - arm),
            GRAY,
            2,
        )?;
        let divider_y = panel.top() - 40.0 * s;
        canvas.line(
            ScreenPoint::new(panel.left(), divider_y),
            ScreenPoint::new(panel.right(), divider_y),
            PANEL_DIVIDER,
            1,
        )?;

        let mut y = panel.top() - 60.0 * s;
        if comments.is_empty() {
            canvas.text(
                "No comments yet",
                ScreenPoint::new(panel.center().x, y - 20.0 * s),
                TextSize::from_points(14.0 * s),
                GRAY,
                Anchor::TOP_CENTER,
            )?;
        }
        let text_x = panel.left() + 40.0 * s;
        let text_width = panel.width - 50.0 * s;
        for comment in comments.iter().take(VISIBLE_COMMENTS) {
            let avatar = ScreenPoint::new(panel.left() + 20.0 * s, y - 10.0 * s);
            canvas.fill_circle(avatar, 12.0 * s, GRAY)?;
            let initial: String = comment
                .author
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default();
            canvas.text(
                &initial,
                avatar,
                TextSize::from_points(10.0 * s),
                WHITE,
                Anchor::CENTER,
            )?;
            canvas.text(
                &truncate_label(&comment.author, text_width, 12.0 * s),
                ScreenPoint::new(text_x, y),
                TextSize::from_points(12.0 * s),
                LIGHT_GRAY,
                Anchor::TOP_LEFT,
            )?;
            canvas.text(
                &truncate_label(&comment.text, text_width, 13.0 * s),
                ScreenPoint::new(text_x, y - 18.0 * s),
                TextSize::from_points(13.0 * s),
                WHITE,
                Anchor::TOP_LEFT,
            )?;
            y -= 55.0 * s;
        }

        // Footer with the input strip
        canvas.fill_rect(
            Rect::new(panel.x, panel.y, panel.width, 50.0 * s),
            PANEL_FOOTER,
        )?;
        let input = Self::input_bounds(panel, s);
        canvas.fill_rect(input, if self.typing { INPUT_ACTIVE } else { INPUT_IDLE })?;
        let at = ScreenPoint::new(panel.x + 20.0 * s, panel.y + 25.0 * s);
        if self.typing || !self.input.is_empty() {
            let mut shown = self.input.to_string();
            if self.typing {
                shown.push('|');
            }
            canvas.text(
                &shown,
                at,
                TextSize::from_points(12.0 * s),
                WHITE,
                Anchor::MIDDLE_LEFT,
            )?;
        } else {
            canvas.text(
                "Add a comment...",
                at,
                TextSize::from_points(12.0 * s),
                GRAY,
                Anchor::MIDDLE_LEFT,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: Rect = Rect::new(0.0, 0.0, 200.0, 300.0);

    #[test]
    fn test_press_regions() {
        let mut panel = CommentPanel::new(50);
        assert_eq!(
            panel.on_press(ScreenPoint::new(100.0, 350.0), PANEL, 1.0),
            PanelAction::Outside
        );
        assert_eq!(
            panel.on_press(ScreenPoint::new(195.0, 295.0), PANEL, 1.0),
            PanelAction::Close
        );
        assert_eq!(
            panel.on_press(ScreenPoint::new(100.0, 20.0), PANEL, 1.0),
            PanelAction::Consumed
        );
        assert!(panel.is_typing());
        assert_eq!(
            panel.on_press(ScreenPoint::new(100.0, 150.0), PANEL, 1.0),
            PanelAction::Consumed
        );
        assert!(!panel.is_typing());
    }

    #[test]
    fn test_typing_and_submit() {
        let mut panel = CommentPanel::new(50);
        panel.on_text('x');
        assert_eq!(panel.input(), "");

        panel.on_press(ScreenPoint::new(100.0, 20.0), PANEL, 1.0);
        for c in "  hi!!".chars() {
            panel.on_text(c);
        }
        panel.on_text('\u{8}');
        assert_eq!(panel.on_key(Key::Backspace), None);
        assert_eq!(panel.input(), "  hi!");
        assert_eq!(panel.on_key(Key::Enter), Some("hi!".to_string()));
        assert_eq!(panel.input(), "");
        assert!(!panel.is_typing());
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut panel = CommentPanel::new(50);
        panel.on_press(ScreenPoint::new(100.0, 20.0), PANEL, 1.0);
        panel.on_text(' ');
        assert_eq!(panel.on_key(Key::Enter), None);
        assert!(panel.is_typing());
    }

    #[test]
    fn test_input_length_is_capped() {
        let mut panel = CommentPanel::new(5);
        panel.on_press(ScreenPoint::new(100.0, 20.0), PANEL, 1.0);
        for c in "привет мир".chars() {
            panel.on_text(c);
        }
        assert_eq!(panel.input(), "приве");
    }
}
