// src/ui/canvas.rs
//! Drawing surface used by every phone component.
//!
//! [`Canvas`] pairs an embedded-graphics [`DrawTarget`] with a
//! [`TextureProvider`] and translates the bottom-left-origin `f32` geometry of
//! the phone into the target's top-left integer space.

use embedded_graphics::draw_target::Clipped;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::text::{Text, TextStyleBuilder};

use crate::assets::{Texture, TextureProvider};
use crate::ui::components::text::{Anchor, TextSize};
use crate::ui::core::{Rect, ScreenPoint};
use crate::ui::styling::colors::DIM;

pub struct Canvas<'a, D, A> {
    display: &'a mut D,
    assets: &'a A,
    /// Height of the full target, used to flip the y axis.
    height: f32,
}

impl<'a, D, A> Canvas<'a, D, A>
where
    D: DrawTarget<Color = Rgb565>,
    A: TextureProvider,
{
    pub fn new(display: &'a mut D, assets: &'a A) -> Self {
        let height = display.bounding_box().size.height as f32;
        Self {
            display,
            assets,
            height,
        }
    }

    fn screen_point(&self, point: ScreenPoint) -> Point {
        Point::new(
            point.x.round() as i32,
            (self.height - point.y).round() as i32,
        )
    }

    fn screen_rect(&self, rect: Rect) -> Rectangle {
        let left = rect.left().round() as i32;
        let right = rect.right().round() as i32;
        let top = (self.height - rect.top()).round() as i32;
        let bottom = (self.height - rect.bottom()).round() as i32;
        Rectangle::new(
            Point::new(left, top),
            Size::new((right - left).max(0) as u32, (bottom - top).max(0) as u32),
        )
    }

    /// Run `f` with drawing restricted to `rect`.
    pub fn clipped(
        &mut self,
        rect: Rect,
        f: impl FnOnce(&mut Canvas<'_, Clipped<'_, D>, A>) -> Result<(), D::Error>,
    ) -> Result<(), D::Error> {
        let area = self.screen_rect(rect);
        let height = self.height;
        let assets = self.assets;
        let mut clipped = self.display.clipped(&area);
        let mut canvas = Canvas {
            display: &mut clipped,
            assets,
            height,
        };
        f(&mut canvas)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb565) -> Result<(), D::Error> {
        self.screen_rect(rect)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.display)
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb565, width: u32) -> Result<(), D::Error> {
        self.screen_rect(rect)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.display)
    }

    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        let r = radius.max(0.0).round() as u32;
        RoundedRectangle::with_equal_corners(self.screen_rect(rect), Size::new(r, r))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.display)
    }

    pub fn fill_circle(
        &mut self,
        center: ScreenPoint,
        radius: f32,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        let diameter = (radius * 2.0).max(0.0).round() as u32;
        Circle::with_center(self.screen_point(center), diameter)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.display)
    }

    pub fn fill_triangle(
        &mut self,
        a: ScreenPoint,
        b: ScreenPoint,
        c: ScreenPoint,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        Triangle::new(
            self.screen_point(a),
            self.screen_point(b),
            self.screen_point(c),
        )
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(self.display)
    }

    pub fn line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Rgb565,
        width: u32,
    ) -> Result<(), D::Error> {
        Line::new(self.screen_point(from), self.screen_point(to))
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.display)
    }

    /// Checkerboard of dark pixels over `rect`, the stand-in for a 50% gray
    /// wash on targets without alpha blending.
    pub fn dim(&mut self, rect: Rect) -> Result<(), D::Error> {
        let area = self.screen_rect(rect);
        let pixels = area
            .points()
            .filter(|p| (p.x + p.y).rem_euclid(2) == 0)
            .map(|p| Pixel(p, DIM));
        self.display.draw_iter(pixels)
    }

    /// Draw `texture` scaled into `rect` (nearest neighbour).
    pub fn image(&mut self, texture: &Texture, rect: Rect) -> Result<(), D::Error> {
        let area = self.screen_rect(rect);
        let (w, h) = (area.size.width, area.size.height);
        let (tw, th) = (texture.width(), texture.height());
        if w == 0 || h == 0 || tw == 0 || th == 0 {
            return Ok(());
        }

        let origin = area.top_left;
        let pixels = (0..h).flat_map(move |dy| {
            (0..w).filter_map(move |dx| {
                let sx = (dx as u64 * tw as u64 / w as u64) as u32;
                let sy = (dy as u64 * th as u64 / h as u64) as u32;
                texture
                    .pixel(sx, sy)
                    .map(|color| Pixel(origin + Point::new(dx as i32, dy as i32), color))
            })
        });
        self.display.draw_iter(pixels)
    }

    /// Draw the named texture into `rect`.
    ///
    /// Returns `Ok(false)` without drawing when the provider has no such
    /// texture.
    pub fn texture(&mut self, name: &str, rect: Rect) -> Result<bool, D::Error> {
        let assets = self.assets;
        let Some(texture) = assets.texture(name) else {
            return Ok(false);
        };
        self.image(texture, rect)?;
        Ok(true)
    }

    pub fn has_texture(&self, name: &str) -> bool {
        self.assets.texture(name).is_some()
    }

    pub fn text(
        &mut self,
        text: &str,
        at: ScreenPoint,
        size: TextSize,
        color: Rgb565,
        anchor: Anchor,
    ) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(size.font(), color);
        let text_style = TextStyleBuilder::new()
            .alignment(anchor.alignment())
            .baseline(anchor.baseline())
            .build();
        Text::with_text_style(text, self.screen_point(at), character_style, text_style)
            .draw(self.display)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{TextureAtlas, names};
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::colors::WHITE;

    #[test]
    fn test_fill_rect_flips_y_axis() {
        let mut fb = FrameBuffer::new(Size::new(10, 10));
        let atlas = TextureAtlas::new();
        let mut canvas = Canvas::new(&mut fb, &atlas);

        // Bottom-left 2x2 square in phone space.
        canvas.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), WHITE).unwrap();

        assert_eq!(fb.pixel(0, 9), Some(WHITE));
        assert_eq!(fb.pixel(1, 8), Some(WHITE));
        assert_eq!(fb.pixel(0, 0), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_missing_texture_is_skipped() {
        let mut fb = FrameBuffer::new(Size::new(4, 4));
        let atlas = TextureAtlas::new();
        let mut canvas = Canvas::new(&mut fb, &atlas);

        let drawn = canvas
            .texture(names::PHONE_BODY, Rect::new(0.0, 0.0, 4.0, 4.0))
            .unwrap();

        assert!(!drawn);
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_transparent_texture_pixels_keep_background() {
        let mut fb = FrameBuffer::new(Size::new(4, 4));
        let mut atlas = TextureAtlas::new();
        atlas.insert(
            names::PHONE_BODY,
            Texture::from_fn(2, 2, |x, _| (x == 0).then_some(WHITE)),
        );
        let mut canvas = Canvas::new(&mut fb, &atlas);

        canvas
            .texture(names::PHONE_BODY, Rect::new(0.0, 0.0, 4.0, 4.0))
            .unwrap();

        assert_eq!(fb.pixel(0, 0), Some(WHITE));
        assert_eq!(fb.pixel(1, 3), Some(WHITE));
        assert_eq!(fb.pixel(3, 0), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_clipped_drawing_stays_inside() {
        let mut fb = FrameBuffer::new(Size::new(10, 10));
        let atlas = TextureAtlas::new();
        let mut canvas = Canvas::new(&mut fb, &atlas);

        canvas
            .clipped(Rect::new(0.0, 0.0, 5.0, 5.0), |inner| {
                inner.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), WHITE)
            })
            .unwrap();

        assert_eq!(fb.pixel(0, 9), Some(WHITE));
        assert_eq!(fb.pixel(9, 0), Some(Rgb565::BLACK));
    }
}
