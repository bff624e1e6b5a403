//! Screen-space geometry of the phone body, its hardware buttons and the app
//! viewport, plus the chrome drawn around whatever the screen shows.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::state::{PhoneData, PhoneState};
use crate::assets::{TextureProvider, names};
use crate::config::PhoneConfig;
use crate::ui::canvas::Canvas;
use crate::ui::components::text::{Anchor, TextSize};
use crate::ui::core::{Rect, ScreenPoint};
use crate::ui::styling::colors::{GRAY, WHITE};

/// Unscaled edge of the boot logo
const BOOT_LOGO_SIZE: f32 = 128.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PhoneLayout {
    scale: f32,
    body_width: f32,
    body_height: f32,
    button_size: f32,
    button_margin: f32,
    app_offset: ScreenPoint,
    app_size: (f32, f32),
    window: (f32, f32),
    body: Rect,
    power: Rect,
    home: Rect,
}

impl PhoneLayout {
    pub fn new(config: &PhoneConfig, window_width: f32, window_height: f32) -> Self {
        let scale = config.scale();
        let mut layout = Self {
            scale,
            body_width: config.phone_width * scale,
            body_height: config.phone_height * scale,
            button_size: config.button_size * scale,
            button_margin: config.button_margin,
            app_offset: ScreenPoint::new(config.app_offset_x, config.app_offset_y),
            app_size: (config.app_width, config.app_height),
            window: (0.0, 0.0),
            body: Rect::default(),
            power: Rect::default(),
            home: Rect::default(),
        };
        layout.resize(window_width, window_height);
        layout
    }

    /// Re-center the body in a `width` × `height` window and pin the hardware
    /// buttons to its bottom-right corner.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window = (width, height);
        self.body = Rect::new(
            width / 2.0 - self.body_width / 2.0,
            height / 2.0 - self.body_height / 2.0,
            self.body_width,
            self.body_height,
        );
        let size = self.button_size;
        let margin = self.button_margin;
        self.power = Rect::new(width - size - margin, margin, size, size);
        self.home = Rect::new(self.power.x - size - margin, margin, size, size);
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn window_size(&self) -> (f32, f32) {
        self.window
    }

    /// Phone body in window space.
    pub fn body(&self) -> Rect {
        self.body
    }

    pub fn phone_x(&self) -> f32 {
        self.body.x
    }

    pub fn phone_y(&self) -> f32 {
        self.body.y
    }

    pub fn power_button(&self) -> Rect {
        self.power
    }

    pub fn home_button(&self) -> Rect {
        self.home
    }

    /// Screen area the running app draws into.
    pub fn app_viewport(&self) -> Rect {
        let s = self.scale;
        Rect::new(
            self.body.x + self.app_offset.x * s,
            self.body.y + self.app_offset.y * s,
            self.app_size.0 * s,
            self.app_size.1 * s,
        )
    }

    /// Black screen under everything else.
    pub fn draw_base<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        canvas.texture(names::SCREEN_BLACK, self.body)?;
        Ok(())
    }

    pub fn draw_off_screen<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        canvas.texture(names::SCREEN_OFF, self.body)?;
        Ok(())
    }

    /// Logo, title and a dot per third of `progress`.
    pub fn draw_boot_screen<D, A>(
        &self,
        canvas: &mut Canvas<'_, D, A>,
        progress: f32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        let s = self.scale;
        let center = self.body.center();
        let logo_size = BOOT_LOGO_SIZE * s;
        let logo = ScreenPoint::new(center.x - 15.0 * s, center.y + 50.0 * s);
        canvas.texture(
            names::BOOT_LOGO,
            Rect::centered(logo, logo_size, logo_size),
        )?;

        let below_logo = logo.y - logo_size / 2.0;
        canvas.text(
            "TURTLE OS",
            ScreenPoint::new(logo.x, below_logo - 20.0 * s),
            TextSize::from_points(24.0 * s),
            WHITE,
            Anchor::TOP_CENTER,
        )?;
        canvas.text(
            &boot_label(progress),
            ScreenPoint::new(center.x, below_logo - 50.0 * s),
            TextSize::from_points(16.0 * s),
            GRAY,
            Anchor::TOP_CENTER,
        )
    }

    /// Body frame and hardware buttons, drawn last so they cover the screen
    /// edges. Blocked or inactive buttons are dimmed.
    pub fn draw_overlay<D, A>(
        &self,
        canvas: &mut Canvas<'_, D, A>,
        data: &PhoneData,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        canvas.texture(names::PHONE_BODY, self.body)?;

        let home_inactive = matches!(data.state, PhoneState::Off | PhoneState::Booting);
        let buttons = [
            (names::POWER_BUTTON, self.power, data.power_button_blocked),
            (names::HOME_BUTTON, self.home, home_inactive),
        ];
        for (texture, rect, dimmed) in buttons {
            if canvas.texture(texture, rect)? && dimmed {
                canvas.dim(rect)?;
            }
        }
        Ok(())
    }
}

fn boot_label(progress: f32) -> String {
    let dots = (progress.clamp(0.0, 1.0) * 3.0) as usize;
    format!("booting{}", ".".repeat(dots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Texture, TextureAtlas};
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::colors::DIM;

    fn layout() -> PhoneLayout {
        PhoneLayout::new(&PhoneConfig::default(), 1920.0, 1080.0)
    }

    #[test]
    fn test_body_is_centered() {
        let layout = layout();
        let s = PhoneConfig::default().scale();
        let body = layout.body();
        assert!((body.width - 400.0 * s).abs() < 1e-3);
        assert!((body.center().x - 960.0).abs() < 1e-3);
        assert!((body.center().y - 540.0).abs() < 1e-3);
    }

    #[test]
    fn test_buttons_hug_bottom_right() {
        let layout = layout();
        let size = 64.0 * layout.scale();
        let power = layout.power_button();
        assert!((power.right() - (1920.0 - 20.0)).abs() < 1e-3);
        assert_eq!(power.y, 20.0);
        assert!((power.width - size).abs() < 1e-3);

        let home = layout.home_button();
        assert!((power.left() - home.right() - 20.0).abs() < 1e-3);
        assert_eq!(home.y, 20.0);
    }

    #[test]
    fn test_resize_moves_everything() {
        let mut layout = layout();
        let viewport = layout.app_viewport();
        layout.resize(1280.0, 720.0);
        let moved = layout.app_viewport();
        assert!((viewport.x - moved.x - 320.0).abs() < 1e-3);
        assert!((viewport.y - moved.y - 180.0).abs() < 1e-3);
        assert_eq!(viewport.width, moved.width);
        assert!((layout.power_button().right() - 1260.0).abs() < 1e-3);
    }

    #[test]
    fn test_app_viewport_offsets() {
        let layout = layout();
        let s = layout.scale();
        let vp = layout.app_viewport();
        assert!((vp.x - (layout.phone_x() + 70.0 * s)).abs() < 1e-3);
        assert!((vp.y - (layout.phone_y() + 90.0 * s)).abs() < 1e-3);
        assert!((vp.height - 435.0 * s).abs() < 1e-3);
    }

    #[test]
    fn test_boot_label_dots() {
        assert_eq!(boot_label(0.0), "booting");
        assert_eq!(boot_label(0.5), "booting.");
        assert_eq!(boot_label(1.0), "booting...");
    }

    #[test]
    fn test_blocked_power_button_is_dimmed() {
        let config = PhoneConfig {
            button_size: 10.0,
            scale_boost: 1.0,
            reference_height: 640.0,
            ..PhoneConfig::default()
        };
        let layout = PhoneLayout::new(&config, 100.0, 100.0);
        let mut atlas = TextureAtlas::new();
        atlas.insert(names::POWER_BUTTON, Texture::solid(1, 1, WHITE));
        let mut fb = FrameBuffer::new(Size::new(100, 100));

        let mut data = PhoneData::new();
        data.power_button_blocked = true;
        layout
            .draw_overlay(&mut Canvas::new(&mut fb, &atlas), &data)
            .unwrap();

        // Power button spans x 70..80, y 20..30 (flipped rows 70..80)
        let row: Vec<_> = (70..80).filter_map(|x| fb.pixel(x, 75)).collect();
        assert!(row.contains(&DIM));
        assert!(row.contains(&WHITE));
    }
}
