//! Home screen: the wallpaper and a row of app icons.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::layout::PhoneLayout;
use crate::apps::AppId;
use crate::assets::{TextureProvider, names};
use crate::config::PhoneConfig;
use crate::ui::canvas::Canvas;
use crate::ui::components::text::{Anchor, TextSize, truncate_label};
use crate::ui::core::{Rect, ScreenPoint};
use crate::ui::styling::colors::{BLACK, WHITE};

/// Icon top-left corners in body units, measured from the body's top-left.
const ICON_POSITIONS: [(AppId, f32, f32); 2] = [
    (AppId::Feed, 85.0, 125.0),
    (AppId::Calculator, 155.0, 125.0),
];

const LABEL_POINTS: f32 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeScreen {
    phone_height: f32,
    icon_size: f32,
    text_height: f32,
}

impl HomeScreen {
    pub fn new(config: &PhoneConfig) -> Self {
        Self {
            phone_height: config.phone_height,
            icon_size: config.icon_size,
            text_height: config.icon_text_height,
        }
    }

    /// Icon square of `app` in window space.
    pub fn icon_rect(&self, layout: &PhoneLayout, app: AppId) -> Option<Rect> {
        let s = layout.scale();
        ICON_POSITIONS
            .iter()
            .find(|(id, _, _)| *id == app)
            .map(|&(_, x, y)| {
                let size = self.icon_size * s;
                Rect::new(
                    layout.phone_x() + x * s,
                    layout.phone_y() + (self.phone_height - y) * s - size,
                    size,
                    size,
                )
            })
    }

    /// App whose icon or label contains `point`.
    pub fn hit(&self, layout: &PhoneLayout, point: ScreenPoint) -> Option<AppId> {
        let text_height = self.text_height * layout.scale();
        ICON_POSITIONS.iter().find_map(|&(app, _, _)| {
            let icon = self.icon_rect(layout, app)?;
            let region = Rect::new(icon.x, icon.y - text_height, icon.width, icon.height + text_height);
            region.contains(point).then_some(app)
        })
    }

    pub fn draw<D, A>(&self, canvas: &mut Canvas<'_, D, A>, layout: &PhoneLayout) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        canvas.texture(names::SCREEN_ON, layout.body())?;

        let s = layout.scale();
        let points = LABEL_POINTS * s;
        for &(app, _, _) in &ICON_POSITIONS {
            let Some(icon) = self.icon_rect(layout, app) else {
                continue;
            };
            canvas.fill_rounded_rect(icon, icon.width * 0.2, BLACK)?;
            let glyph = icon.width * 0.75;
            canvas.texture(app.icon(), Rect::centered(icon.center(), glyph, glyph))?;

            let label = truncate_label(app.label(), icon.width * 1.5, points);
            canvas.text(
                &label,
                ScreenPoint::new(icon.center().x, icon.y - points * 0.5),
                TextSize::from_points(points),
                WHITE,
                Anchor::TOP_CENTER,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (HomeScreen, PhoneLayout) {
        let config = PhoneConfig::default();
        (
            HomeScreen::new(&config),
            PhoneLayout::new(&config, 1920.0, 1080.0),
        )
    }

    #[test]
    fn test_icon_position_from_top_left() {
        let (home, layout) = setup();
        let s = layout.scale();
        let icon = home.icon_rect(&layout, AppId::Feed).unwrap();
        assert!((icon.left() - (layout.phone_x() + 85.0 * s)).abs() < 1e-3);
        assert!((icon.top() - (layout.body().top() - 125.0 * s)).abs() < 1e-3);
    }

    #[test]
    fn test_hit_icons_and_labels() {
        let (home, layout) = setup();
        let feed = home.icon_rect(&layout, AppId::Feed).unwrap();
        let calc = home.icon_rect(&layout, AppId::Calculator).unwrap();

        assert_eq!(home.hit(&layout, feed.center()), Some(AppId::Feed));
        assert_eq!(home.hit(&layout, calc.center()), Some(AppId::Calculator));

        // Label strip below the icon
        let label = ScreenPoint::new(feed.center().x, feed.y - 10.0 * layout.scale());
        assert_eq!(home.hit(&layout, label), Some(AppId::Feed));

        let below = ScreenPoint::new(feed.center().x, feed.y - 25.0 * layout.scale());
        assert_eq!(home.hit(&layout, below), None);
        // Gap between the icons
        let gap = ScreenPoint::new((feed.right() + calc.left()) / 2.0, feed.center().y);
        assert_eq!(home.hit(&layout, gap), None);
    }
}
