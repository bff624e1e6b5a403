//! Procedurally drawn textures standing in for the phone's sprite atlas.
//!
//! Body-sized textures are generated at half resolution in body units with a
//! top-left origin; the canvas scales them to the body rectangle.

use embedded_graphics::pixelcolor::Rgb565;
use turtle_core::PhoneConfig;
use turtle_core::assets::{Texture, TextureAtlas, names};

/// Body units per texture pixel
const BODY_STEP: f32 = 2.0;
const BEZEL: f32 = 18.0;
const ICON: u32 = 24;

const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Screen area of the body in body units, top-left origin: (x, y, w, h).
fn screen_area(config: &PhoneConfig) -> (f32, f32, f32, f32) {
    let top = config.phone_height - config.app_offset_y - config.app_height;
    (config.app_offset_x, top, config.app_width, config.app_height)
}

/// Body-sized texture; `f` gets body-unit coordinates.
fn body_texture(config: &PhoneConfig, mut f: impl FnMut(f32, f32) -> Option<Rgb565>) -> Texture {
    let w = (config.phone_width / BODY_STEP) as u32;
    let h = (config.phone_height / BODY_STEP) as u32;
    Texture::from_fn(w, h, |x, y| {
        f((x as f32 + 0.5) * BODY_STEP, (y as f32 + 0.5) * BODY_STEP)
    })
}

fn in_rounded(x: f32, y: f32, (rx, ry, rw, rh): (f32, f32, f32, f32), radius: f32) -> bool {
    if x < rx || y < ry || x > rx + rw || y > ry + rh {
        return false;
    }
    let cx = x.clamp(rx + radius, rx + rw - radius);
    let cy = y.clamp(ry + radius, ry + rh - radius);
    (x - cx).powi(2) + (y - cy).powi(2) <= radius * radius
}

/// Square texture; `f` gets coordinates in `[-1, 1]`, y pointing up.
fn glyph(size: u32, mut f: impl FnMut(f32, f32) -> Option<Rgb565>) -> Texture {
    let half = size as f32 / 2.0;
    Texture::from_fn(size, size, |x, y| {
        let u = (x as f32 + 0.5 - half) / half;
        let v = (half - y as f32 - 0.5) / half;
        f(u, v)
    })
}

fn heart(u: f32, v: f32) -> f32 {
    let (x, y) = (u * 1.2, v * 1.2 + 0.2);
    (x * x + y * y - 1.0).powi(3) - x * x * y.powi(3)
}

/// Every texture the phone asks for.
pub fn build_atlas(config: &PhoneConfig) -> TextureAtlas {
    let (sx, sy, sw, sh) = screen_area(config);
    let screen = (sx, sy, sw, sh);
    let frame = (sx - BEZEL, sy - BEZEL * 2.0, sw + BEZEL * 2.0, sh + BEZEL * 4.0);
    let in_screen = move |x: f32, y: f32| in_rounded(x, y, screen, 6.0);

    let mut atlas = TextureAtlas::new();
    atlas.insert(
        names::PHONE_BODY,
        body_texture(config, |x, y| {
            if in_screen(x, y) || !in_rounded(x, y, frame, 28.0) {
                return None;
            }
            let edge = !in_rounded(x, y, (frame.0 + 3.0, frame.1 + 3.0, frame.2 - 6.0, frame.3 - 6.0), 25.0);
            Some(if edge { rgb(90, 90, 96) } else { rgb(28, 28, 32) })
        }),
    );
    atlas.insert(
        names::SCREEN_BLACK,
        body_texture(config, |x, y| in_screen(x, y).then_some(rgb(0, 0, 0))),
    );
    atlas.insert(
        names::SCREEN_OFF,
        body_texture(config, |x, y| {
            in_screen(x, y).then(|| {
                // Faint diagonal glare
                let glare = ((x - sx) - (y - sy) * 0.5).abs() < 12.0;
                if glare { rgb(24, 24, 30) } else { rgb(10, 10, 14) }
            })
        }),
    );
    atlas.insert(
        names::SCREEN_ON,
        body_texture(config, |x, y| {
            in_screen(x, y).then(|| {
                let t = ((y - sy) / sh).clamp(0.0, 1.0);
                rgb(
                    (20.0 + 20.0 * t) as u8,
                    (90.0 + 60.0 * t) as u8,
                    (110.0 - 40.0 * t) as u8,
                )
            })
        }),
    );

    atlas.insert(
        names::POWER_BUTTON,
        glyph(32, |u, v| {
            let r = (u * u + v * v).sqrt();
            if r > 1.0 {
                None
            } else if (0.45..0.6).contains(&r) && !(v > 0.2 && u.abs() < 0.25) {
                Some(rgb(230, 60, 60))
            } else if u.abs() < 0.08 && (0.1..0.7).contains(&v) {
                Some(rgb(230, 60, 60))
            } else {
                Some(rgb(45, 45, 50))
            }
        }),
    );
    atlas.insert(
        names::HOME_BUTTON,
        glyph(32, |u, v| {
            let r = (u * u + v * v).sqrt();
            if r > 1.0 {
                None
            } else {
                let ring = u.abs().max(v.abs());
                Some(if (0.3..0.42).contains(&ring) {
                    rgb(230, 230, 230)
                } else {
                    rgb(45, 45, 50)
                })
            }
        }),
    );
    atlas.insert(
        names::BOOT_LOGO,
        glyph(48, |u, v| {
            let shell = (u / 0.7).powi(2) + ((v + 0.1) / 0.5).powi(2) <= 1.0;
            let head = (u - 0.75).powi(2) + (v - 0.1).powi(2) <= 0.04;
            let legs = v < -0.3 && v > -0.65 && ((u + 0.45).abs() < 0.1 || (u - 0.45).abs() < 0.1);
            if shell {
                let plate = ((u * 5.0).floor() + (v * 5.0).floor()) as i32 % 2 == 0;
                Some(if plate { rgb(40, 150, 70) } else { rgb(30, 120, 55) })
            } else if head || legs {
                Some(rgb(120, 190, 90))
            } else {
                None
            }
        }),
    );
    atlas.insert(
        names::FEED_ICON,
        glyph(ICON, |u, v| {
            let inside = u > -0.45 && u < 0.6 && v.abs() < (0.6 - u) * 0.6;
            inside.then_some(rgb(255, 60, 110))
        }),
    );
    atlas.insert(
        names::CALC_ICON,
        glyph(ICON, |u, v| {
            let cell = |c: f32| c.abs() > 0.15 && c.abs() < 0.85;
            (cell(u) && cell(v)).then_some(rgb(250, 160, 40))
        }),
    );
    atlas.insert(
        names::LIKE,
        glyph(ICON, |u, v| (heart(u, v) <= 0.0).then_some(rgb(240, 40, 70))),
    );
    atlas.insert(
        names::UNLIKE,
        glyph(ICON, |u, v| {
            let d = heart(u, v);
            (d <= 0.0 && heart(u * 1.35, v * 1.35 - 0.05) > 0.0).then_some(rgb(255, 255, 255))
        }),
    );
    atlas.insert(
        names::COMMENT,
        glyph(ICON, |u, v| {
            let bubble = (u / 0.9).powi(2) + ((v - 0.15) / 0.65).powi(2) <= 1.0;
            let tail = v < -0.3 && v > -0.85 && u < -0.2 && u > -0.6 + (v + 0.85) * 0.3;
            (bubble || tail).then_some(rgb(255, 255, 255))
        }),
    );
    atlas
}

#[cfg(test)]
mod tests {
    use super::*;
    use turtle_core::assets::TextureProvider;

    #[test]
    fn test_atlas_has_every_name() {
        let atlas = build_atlas(&PhoneConfig::default());
        for name in [
            names::PHONE_BODY,
            names::SCREEN_OFF,
            names::SCREEN_BLACK,
            names::SCREEN_ON,
            names::POWER_BUTTON,
            names::HOME_BUTTON,
            names::BOOT_LOGO,
            names::FEED_ICON,
            names::CALC_ICON,
            names::LIKE,
            names::UNLIKE,
            names::COMMENT,
        ] {
            assert!(atlas.texture(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_body_screen_is_transparent() {
        let config = PhoneConfig::default();
        let atlas = build_atlas(&config);
        let body = atlas.texture(names::PHONE_BODY).unwrap();
        let (x, y, w, h) = screen_area(&config);
        let center = ((x + w / 2.0) / BODY_STEP, (y + h / 2.0) / BODY_STEP);
        assert_eq!(body.pixel(center.0 as u32, center.1 as u32), None);
        // Bezel just left of the screen
        let bezel = ((x - BEZEL / 2.0) / BODY_STEP, center.1);
        assert!(body.pixel(bezel.0 as u32, bezel.1 as u32).is_some());

        let on = atlas.texture(names::SCREEN_ON).unwrap();
        assert!(on.pixel(center.0 as u32, center.1 as u32).is_some());
        assert_eq!(on.pixel(0, 0), None);
    }
}
