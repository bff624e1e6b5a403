//! Textures and the provider the phone looks them up through.
//!
//! The core never loads image bytes. Hosts fill a [`TextureAtlas`] (or any
//! other [`TextureProvider`]) and hand it to the [`Canvas`](crate::ui::Canvas);
//! a missing texture simply skips the draw call.

use std::collections::HashMap;

use embedded_graphics::pixelcolor::Rgb565;

/// Logical texture names used by the phone and its apps.
pub mod names {
    pub const PHONE_BODY: &str = "telefon_body";
    pub const SCREEN_OFF: &str = "SCREEN_OFF";
    pub const SCREEN_BLACK: &str = "SCREEN_BLACK";
    pub const SCREEN_ON: &str = "SCREEN_ON";
    pub const POWER_BUTTON: &str = "powerbtn";
    pub const HOME_BUTTON: &str = "homebtn";
    pub const BOOT_LOGO: &str = "turtlelogo";
    pub const FEED_ICON: &str = "zasora";
    pub const CALC_ICON: &str = "calc";
    pub const LIKE: &str = "like";
    pub const UNLIKE: &str = "unlike";
    pub const COMMENT: &str = "comment";
}

/// Row-major RGB565 image; `None` pixels are transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Option<Rgb565>>,
}

impl Texture {
    /// Build a texture by evaluating `f(x, y)` for every pixel, top row first.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Option<Rgb565>) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn solid(width: u32, height: u32, color: Rgb565) -> Self {
        Self::from_fn(width, height, |_, _| Some(color))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, `None` when transparent or out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Looks up drawable textures by logical name.
pub trait TextureProvider {
    fn texture(&self, name: &str) -> Option<&Texture>;
}

/// In-memory name → texture map.
#[derive(Debug, Default)]
pub struct TextureAtlas {
    textures: HashMap<String, Texture>,
}

impl TextureAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) {
        self.textures.insert(name.into(), texture);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureProvider for TextureAtlas {
    fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }
}
