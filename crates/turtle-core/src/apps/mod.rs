//! Embedded phone apps and the lifecycle contract they share.
//!
//! The [`App`] trait defines what the [`Phone`](crate::phone::Phone) calls on
//! an app. The phone owns one instance of every app for its whole lifetime
//! and records which one is in the foreground as an [`ActiveApp`].

pub mod calc;
pub mod feed;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::assets::{TextureProvider, names};
use crate::ui::canvas::Canvas;
use crate::ui::core::{InputEvent, Rect};

pub use calc::CalculatorApp;
pub use feed::FeedApp;

/// Identifies an installed app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppId {
    Feed,
    Calculator,
}

impl AppId {
    /// Label under the home-screen icon.
    pub const fn label(self) -> &'static str {
        match self {
            AppId::Feed => "zasora",
            AppId::Calculator => "calc",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            AppId::Feed => names::FEED_ICON,
            AppId::Calculator => names::CALC_ICON,
        }
    }
}

/// Trait every embedded app implements.
///
/// The phone calls these in a fixed order:
///
/// 1. **`resize`** whenever the window changes, running or not, so the
///    viewport is always current.
/// 2. **`start`** when its home icon is pressed.
/// 3. **`on_event`** for input while running.
/// 4. **`update`** once per tick.
/// 5. **`draw`** once per frame while running.
/// 6. **`stop`** on home, app close or power off.
pub trait App {
    fn id(&self) -> AppId;

    fn title(&self) -> &str;

    fn start(&mut self);

    /// Halt the app and release anything it holds.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    fn viewport(&self) -> Rect;

    fn resize(&mut self, viewport: Rect);

    /// Returns `true` if the event was consumed.
    fn on_event(&mut self, event: &InputEvent) -> bool;

    /// Advance per-tick state by `dt` seconds.
    fn update(&mut self, _dt: f32) {}

    fn draw<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider;
}

/// Which app, if any, is in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveApp {
    #[default]
    None,
    Calculator,
    Feed,
}

impl ActiveApp {
    pub fn id(self) -> Option<AppId> {
        match self {
            ActiveApp::None => None,
            ActiveApp::Calculator => Some(AppId::Calculator),
            ActiveApp::Feed => Some(AppId::Feed),
        }
    }

    pub fn is_none(self) -> bool {
        self == ActiveApp::None
    }
}

impl From<AppId> for ActiveApp {
    fn from(id: AppId) -> Self {
        match id {
            AppId::Calculator => ActiveApp::Calculator,
            AppId::Feed => ActiveApp::Feed,
        }
    }
}
