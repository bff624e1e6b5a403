//! The phone: power state machine, input routing and app lifecycle.
//!
//! [`Phone`] owns the layout, the home screen and one instance of every app.
//! Presses are routed through a fixed z-order and stop at the first match:
//!
//! 1. power button
//! 2. home button
//! 3. the running app (a secondary press it ignores closes it)
//! 4. home-screen icons, when on with no app running
//!
//! Releases, motion, keys and text only go to the running app.

pub mod home;
pub mod layout;
pub mod state;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info};

use crate::apps::feed::Captions;
use crate::apps::{ActiveApp, App, AppId, CalculatorApp, FeedApp};
use crate::assets::TextureProvider;
use crate::config::PhoneConfig;
use crate::media::MediaBackend;
use crate::storage::StorageBackend;
use crate::ui::canvas::Canvas;
use crate::ui::core::{InputEvent, MouseButton, ScreenPoint};

pub use home::HomeScreen;
pub use layout::PhoneLayout;
pub use state::{PhoneData, PhoneState};

pub struct Phone<B: MediaBackend, S: StorageBackend> {
    config: PhoneConfig,
    data: PhoneData,
    layout: PhoneLayout,
    home: HomeScreen,
    calculator: CalculatorApp,
    feed: FeedApp<B, S>,
    active: ActiveApp,
}

impl<B: MediaBackend, S: StorageBackend> Phone<B, S> {
    /// Build the phone, switched off, laid out for the reference window.
    /// Both apps are constructed here and live as long as the phone.
    pub fn new(config: PhoneConfig, media: B, storage: S) -> Self {
        let layout = PhoneLayout::new(&config, config.reference_width, config.reference_height);
        let viewport = layout.app_viewport();
        let scale = layout.scale();
        info!(
            "Phone created at scale {:.3}, app viewport {:?}",
            scale, viewport
        );
        Self {
            data: PhoneData::new(),
            home: HomeScreen::new(&config),
            calculator: CalculatorApp::new(viewport, scale),
            feed: FeedApp::new(media, storage, &config, viewport, scale),
            layout,
            config,
            active: ActiveApp::None,
        }
    }

    pub fn with_captions(mut self, captions: Captions) -> Self {
        self.feed = self.feed.with_captions(captions);
        self
    }

    pub fn config(&self) -> &PhoneConfig {
        &self.config
    }

    pub fn data(&self) -> &PhoneData {
        &self.data
    }

    pub fn state(&self) -> PhoneState {
        self.data.state
    }

    pub fn layout(&self) -> &PhoneLayout {
        &self.layout
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn calculator(&self) -> &CalculatorApp {
        &self.calculator
    }

    pub fn feed(&self) -> &FeedApp<B, S> {
        &self.feed
    }

    pub fn active_app(&self) -> ActiveApp {
        self.active
    }

    /// Recompute the layout for a new window size and hand every app its new
    /// viewport, running or not.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout.resize(width, height);
        let viewport = self.layout.app_viewport();
        debug!("Resized to {}x{}, app viewport {:?}", width, height, viewport);
        self.calculator.resize(viewport);
        self.feed.resize(viewport);
    }

    fn toggle_power(&mut self) {
        match self.data.state {
            PhoneState::Off => {
                info!("Power on, booting");
                self.data.start_boot();
            }
            PhoneState::On => {
                info!("Power off");
                self.data.shut_down(self.config.power_cooldown);
                self.close_app();
            }
            PhoneState::Booting => {}
        }
    }

    fn go_home(&mut self) {
        if self.data.is_on() {
            self.close_app();
        }
    }

    fn start_app(&mut self, app: AppId) {
        info!("Starting {}", app.label());
        match app {
            AppId::Calculator => self.calculator.start(),
            AppId::Feed => self.feed.start(),
        }
        self.active = app.into();
    }

    /// Stop whichever app is running.
    fn close_app(&mut self) {
        if self.calculator.is_running() {
            info!("Stopping {}", AppId::Calculator.label());
            self.calculator.stop();
        }
        if self.feed.is_running() {
            info!("Stopping {}", AppId::Feed.label());
            self.feed.stop();
        }
        self.active = ActiveApp::None;
    }

    fn app_event(&mut self, event: &InputEvent) -> bool {
        match self.active {
            ActiveApp::None => false,
            ActiveApp::Calculator => self.calculator.on_event(event),
            ActiveApp::Feed => self.feed.on_event(event),
        }
    }

    /// Route an input event. Returns `true` if the phone consumed it.
    pub fn on_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Press { point, button } => self.on_press(point, button, event),
            _ => self.app_event(event),
        }
    }

    fn on_press(&mut self, point: ScreenPoint, button: MouseButton, event: &InputEvent) -> bool {
        if button == MouseButton::Left {
            if self.layout.power_button().contains(point) {
                if self.data.power_button_blocked {
                    debug!("Power button blocked");
                } else {
                    self.toggle_power();
                }
                return true;
            }
            if self.layout.home_button().contains(point) {
                self.go_home();
                return true;
            }
        }

        if !self.active.is_none() {
            if self.app_event(event) {
                return true;
            }
            if button == MouseButton::Right {
                debug!("Secondary press closes the app");
                self.close_app();
                return true;
            }
        }

        if button == MouseButton::Left
            && self.data.is_on()
            && self.active.is_none()
            && let Some(app) = self.home.hit(&self.layout, point)
        {
            self.start_app(app);
            return true;
        }
        false
    }

    /// Advance timers and the apps by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.data.tick(dt, self.config.boot_duration) {
            info!("Boot complete");
        }
        self.calculator.update(dt);
        self.feed.update(dt);
    }

    pub fn draw<D, A>(&self, canvas: &mut Canvas<'_, D, A>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        A: TextureProvider,
    {
        self.layout.draw_base(canvas)?;
        match self.data.state {
            PhoneState::Off => self.layout.draw_off_screen(canvas)?,
            PhoneState::Booting => {
                let progress = self.data.boot_progress(self.config.boot_duration);
                self.layout.draw_boot_screen(canvas, progress)?;
            }
            PhoneState::On => match self.active {
                ActiveApp::None => self.home.draw(canvas, &self.layout)?,
                ActiveApp::Calculator => self.calculator.draw(canvas)?,
                ActiveApp::Feed => self.feed.draw(canvas)?,
            },
        }
        self.layout.draw_overlay(canvas, &self.data)
    }
}
