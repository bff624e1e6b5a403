//! Desktop host for the turtle phone.
//!
//! Renders the phone in an SDL2 window via `embedded-graphics-simulator`.
//! Clips under `<assets>/video/zasora` play as synthetic patterns; likes and
//! comments are saved under the data directory.
//!
//! # Controls
//!
//! | Input               | Action                      |
//! |---------------------|-----------------------------|
//! | Mouse               | Phone buttons, icons, apps  |
//! | Right click         | Close the running app       |
//! | Keyboard            | Calculator / comment typing |
//! | F11, `[ ]` button   | Toggle window scale         |
//! | Escape, `X` button  | Quit                        |
//!
//! An optional JSON settings file can be passed as the first argument.

mod assets;
mod host;
mod media;
mod settings;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, Window};
use log::{error, info};

use turtle_core::Phone;
use turtle_core::framebuffer::FrameBuffer;
use turtle_core::storage::FileStorage;
use turtle_core::ui::Canvas;

use crate::host::{HostAction, InputTranslator};
use crate::media::{SyntheticMedia, load_captions};
use crate::settings::SimulatorSettings;

/// Target frame duration (60 Hz).
const FRAME_DURATION: Duration = Duration::from_micros(16_667);

fn open_window(scale: u32) -> Window {
    let output_settings = OutputSettingsBuilder::new().scale(scale.max(1)).build();
    Window::new("Turtle Phone", &output_settings)
}

fn main() {
    env_logger::init();

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = SimulatorSettings::load(settings_path.as_deref());
    let size = Size::new(settings.display_width, settings.display_height);
    info!("Starting turtle simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        size.width, size.height, settings.window_scale
    );

    let atlas = assets::build_atlas(&settings.phone);
    let media = SyntheticMedia::scan(&settings.video_dir(), settings.clip_seconds);
    let storage = FileStorage::in_dir(&settings.data_dir);
    info!("Interactions stored at {}", storage.path().display());

    let mut phone = Phone::new(settings.phone.clone(), media, storage)
        .with_captions(load_captions(&settings.captions_path()));
    phone.resize(size.width as f32, size.height as f32);

    let mut translator = InputTranslator::new(size.width, size.height);
    let mut framebuffer = FrameBuffer::new(size);
    let mut display = SimulatorDisplay::<Rgb565>::new(size);

    let mut fullscreen = false;
    let mut window = open_window(settings.window_scale);
    // The SDL window is created on the first `update()`; `events()` panics
    // before that.
    window.update(&display);

    let mut last_tick = Instant::now();

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        let mut toggle = false;
        for event in window.events() {
            match translator.translate(event) {
                HostAction::Quit => break 'running,
                HostAction::ToggleFullscreen => toggle = !toggle,
                HostAction::Phone(input) => {
                    phone.on_event(&input);
                }
                HostAction::Ignore => {}
            }
        }
        if toggle {
            fullscreen = !fullscreen;
            let scale = if fullscreen {
                settings.fullscreen_scale
            } else {
                settings.window_scale
            };
            info!("Window scale {}×", scale);
            window = open_window(scale);
            // Force a full redraw into the new window
            display = SimulatorDisplay::new(size);
            framebuffer = FrameBuffer::new(size);
        }

        // --- Tick ---------------------------------------------------------
        let now = Instant::now();
        phone.update(now.duration_since(last_tick).as_secs_f32());
        last_tick = now;

        // --- Render -------------------------------------------------------
        let _ = framebuffer.clear(Rgb565::BLACK);
        let mut canvas = Canvas::new(&mut framebuffer, &atlas);
        if let Err(e) = phone
            .draw(&mut canvas)
            .and_then(|()| translator.controls().draw(&mut canvas))
        {
            error!("Draw error: {:?}", e);
        }
        if let Err(e) = framebuffer.flush(&mut display) {
            error!("Flush error: {:?}", e);
        }
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
