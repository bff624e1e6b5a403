//! Platform-independent core of the turtle phone
//!
//! This crate holds everything the phone does apart from talking to a real
//! window: the power/boot state machine, input routing, layout, the
//! calculator and the short-video feed, plus the persistence of likes and
//! comments. Rendering goes through any embedded-graphics
//! `DrawTarget<Color = Rgb565>`, so the same code draws into the simulator
//! window and into the in-memory [`framebuffer::FrameBuffer`] used by tests.
//!
//! Media playback and textures are supplied by the host through the
//! [`media::MediaBackend`] and [`assets::TextureProvider`] traits.

pub mod apps;
pub mod assets;
pub mod config;
pub mod framebuffer;
pub mod media;
pub mod phone;
pub mod storage;
pub mod ui;

pub use config::PhoneConfig;
pub use phone::{Phone, PhoneState};
