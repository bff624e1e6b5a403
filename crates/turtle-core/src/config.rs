//! Tunable sizes and durations for the phone and its apps.
//!
//! Every value has a default, so a partial JSON document (or none at all)
//! produces a working configuration.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhoneConfig {
    /// Unscaled phone body size
    pub phone_width: f32,
    pub phone_height: f32,

    /// Window size the phone body was designed for
    pub reference_width: f32,
    pub reference_height: f32,

    /// Extra multiplier applied on top of the height ratio
    pub scale_boost: f32,

    /// Seconds spent in `Booting` before the phone turns on
    pub boot_duration: f32,

    /// Seconds the power button stays blocked after shutting down
    pub power_cooldown: f32,

    /// Unscaled hardware button edge and its distance from the window edge
    pub button_size: f32,
    pub button_margin: f32,

    /// App viewport, in body-local units measured from the body's bottom-left
    pub app_offset_x: f32,
    pub app_offset_y: f32,
    pub app_width: f32,
    pub app_height: f32,

    pub icon_size: f32,
    pub icon_text_height: f32,

    pub feed_header_height: f32,

    /// Pointer travel below which a release counts as a tap
    pub tap_slop: f32,

    /// Fraction of the video height a swipe must travel to change clips
    pub swipe_commit_ratio: f32,

    pub comment_max_chars: usize,

    /// Fixed seed for the playlist shuffle; entropy when unset
    pub shuffle_seed: Option<u64>,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            phone_width: 400.0,
            phone_height: 640.0,
            reference_width: 1920.0,
            reference_height: 1080.0,
            scale_boost: 1.1,
            boot_duration: 1.0,
            power_cooldown: 0.3,
            button_size: 64.0,
            button_margin: 20.0,
            app_offset_x: 70.0,
            app_offset_y: 90.0,
            app_width: 230.0,
            app_height: 435.0,
            icon_size: 40.0,
            icon_text_height: 20.0,
            feed_header_height: 60.0,
            tap_slop: 10.0,
            swipe_commit_ratio: 0.25,
            comment_max_chars: 50,
            shuffle_seed: None,
        }
    }
}

impl PhoneConfig {
    /// Uniform scale applied to the phone body and everything drawn on it.
    pub fn scale(&self) -> f32 {
        self.reference_height / self.phone_height * self.scale_boost
    }
}
