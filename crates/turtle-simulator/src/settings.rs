//! Host settings, read from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use turtle_core::PhoneConfig;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Simulated display size in pixels
    pub display_width: u32,
    pub display_height: u32,

    /// Window pixel scale, windowed and "fullscreen"
    pub window_scale: u32,
    pub fullscreen_scale: u32,

    /// Root holding `video/zasora` and `stories/phrases.json`
    pub assets_dir: PathBuf,

    /// Where the interaction file is written
    pub data_dir: PathBuf,

    /// Length of every synthetic clip in seconds
    pub clip_seconds: f32,

    /// Keys given here override the simulator's phone defaults
    #[serde(deserialize_with = "phone_over_simulator_defaults")]
    pub phone: PhoneConfig,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            display_width: 960,
            display_height: 540,
            window_scale: 1,
            fullscreen_scale: 2,
            assets_dir: PathBuf::from("assets"),
            data_dir: PathBuf::from("data"),
            clip_seconds: 6.0,
            phone: simulator_phone(),
        }
    }
}

/// Phone laid out for the default 960x540 display.
fn simulator_phone() -> PhoneConfig {
    PhoneConfig {
        reference_width: 960.0,
        reference_height: 540.0,
        ..PhoneConfig::default()
    }
}

fn phone_over_simulator_defaults<'de, D>(deserializer: D) -> Result<PhoneConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = Map::<String, Value>::deserialize(deserializer)?;
    let mut merged = match serde_json::to_value(simulator_phone()).map_err(D::Error::custom)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(overrides);
    serde_json::from_value(Value::Object(merged)).map_err(D::Error::custom)
}

impl SimulatorSettings {
    /// Read settings from `path`, falling back to defaults when there is no
    /// path or the file cannot be used.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn video_dir(&self) -> PathBuf {
        self.assets_dir.join("video").join("zasora")
    }

    pub fn captions_path(&self) -> PathBuf {
        self.assets_dir.join("stories").join("phrases.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: SimulatorSettings =
            serde_json::from_str(r#"{"window_scale": 2, "phone": {"boot_duration": 0.5}}"#)
                .unwrap();
        assert_eq!(settings.window_scale, 2);
        assert_eq!(settings.display_width, 960);
        assert_eq!(settings.phone.boot_duration, 0.5);
        assert_eq!(settings.phone.power_cooldown, 0.3);
        assert_eq!(settings.phone.reference_width, 960.0);
        assert_eq!(settings.phone.reference_height, 540.0);
    }

    #[test]
    fn test_phone_reference_can_be_overridden() {
        let settings: SimulatorSettings =
            serde_json::from_str(r#"{"phone": {"reference_height": 1080.0}}"#).unwrap();
        assert_eq!(settings.phone.reference_height, 1080.0);
        assert_eq!(settings.phone.reference_width, 960.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = SimulatorSettings::load(Some(Path::new("/nonexistent/turtle.json")));
        assert_eq!(settings, SimulatorSettings::default());
    }

    #[test]
    fn test_asset_paths() {
        let settings = SimulatorSettings::default();
        assert_eq!(settings.video_dir(), Path::new("assets/video/zasora"));
        assert_eq!(
            settings.captions_path(),
            Path::new("assets/stories/phrases.json")
        );
    }
}
