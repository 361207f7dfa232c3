use log::{debug, error, info, warn};
use std::fs;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{
    systems::frame_stepping::DEFAULT_FPS,
    tracking::{AnkleSelector, LEFT_ANKLE_INDEX, RIGHT_ANKLE_INDEX},
};

/// Empirical value for the original demo footage, in pixels per second.
/// It depends on video resolution, so it is only a starting point.
pub const DEFAULT_STABILITY_THRESHOLD: f64 = 200.;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Max absolute ankle velocity (px/s) that still counts as "slow"
    pub stability_threshold: f64,

    /// Frame rate used for stepping and frame numbering
    pub fps: f64,

    pub left_ankle_index: usize,
    pub right_ankle_index: usize,

    /// Ignore ankles whose keypoint score is below this, if set
    pub min_keypoint_score: Option<f64>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            stability_threshold: DEFAULT_STABILITY_THRESHOLD,
            fps: DEFAULT_FPS,
            left_ankle_index: LEFT_ANKLE_INDEX,
            right_ankle_index: RIGHT_ANKLE_INDEX,
            min_keypoint_score: None,
        }
    }
}

impl DetectorConfig {
    pub fn ankle_selector(&self) -> AnkleSelector {
        AnkleSelector {
            left_index: self.left_ankle_index,
            right_index: self.right_ankle_index,
            min_score: self.min_keypoint_score,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.stability_threshold >= 0.) {
            return Err(anyhow!(
                "Stability threshold must be non-negative, got {}",
                self.stability_threshold
            ));
        }
        if !(self.fps > 0.) {
            return Err(anyhow!("Frame rate must be above 0, got {}", self.fps));
        }
        Ok(())
    }

    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        info!("Current state of config: {:?}", self);
        let text = serde_json::to_string_pretty(self)?;
        match fs::write(config_file_path, text) {
            Ok(()) => {
                info!("Wrote config to file: {:?}", config_file_path);
                Ok(())
            }
            Err(e) => {
                error!("Error writing config to file: {:?}", e);
                Err(anyhow!("Failed to write config to {}: {}", config_file_path, e))
            }
        }
    }
}

pub fn load_config_from_file(config_file_path: &str) -> Result<DetectorConfig> {
    let config = DetectorConfig::default();
    debug!("Created init config object {:?}", config);

    match fs::read_to_string(config_file_path) {
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                warn!(
                    "Detector Config file not found at {}, using defaults",
                    &config_file_path
                );
                Ok(config)
            } else {
                Err(anyhow!("Failed to load Detector Config from disk: {}", e))
            }
        }
        Ok(s) => {
            info!("Loaded Detector config OK from \"{}\"", config_file_path);
            match serde_json::from_str::<DetectorConfig>(&s) {
                Ok(loaded_config) => {
                    debug!("Config parsed data from file: {:?}", &loaded_config);
                    loaded_config.validate()?;
                    Ok(loaded_config)
                }
                Err(e) => Err(anyhow!("Failed to parse config data: {}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("ankle-cut-{}-{}.json", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from_file(&temp_path("missing")).unwrap();
        assert_eq!(config, DetectorConfig::default());
        assert_eq!(config.stability_threshold, 200.);
        assert_eq!(config.fps, 24.);
    }

    #[test]
    fn test_write_then_load() {
        let path = temp_path("roundtrip");
        let config = DetectorConfig {
            stability_threshold: 35.5,
            min_keypoint_score: Some(0.3),
            ..Default::default()
        };
        config.write_config_to_file(&path).unwrap();
        let loaded = load_config_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_and_bad_config() {
        let partial: DetectorConfig = serde_json::from_str(r#"{"stabilityThreshold": 12}"#).unwrap();
        assert_eq!(partial.stability_threshold, 12.);
        assert_eq!(partial.left_ankle_index, 15);

        let path = temp_path("bad");
        fs::write(&path, "not json").unwrap();
        let result = load_config_from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(result.is_err());

        let negative = DetectorConfig {
            stability_threshold: -1.,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }
}
