use std::io::ErrorKind;
use std::path::Path;

use sdf_texture_renderer::{FillMode, SdfConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TextureToolsError;

/// Persisted generator settings, stored as a flat JSON object under fixed keys.
///
/// Missing keys take their default value and unknown keys are ignored, so settings files
/// written by older or newer versions still load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Integer code of the [`FillMode`].
    #[serde(rename = "SDFGenerator_RGBFillMode")]
    pub fill_mode: i32,

    #[serde(rename = "SDFGenerator_InsideDistance")]
    pub inside_distance: f32,

    #[serde(rename = "SDFGenerator_OutsideDistance")]
    pub outside_distance: f32,

    #[serde(rename = "SDFGenerator_PostProcessDistance")]
    pub post_process_distance: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from_config(&SdfConfig::default())
    }
}

impl Settings {
    #[must_use]
    pub fn from_config(config: &SdfConfig) -> Self {
        Settings {
            fill_mode: config.fill_mode.code(),
            inside_distance: config.inside_distance,
            outside_distance: config.outside_distance,
            post_process_distance: config.post_process_radius,
        }
    }

    /// Overlays these settings on `config`. Fields that are not persisted are kept.
    #[must_use]
    pub fn apply_to(&self, config: SdfConfig) -> SdfConfig {
        SdfConfig {
            fill_mode: FillMode::from_code(self.fill_mode),
            inside_distance: self.inside_distance,
            outside_distance: self.outside_distance,
            post_process_radius: self.post_process_distance,
            ..config
        }
    }

    #[must_use]
    pub fn to_config(&self) -> SdfConfig {
        self.apply_to(SdfConfig::default())
    }
}

/// Loads settings from a JSON file. A missing file yields the default settings.
pub async fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, TextureToolsError> {
    let path = path.as_ref();
    match tokio::fs::read(path).await {
        Ok(data) => Ok(serde_json::from_slice(&data)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file; using defaults");
            Ok(Settings::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes settings to a JSON file, replacing any existing file.
pub async fn save_settings<P: AsRef<Path>>(
    path: P,
    settings: &Settings,
) -> Result<(), TextureToolsError> {
    let data = serde_json::to_vec_pretty(settings)?;
    tokio::fs::write(path, data).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use sdf_texture_renderer::{DistanceStrategy, FillMode, SdfConfig};

    #[test]
    fn test_defaults_match_config_defaults() {
        assert_eq!(Settings::default().to_config(), SdfConfig::default());
    }

    #[test]
    fn test_missing_and_unknown_keys() {
        let settings: Settings = serde_json::from_str(
            r#"{"SDFGenerator_InsideDistance": 4.5, "SomethingElse": true}"#,
        )
        .unwrap();

        assert_eq!(settings.inside_distance, 4.5);
        assert_eq!(settings.outside_distance, 8.0);
        assert_eq!(settings.fill_mode, FillMode::SolidWhite.code());
    }

    #[test]
    fn test_unknown_fill_mode_code() {
        let settings: Settings = serde_json::from_str(r#"{"SDFGenerator_RGBFillMode": 17}"#).unwrap();
        assert_eq!(settings.to_config().fill_mode, FillMode::SolidWhite);
    }

    #[test]
    fn test_apply_keeps_strategy() {
        let settings = Settings {
            fill_mode: FillMode::SourceRgb.code(),
            inside_distance: 2.0,
            outside_distance: 3.0,
            post_process_distance: 1.0,
        };
        let config = settings.apply_to(SdfConfig {
            strategy: DistanceStrategy::Transform,
            ..SdfConfig::default()
        });

        assert_eq!(config.fill_mode, FillMode::SourceRgb);
        assert_eq!(config.post_process_radius, 1.0);
        assert_eq!(config.strategy, DistanceStrategy::Transform);
        assert_eq!(Settings::from_config(&config), settings);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["SDFGenerator_RGBFillMode"], 0);
        assert_eq!(object["SDFGenerator_InsideDistance"], 8.0);
        assert_eq!(object["SDFGenerator_OutsideDistance"], 8.0);
        assert_eq!(object["SDFGenerator_PostProcessDistance"], 0.0);
    }
}
