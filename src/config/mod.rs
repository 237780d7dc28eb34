use crate::color::ConversionMode;
use crate::logging::LoggingConfig;
use crate::pixel::Rect;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lessons: LessonConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Inputs and coordinates used by the lesson runners
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub sample_row: usize,
    pub sample_col: usize,
    pub channel: usize,
    pub crop: Rect,
    pub paste: Rect,
    pub conversion: ConversionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBackend {
    #[default]
    Auto,
    HighGui,
    Snapshot,
}

impl FromStr for DisplayBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DisplayBackend::Auto),
            "highgui" | "window" => Ok(DisplayBackend::HighGui),
            "snapshot" | "headless" => Ok(DisplayBackend::Snapshot),
            other => Err(format!("unknown display backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub backend: DisplayBackend,
    /// Where the snapshot backend writes window images
    pub snapshot_dir: PathBuf,
    /// Key wait in milliseconds; 0 waits forever
    pub wait_delay_ms: u32,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("messi.jpg"),
            output_dir: PathBuf::from("."),
            sample_row: 187,
            sample_col: 332,
            channel: 0,
            crop: Rect::new(100, 300, 200, 400),
            paste: Rect::new(50, 250, 150, 350),
            conversion: ConversionMode::Bgr2Gray,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backend: DisplayBackend::Auto,
            snapshot_dir: PathBuf::from("windows"),
            wait_delay_ms: 0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        if content.trim_start().starts_with('{') {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Load and validate; any validation problems become one error
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::load_from_file(path)?;
        if let Err(errors) = config.validate() {
            anyhow::bail!("invalid configuration: {}", errors.join("; "));
        }
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ConfigFormat) -> Result<()> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let lessons = &self.lessons;

        if lessons.channel > 2 {
            errors.push(format!("channel must be 0-2, got {}", lessons.channel));
        }

        for (name, rect) in [("crop", &lessons.crop), ("paste", &lessons.paste)] {
            if rect.height() == 0 || rect.width() == 0 {
                errors.push(format!("{} rectangle {} is empty", name, rect));
            }
        }

        if (lessons.crop.height(), lessons.crop.width())
            != (lessons.paste.height(), lessons.paste.width())
        {
            errors.push(format!(
                "paste rectangle {} must have the same size as crop rectangle {}",
                lessons.paste, lessons.crop
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigFormat {
    Json,
    Toml,
}

pub fn load_config_or_default(config_path: Option<&Path>) -> Config {
    match config_path {
        Some(path) => match Config::load_validated(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from '{}': {:#}", path.display(), e);
                Config::default()
            }
        },
        None => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lessons.crop, Rect::new(100, 300, 200, 400));
        assert_eq!(config.lessons.conversion, ConversionMode::Bgr2Gray);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_text = r#"
            [lessons]
            input = "lena.png"
            crop = "0,10,0,20"
            paste = "5,15,5,25"
            conversion = "bgr2hsv"

            [display]
            backend = "snapshot"
        "#;
        let config: Config = toml::from_str(toml_text).unwrap();
        assert_eq!(config.lessons.input, PathBuf::from("lena.png"));
        assert_eq!(config.lessons.paste, Rect::new(5, 15, 5, 25));
        assert_eq!(config.lessons.conversion, ConversionMode::Bgr2Hsv);
        assert_eq!(config.lessons.sample_row, 187);
        assert_eq!(config.display.backend, DisplayBackend::Snapshot);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_conversion_in_config_is_rejected() {
        let toml_text = r#"
            [lessons]
            conversion = "BGR2LAB"
        "#;
        assert!(toml::from_str::<Config>(toml_text).is_err());
    }

    #[test]
    fn test_validation_catches_mismatched_rects() {
        let mut config = Config::default();
        config.lessons.paste = Rect::new(0, 10, 0, 10);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("same size"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.lessons.sample_row = 12;
        config.display.backend = DisplayBackend::Snapshot;

        for (name, format) in [("config.toml", ConfigFormat::Toml), ("config.json", ConfigFormat::Json)] {
            let path = dir.path().join(name);
            config.save_to_file(&path, format).unwrap();
            let loaded = Config::load_from_file(&path).unwrap();
            assert_eq!(loaded.lessons.sample_row, 12);
            assert_eq!(loaded.lessons.crop, config.lessons.crop);
            assert_eq!(loaded.display.backend, DisplayBackend::Snapshot);
        }
    }

    #[test]
    fn test_validation_rejects_alpha_channel() {
        let mut config = Config::default();
        config.lessons.channel = 2;
        assert!(config.validate().is_ok());

        config.lessons.channel = 3;
        let errors = config.validate().unwrap_err();
        assert_eq!(errors, vec!["channel must be 0-2, got 3".to_string()]);
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "lessons = 5").unwrap();
        let config = load_config_or_default(Some(&path));
        assert_eq!(config.lessons.sample_col, 332);
    }

    #[test]
    fn test_load_validated_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("imgfn.toml");
        fs::write(&path, "[lessons]\nchannel = 7\n").unwrap();

        let err = Config::load_validated(&path).unwrap_err();
        assert!(err.to_string().contains("channel must be 0-2"));
        assert!(Config::load_from_file(&path).is_ok());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("headless".parse::<DisplayBackend>().unwrap(), DisplayBackend::Snapshot);
        assert_eq!("HighGui".parse::<DisplayBackend>().unwrap(), DisplayBackend::HighGui);
        assert!("x11".parse::<DisplayBackend>().is_err());
    }
}
