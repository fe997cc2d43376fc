//! Configuration system for nvcombine

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NvError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub hardware: HardwareConfig,
    pub debug: DebugConfig,
}

/// Hardware settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// 3D object class bound on the channel
    pub triangle_class: TriangleClass,
    /// Subchannel the 3D object is bound to
    pub subchannel: u8,
    /// Push buffer capacity in 32-bit words
    pub pushbuf_words: usize,
}

/// 3D engine object class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum TriangleClass {
    /// Two texture units with register combiners
    #[default]
    MultitexTriangle,
    /// Single texture unit, no combiners
    TexturedTriangle,
}

/// Debug settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
    /// Log every method written to the push buffer
    pub trace_pushbuf: bool,
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            triangle_class: TriangleClass::default(),
            subchannel: 3,
            pushbuf_words: 1024,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            trace_pushbuf: false,
        }
    }
}

impl Config {
    /// Load configuration from the default path, or create it if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| NvError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| NvError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nvcombine")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        // Subchannels are a 3-bit field in the method header.
        if self.hardware.subchannel > 7 {
            return Err(NvError::Config(format!(
                "subchannel {} out of range 0..=7",
                self.hardware.subchannel
            )));
        }
        if self.hardware.pushbuf_words == 0 {
            return Err(NvError::Config("pushbuf_words must be non-zero".to_string()));
        }
        Ok(())
    }
}
