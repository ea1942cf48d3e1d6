//! Estimation configuration
//!
//! Holds the session-wide settings consulted by the estimators. Values are
//! validated on every mutation so the estimators never see an invalid fps.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, ErrorContext};
use crate::types::{ModelVersion, ResolutionTier};

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV_VAR: &str = "TOKEN_ESTIMATOR_CONFIG";

pub const DEFAULT_VIDEO_FPS: f64 = 1.0;

fn default_video_fps() -> f64 {
    DEFAULT_VIDEO_FPS
}

/// Session-wide estimation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    model_version: ModelVersion,
    #[serde(default)]
    default_resolution_tier: ResolutionTier,
    #[serde(default = "default_video_fps")]
    video_fps: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            model_version: ModelVersion::default(),
            default_resolution_tier: ResolutionTier::default(),
            video_fps: DEFAULT_VIDEO_FPS,
        }
    }
}

impl Configuration {
    pub fn new(
        model_version: ModelVersion,
        default_resolution_tier: ResolutionTier,
        video_fps: f64,
    ) -> crate::Result<Self> {
        validate_fps(video_fps, "video_fps")?;
        Ok(Self {
            model_version,
            default_resolution_tier,
            video_fps,
        })
    }

    pub fn model_version(&self) -> ModelVersion {
        self.model_version
    }

    pub fn default_resolution_tier(&self) -> ResolutionTier {
        self.default_resolution_tier
    }

    pub fn video_fps(&self) -> f64 {
        self.video_fps
    }

    pub fn set_model_version(&mut self, version: ModelVersion) {
        self.model_version = version;
    }

    pub fn set_default_resolution_tier(&mut self, tier: ResolutionTier) {
        self.default_resolution_tier = tier;
    }

    /// Rejects non-finite or non-positive rates and leaves the current value
    /// untouched.
    pub fn set_video_fps(&mut self, fps: f64) -> crate::Result<()> {
        validate_fps(fps, "video_fps")?;
        self.video_fps = fps;
        Ok(())
    }

    pub fn with_model_version(mut self, version: ModelVersion) -> Self {
        self.model_version = version;
        self
    }

    pub fn with_default_resolution_tier(mut self, tier: ResolutionTier) -> Self {
        self.default_resolution_tier = tier;
        self
    }

    pub fn with_video_fps(mut self, fps: f64) -> crate::Result<Self> {
        self.set_video_fps(fps)?;
        Ok(self)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        let config: Configuration = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_source(path.display().to_string()),
            },
            other => other,
        })
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_fps(self.video_fps, "video_fps")
    }
}

/// Frame sampling rates must be finite and strictly positive.
pub(crate) fn validate_fps(fps: f64, field: &str) -> crate::Result<()> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(Error::configuration_with_context(
            "frame sampling rate must be a positive number",
            ErrorContext::new()
                .with_field_path(field)
                .with_details(format!("got {fps}")),
        ))
    }
}
