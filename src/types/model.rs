//! Model generations and resolution tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model generation whose cost regime is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelVersion {
    /// Gemini 2.5 Flash / Pro: fixed 258-token tiling for images and PDF
    /// pages, continuous per-second video rate.
    #[serde(rename = "gemini-2.5")]
    Gemini25,
    /// Gemini 3.0 Flash / Pro: resolution tiers for images and PDF pages,
    /// frame-sampled video.
    #[default]
    #[serde(rename = "gemini-3.0")]
    Gemini30,
}

impl ModelVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini25 => "gemini-2.5",
            Self::Gemini30 => "gemini-3.0",
        }
    }

    /// Whether images and PDF pages are billed by resolution tier.
    pub fn uses_resolution_tiers(&self) -> bool {
        matches!(self, Self::Gemini30)
    }

    /// Whether video is billed by sampled frame count.
    pub fn uses_frame_sampling(&self) -> bool {
        matches!(self, Self::Gemini30)
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini-2.5" | "2.5" => Ok(Self::Gemini25),
            "gemini-3.0" | "gemini-3" | "3.0" | "3" => Ok(Self::Gemini30),
            other => Err(format!(
                "unknown model version '{other}' (expected gemini-2.5 or gemini-3.0)"
            )),
        }
    }
}

/// Discrete per-image cost bucket used by Gemini 3.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Thumbnails
    Low,
    /// Documents
    #[default]
    Medium,
    /// OCR / fine detail
    High,
}

impl ResolutionTier {
    /// Flat token cost of one image (or PDF page) at this tier.
    #[inline]
    pub fn token_cost(&self) -> usize {
        match self {
            Self::Low => 280,
            Self::Medium => 560,
            Self::High => 1120,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unknown resolution tier '{other}' (expected low, medium or high)"
            )),
        }
    }
}
