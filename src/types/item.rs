//! Input items and their extraction state.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::model::ResolutionTier;
use crate::error::{Error, ErrorContext};
use crate::multimodal::ContentCategory;

/// Opaque, unique identity of an item within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category-specific attributes produced by metadata extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemAttributes {
    /// Full content of a text or code item.
    Text { content: String },
    Image { width: u32, height: u32 },
    Video { duration_secs: f64 },
    Audio { duration_secs: f64 },
    Pdf { page_count: u32 },
}

impl ItemAttributes {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Check that the attributes belong to `category` and lie in the range
    /// the estimators accept.
    pub fn validate_for(&self, category: ContentCategory) -> crate::Result<()> {
        let matches_category = matches!(
            (category, self),
            (ContentCategory::Text | ContentCategory::Code, Self::Text { .. })
                | (ContentCategory::Image, Self::Image { .. })
                | (ContentCategory::Video, Self::Video { .. })
                | (ContentCategory::Audio, Self::Audio { .. })
                | (ContentCategory::Pdf, Self::Pdf { .. })
        );
        if !matches_category {
            return Err(Error::validation_with_context(
                format!("{} attributes do not apply to a {} item", self.kind(), category),
                ErrorContext::new().with_field_path("attributes.kind"),
            ));
        }

        match *self {
            Self::Image { width, height } if width == 0 || height == 0 => {
                Err(Error::validation_with_context(
                    "image dimensions must be positive",
                    ErrorContext::new()
                        .with_field_path("attributes.width/height")
                        .with_details(format!("{width}x{height}")),
                ))
            }
            Self::Video { duration_secs } | Self::Audio { duration_secs }
                if !duration_secs.is_finite() || duration_secs < 0.0 =>
            {
                Err(Error::validation_with_context(
                    "duration must be a finite, non-negative number of seconds",
                    ErrorContext::new()
                        .with_field_path("attributes.duration_secs")
                        .with_details(duration_secs.to_string()),
                ))
            }
            Self::Pdf { page_count: 0 } => Err(Error::validation_with_context(
                "page count must be at least 1",
                ErrorContext::new().with_field_path("attributes.page_count"),
            )),
            _ => Ok(()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
            Self::Audio { .. } => "audio",
            Self::Pdf { .. } => "pdf",
        }
    }
}

/// Where an item stands in its metadata extraction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExtractionState {
    /// Extraction not yet finished; contributes zero tokens.
    #[default]
    Pending,
    Ready(ItemAttributes),
    /// Extraction failed; contributes zero tokens until the item is removed.
    Failed { reason: String },
}

impl ExtractionState {
    pub fn attributes(&self) -> Option<&ItemAttributes> {
        match self {
            Self::Ready(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready(_) => "ready",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Per-item settings that take precedence over the session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemOverrides {
    /// Applies to images and PDF pages under Gemini 3.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_tier: Option<ResolutionTier>,
    /// Applies to video under Gemini 3.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
}

/// One input unit submitted for estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    pub category: ContentCategory,
    pub state: ExtractionState,
    #[serde(default)]
    pub overrides: ItemOverrides,
}

impl Item {
    /// Create a freshly classified item awaiting extraction.
    pub fn new(name: impl Into<String>, size: u64, category: ContentCategory) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            size,
            category,
            state: ExtractionState::Pending,
            overrides: ItemOverrides::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: ItemAttributes) -> Self {
        self.state = ExtractionState::Ready(attributes);
        self
    }

    pub fn with_overrides(mut self, overrides: ItemOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn attributes(&self) -> Option<&ItemAttributes> {
        self.state.attributes()
    }

    /// Human-readable size, e.g. `"12.3 KB"`.
    pub fn display_size(&self) -> String {
        format!("{:.1} KB", self.size as f64 / 1024.0)
    }
}
