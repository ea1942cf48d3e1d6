//! 元数据提取模块：从原始输入中读取文本内容、像素尺寸、时长与页数。
//!
//! # Metadata Extraction
//!
//! The estimators never read files. This module describes raw inputs
//! ([`RawItem`]) and the asynchronous collaborator ([`MetadataExtractor`])
//! that turns one into [`ItemAttributes`]. Each extraction is independent;
//! a failure only affects its own item.
//!
//! | Extractor | Source |
//! |-----------|--------|
//! | [`DeclaredExtractor`] | Metadata declared alongside the item (manifests, tests) |
//! | [`FsExtractor`] | Files on disk, falling back to declared metadata |

mod fs;

pub use fs::FsExtractor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::multimodal::{classify, ContentCategory, CODE_EXTENSIONS};
use crate::types::ItemAttributes;

/// Page count assumed for a PDF when none is known.
pub const DEFAULT_PDF_PAGE_COUNT: u32 = 1;

/// Metadata supplied by the caller instead of being probed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclaredMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

/// A raw input as submitted, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub name: String,
    /// Declared media type, e.g. `image/png`. May be empty.
    #[serde(default)]
    pub media_type: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub declared: DeclaredMetadata,
}

impl RawItem {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            path: None,
            declared: DeclaredMetadata::default(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_declared(mut self, declared: DeclaredMetadata) -> Self {
        self.declared = declared;
        self
    }

    /// Describe a file on disk. The media type is guessed from the extension;
    /// source files are declared as `text/plain` so that extensions such as
    /// `.ts` are not mistaken for media containers.
    pub async fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = if CODE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            "text/plain".to_string()
        } else {
            mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        };
        Ok(Self::new(name, media_type, metadata.len()).with_path(path))
    }

    pub fn category(&self) -> ContentCategory {
        classify(&self.media_type, &self.name)
    }
}

/// Asynchronous metadata collaborator. One outcome per call.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(
        &self,
        raw: &RawItem,
        category: ContentCategory,
    ) -> crate::Result<ItemAttributes>;
}

/// Builds attributes purely from [`DeclaredMetadata`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredExtractor;

#[async_trait]
impl MetadataExtractor for DeclaredExtractor {
    async fn extract(
        &self,
        raw: &RawItem,
        category: ContentCategory,
    ) -> crate::Result<ItemAttributes> {
        from_declared(raw, category).ok_or_else(|| missing(raw, category))
    }
}

/// Attributes available from the declaration alone, if complete.
pub(crate) fn from_declared(raw: &RawItem, category: ContentCategory) -> Option<ItemAttributes> {
    let d = &raw.declared;
    match category {
        ContentCategory::Text | ContentCategory::Code => d.content.clone().map(ItemAttributes::text),
        ContentCategory::Image => match (d.width, d.height) {
            (Some(width), Some(height)) => Some(ItemAttributes::Image { width, height }),
            _ => None,
        },
        ContentCategory::Video => d
            .duration_secs
            .map(|duration_secs| ItemAttributes::Video { duration_secs }),
        ContentCategory::Audio => d
            .duration_secs
            .map(|duration_secs| ItemAttributes::Audio { duration_secs }),
        ContentCategory::Pdf => Some(ItemAttributes::Pdf {
            page_count: d.page_count.unwrap_or(DEFAULT_PDF_PAGE_COUNT),
        }),
    }
}

pub(crate) fn missing(raw: &RawItem, category: ContentCategory) -> Error {
    let needed = match category {
        ContentCategory::Text | ContentCategory::Code => "content",
        ContentCategory::Image => "width and height",
        ContentCategory::Video | ContentCategory::Audio => "duration_secs",
        ContentCategory::Pdf => "page_count",
    };
    Error::extraction(&raw.name, format!("no {needed} available for {category} item"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_declared_extractor() {
        let raw = RawItem::new("clip.mp4", "video/mp4", 1024).with_declared(DeclaredMetadata {
            duration_secs: Some(12.5),
            ..Default::default()
        });
        let attrs = DeclaredExtractor
            .extract(&raw, raw.category())
            .await
            .unwrap();
        assert_eq!(attrs, ItemAttributes::Video { duration_secs: 12.5 });
    }

    #[tokio::test]
    async fn test_declared_extractor_missing_fields() {
        let raw = RawItem::new("photo.jpg", "image/jpeg", 1).with_declared(DeclaredMetadata {
            width: Some(640),
            ..Default::default()
        });
        let err = DeclaredExtractor.extract(&raw, raw.category()).await.unwrap_err();
        assert!(matches!(err, Error::Extraction { .. }));
        assert!(err.to_string().contains("width and height"));
    }

    #[test]
    fn test_pdf_page_count_defaults_to_one() {
        let raw = RawItem::new("doc.pdf", "application/pdf", 1);
        assert_eq!(
            from_declared(&raw, ContentCategory::Pdf),
            Some(ItemAttributes::Pdf { page_count: 1 })
        );
    }

    #[test]
    fn test_raw_item_yaml_shape() {
        let raw: RawItem = serde_yaml::from_str(
            "name: intro.mp3\nmedia_type: audio/mpeg\nsize: 4096\nduration_secs: 30\n",
        )
        .unwrap();
        assert_eq!(raw.category(), ContentCategory::Audio);
        assert_eq!(raw.declared.duration_secs, Some(30.0));
        assert!(raw.path.is_none());
    }
}
