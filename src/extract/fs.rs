//! Filesystem-backed metadata extraction.

use async_trait::async_trait;
use std::io::Cursor;
use std::path::Path;

use super::{from_declared, missing, MetadataExtractor, RawItem};
use crate::multimodal::ContentCategory;
use crate::types::ItemAttributes;

/// Reads text content and image headers from disk.
///
/// Declared metadata wins when complete. Media durations are never probed,
/// so video and audio need a declared `duration_secs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsExtractor;

impl FsExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetadataExtractor for FsExtractor {
    async fn extract(
        &self,
        raw: &RawItem,
        category: ContentCategory,
    ) -> crate::Result<ItemAttributes> {
        if let Some(attrs) = from_declared(raw, category) {
            return Ok(attrs);
        }
        let Some(path) = raw.path.as_deref() else {
            return Err(missing(raw, category));
        };

        match category {
            ContentCategory::Text | ContentCategory::Code => read_text(path).await,
            ContentCategory::Image => read_image_dimensions(path).await,
            ContentCategory::Video | ContentCategory::Audio | ContentCategory::Pdf => {
                Err(missing(raw, category))
            }
        }
    }
}

async fn read_text(path: &Path) -> crate::Result<ItemAttributes> {
    let bytes = tokio::fs::read(path).await?;
    Ok(ItemAttributes::text(String::from_utf8_lossy(&bytes)))
}

async fn read_image_dimensions(path: &Path) -> crate::Result<ItemAttributes> {
    let bytes = tokio::fs::read(path).await?;
    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(ItemAttributes::Image { width, height })
}
