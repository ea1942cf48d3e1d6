//! 多模态分类模块 — 根据声明的媒体类型与文件名确定内容类别
//!
//! Content classification for submitted inputs.
//! Provides:
//! - The closed set of content categories the estimators understand
//! - Classification from a declared media type and a file name
//! - The breakdown bucket each category contributes to

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::tokens::Bucket;

/// File extensions treated as source code.
pub const CODE_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".py", ".html", ".css", ".json", ".java", ".cpp", ".c", ".rs",
    ".go",
];

static CODE_EXTENSION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CODE_EXTENSIONS.iter().copied().collect());

/// Content category assigned to an item once, at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Text,
    Code,
    Image,
    Video,
    Audio,
    Pdf,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 6] = [
        Self::Text,
        Self::Code,
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Pdf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
        }
    }

    /// Breakdown bucket receiving this category's tokens. Code shares the
    /// text bucket, PDF shares the images bucket.
    pub fn bucket(&self) -> Bucket {
        match self {
            Self::Text | Self::Code => Bucket::Text,
            Self::Image | Self::Pdf => Bucket::Images,
            Self::Video => Bucket::Video,
            Self::Audio => Bucket::Audio,
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an input from its declared media type and file name.
///
/// First match wins: `image/*`, `video/*`, `audio/*`, `application/pdf`,
/// a source-code extension, then text as the fallback. Total over all inputs.
pub fn classify(media_type: &str, file_name: &str) -> ContentCategory {
    if media_type.starts_with("image/") {
        return ContentCategory::Image;
    }
    if media_type.starts_with("video/") {
        return ContentCategory::Video;
    }
    if media_type.starts_with("audio/") {
        return ContentCategory::Audio;
    }
    if media_type == "application/pdf" {
        return ContentCategory::Pdf;
    }
    if has_code_extension(file_name) {
        return ContentCategory::Code;
    }
    ContentCategory::Text
}

fn has_code_extension(file_name: &str) -> bool {
    match file_name.rfind('.') {
        Some(idx) => CODE_EXTENSION_SET.contains(&file_name[idx..]),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_prefixes() {
        assert_eq!(classify("image/png", "a.png"), ContentCategory::Image);
        assert_eq!(classify("video/mp4", "a.mp4"), ContentCategory::Video);
        assert_eq!(classify("audio/mpeg", "a.mp3"), ContentCategory::Audio);
        assert_eq!(classify("application/pdf", "a.pdf"), ContentCategory::Pdf);
    }

    #[test]
    fn test_media_type_wins_over_extension() {
        // A declared image named like source code is still an image.
        assert_eq!(classify("image/svg+xml", "icon.js"), ContentCategory::Image);
        assert_eq!(classify("application/json", "data.json"), ContentCategory::Code);
    }

    #[test]
    fn test_pdf_requires_exact_media_type() {
        assert_eq!(
            classify("application/pdf+xml", "doc.txt"),
            ContentCategory::Text
        );
    }

    #[test]
    fn test_code_extensions() {
        for ext in CODE_EXTENSIONS {
            let name = format!("file{ext}");
            assert_eq!(classify("", &name), ContentCategory::Code, "{name}");
        }
        assert_eq!(classify("text/plain", "main.rs"), ContentCategory::Code);
        // Case-sensitive suffix match
        assert_eq!(classify("", "MAIN.RS"), ContentCategory::Text);
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(classify("", ""), ContentCategory::Text);
        assert_eq!(classify("text/markdown", "README.md"), ContentCategory::Text);
        assert_eq!(classify("application/octet-stream", "Makefile"), ContentCategory::Text);
    }

    #[test]
    fn test_buckets() {
        assert_eq!(ContentCategory::Code.bucket(), Bucket::Text);
        assert_eq!(ContentCategory::Pdf.bucket(), Bucket::Images);
        assert_eq!(ContentCategory::Video.bucket(), Bucket::Video);
        assert_eq!(ContentCategory::Audio.bucket(), Bucket::Audio);
    }
}
