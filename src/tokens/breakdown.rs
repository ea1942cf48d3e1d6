//! Aggregation of per-item estimates into a categorized total.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::counter::estimate_text;
use super::media::{audio_tokens, image_tokens, pdf_tokens, video_tokens};
use crate::config::Configuration;
use crate::multimodal::ContentCategory;
use crate::types::{Item, ItemAttributes, ResolutionTier};

/// Fixed request framing cost added once per aggregate.
pub const PROTOCOL_OVERHEAD_TOKENS: usize = 10;

/// Breakdown bucket. Code folds into text, PDF folds into images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Text,
    Images,
    Video,
    Audio,
    Overhead,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Self::Text,
        Self::Images,
        Self::Video,
        Self::Audio,
        Self::Overhead,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text & Code",
            Self::Images => "Images & PDF",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Overhead => "Overhead",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Token totals for the fixed five-bucket set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub text: usize,
    pub images: usize,
    pub video: usize,
    pub audio: usize,
    pub overhead: usize,
}

impl CategoryTotals {
    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Text => self.text,
            Bucket::Images => self.images,
            Bucket::Video => self.video,
            Bucket::Audio => self.audio,
            Bucket::Overhead => self.overhead,
        }
    }

    fn slot(&mut self, bucket: Bucket) -> &mut usize {
        match bucket {
            Bucket::Text => &mut self.text,
            Bucket::Images => &mut self.images,
            Bucket::Video => &mut self.video,
            Bucket::Audio => &mut self.audio,
            Bucket::Overhead => &mut self.overhead,
        }
    }

    /// Saturates at `usize::MAX` rather than overflowing.
    pub fn add(&mut self, bucket: Bucket, tokens: usize) {
        let slot = self.slot(bucket);
        *slot = slot.saturating_add(tokens);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, usize)> + '_ {
        Bucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn sum(&self) -> usize {
        self.iter().fold(0usize, |acc, (_, n)| acc.saturating_add(n))
    }
}

/// Snapshot of the estimate for a set of items under one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenBreakdown {
    pub total: usize,
    pub per_category: CategoryTotals,
}

/// Contribution of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContribution {
    pub bucket: Bucket,
    pub tokens: usize,
}

/// Resolution tier applied to an image or PDF item.
pub fn effective_tier(item: &Item, config: &Configuration) -> ResolutionTier {
    item.overrides
        .resolution_tier
        .unwrap_or_else(|| config.default_resolution_tier())
}

/// Frame sampling rate applied to a video item.
pub fn effective_fps(item: &Item, config: &Configuration) -> f64 {
    item.overrides.fps.unwrap_or_else(|| config.video_fps())
}

/// Estimate one item. `None` while its attributes are unavailable (pending
/// or failed extraction).
pub fn item_tokens(item: &Item, config: &Configuration) -> Option<ItemContribution> {
    let attrs = item.attributes()?;
    let version = config.model_version();

    let tokens = match item.category {
        ContentCategory::Text | ContentCategory::Code => {
            let ItemAttributes::Text { content } = attrs else {
                return None;
            };
            estimate_text(content, item.category == ContentCategory::Code)
        }
        ContentCategory::Image => {
            let ItemAttributes::Image { width, height } = *attrs else {
                return None;
            };
            image_tokens(version, width, height, effective_tier(item, config))
        }
        ContentCategory::Video => {
            let ItemAttributes::Video { duration_secs } = *attrs else {
                return None;
            };
            video_tokens(version, duration_secs, effective_fps(item, config), true)
        }
        ContentCategory::Audio => {
            let ItemAttributes::Audio { duration_secs } = *attrs else {
                return None;
            };
            audio_tokens(duration_secs)
        }
        ContentCategory::Pdf => {
            let ItemAttributes::Pdf { page_count } = *attrs else {
                return None;
            };
            pdf_tokens(version, page_count, effective_tier(item, config))
        }
    };

    Some(ItemContribution {
        bucket: item.category.bucket(),
        tokens,
    })
}

/// Sum every item into its bucket and add the protocol overhead.
///
/// Pure and order-independent. Items without attributes contribute zero.
pub fn aggregate<'a, I>(items: I, config: &Configuration) -> TokenBreakdown
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut per_category = CategoryTotals::default();
    for item in items {
        if let Some(c) = item_tokens(item, config) {
            per_category.add(c.bucket, c.tokens);
        }
    }
    per_category.add(Bucket::Overhead, PROTOCOL_OVERHEAD_TOKENS);

    TokenBreakdown {
        total: per_category.sum(),
        per_category,
    }
}
