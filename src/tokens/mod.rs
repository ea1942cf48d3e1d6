//! Token 估算模块：按内容类别与模型代际估算多模态输入的 Token 数量。
//!
//! # Token Estimation Module
//!
//! Pure estimators for every content category plus the aggregation step that
//! folds per-item estimates into a categorized total.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TokenCounter`] | Trait for text counting heuristics |
//! | [`CharacterEstimator`] | Character-ratio approximation (4.0 prose, 3.25 code) |
//! | [`CjkEstimator`] | Flat 0.7 tokens per character |
//! | [`image_tokens`] | Fixed tiling (2.5) or resolution tier (3.0) |
//! | [`video_tokens`] | Per-second (2.5) or per-frame (3.0) plus audio track |
//! | [`audio_tokens`] | 32 tokens per second |
//! | [`pdf_tokens`] | One image per page |
//! | [`aggregate`] | Per-bucket sums plus protocol overhead |
//! | [`ModelPricing`] | Input price per model generation |
//!
//! ## Example
//!
//! ```rust
//! use ai_token_estimator::tokens::{image_tokens, video_tokens, estimate_text};
//! use ai_token_estimator::types::{ModelVersion, ResolutionTier};
//!
//! assert_eq!(image_tokens(ModelVersion::Gemini25, 769, 769, ResolutionTier::Medium), 1032);
//! assert_eq!(video_tokens(ModelVersion::Gemini30, 10.0, 1.0, true), 1020);
//! assert_eq!(estimate_text("Hello, world!", false), 4);
//! ```
//!
//! ## Accuracy
//!
//! All figures are documented heuristics; none of them runs a real tokenizer.
//! Every fractional result is rounded up since partial tokens are billed.

mod breakdown;
mod counter;
mod media;
mod pricing;

pub use breakdown::{
    aggregate, effective_fps, effective_tier, item_tokens, Bucket, CategoryTotals,
    ItemContribution, TokenBreakdown, PROTOCOL_OVERHEAD_TOKENS,
};
pub use counter::{
    estimate_text, estimate_text_with_mode, CharacterEstimator, CjkEstimator, TextMode,
    TokenCounter, CHARS_PER_TOKEN_CODE, CHARS_PER_TOKEN_TEXT, TOKENS_PER_CHAR_CJK,
};
pub use media::{
    audio_tokens, image_tokens, pdf_tokens, video_tokens, AUDIO_TOKENS_PER_SECOND,
    GEMINI_25_SMALL_IMAGE_MAX, GEMINI_25_TILE_COST, GEMINI_25_TILE_SIZE,
    GEMINI_25_VIDEO_TOKENS_PER_SECOND, GEMINI_30_VIDEO_TOKENS_PER_FRAME,
};
pub use pricing::{context_share, CostEstimate, ModelPricing, DEFAULT_CONTEXT_WINDOW};
