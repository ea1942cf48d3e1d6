//! # ai-token-estimator
//!
//! 多模态输入 Token 估算库：在提交前估算文本、代码、图像、视频、音频与 PDF 在不同 Gemini 代际下的 Token 消耗。
//!
//! Estimates how many tokens a multimodal input will consume when submitted to
//! a Gemini model, under the cost model of either supported generation.
//!
//! ## Overview
//!
//! The core is a set of pure estimators, one per content category, and an
//! aggregator that folds per-item estimates into a categorized total plus a
//! fixed protocol overhead. Everything else (classification, metadata
//! extraction, the session state holder, the CLI) feeds those functions.
//!
//! ## Cost Models
//!
//! | Input | Gemini 2.5 | Gemini 3.0 |
//! |-------|------------|------------|
//! | Text / code | ceil(chars / 4.0) / ceil(chars / 3.25) | same |
//! | Image | 258 per 768px tile (258 flat up to 384x384) | tier: 280 / 560 / 1120 |
//! | Video | ceil(seconds x 263) | ceil(seconds x fps) x 70 |
//! | Audio (and video audio track) | ceil(seconds x 32) | same |
//! | PDF | 258 per page | tier cost per page |
//!
//! ## Quick Start
//!
//! ```rust
//! use ai_token_estimator::multimodal::ContentCategory;
//! use ai_token_estimator::session::CalculatorSession;
//! use ai_token_estimator::types::{Item, ItemAttributes, ModelVersion};
//!
//! let mut session = CalculatorSession::new();
//! session.insert_item(
//!     Item::new("diagram.png", 120_000, ContentCategory::Image)
//!         .with_attributes(ItemAttributes::Image { width: 769, height: 769 }),
//! );
//! assert_eq!(session.breakdown().total, 560 + 10);
//!
//! session.set_model_version(ModelVersion::Gemini25);
//! assert_eq!(session.breakdown().total, 1032 + 10);
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Model versions, resolution tiers, items and extraction state |
//! | [`multimodal`] | Content categories and classification |
//! | [`tokens`] | Estimators, aggregation, pricing |
//! | [`config`] | Validated session configuration and YAML loading |
//! | [`extract`] | Raw inputs and metadata extraction collaborators |
//! | [`session`] | Calculator session with recompute-on-change |

pub mod config;
pub mod extract;
pub mod multimodal;
pub mod session;
pub mod tokens;
pub mod types;

// Re-export main types for convenience
pub use config::Configuration;
pub use multimodal::{classify, ContentCategory};
pub use session::CalculatorSession;
pub use tokens::{aggregate, Bucket, TokenBreakdown};
pub use types::{Item, ItemAttributes, ItemId, ModelVersion, ResolutionTier};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
