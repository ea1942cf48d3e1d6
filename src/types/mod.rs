//! 类型系统模块：定义模型代际、分辨率档位与输入条目。
//!
//! # Types Module
//!
//! Core data model shared by the estimators, the aggregator and the
//! calculator session.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ModelVersion`] | Model generation selecting the cost regime |
//! | [`ResolutionTier`] | Per-image cost bucket (low / medium / high) |
//! | [`Item`] | One submitted input with identity, name, size and category |
//! | [`ItemAttributes`] | Category-specific metadata (content, dimensions, duration, pages) |
//! | [`ExtractionState`] | `Pending`, `Ready(attributes)` or `Failed` |
//! | [`ItemOverrides`] | Per-item resolution tier / fps overrides |
//!
//! ## Example
//!
//! ```rust
//! use ai_token_estimator::multimodal::ContentCategory;
//! use ai_token_estimator::types::{Item, ItemAttributes, ResolutionTier};
//!
//! let item = Item::new("photo.png", 48_213, ContentCategory::Image)
//!     .with_attributes(ItemAttributes::Image { width: 1024, height: 768 });
//! assert!(item.attributes().is_some());
//! assert_eq!(ResolutionTier::High.token_cost(), 1120);
//! ```

pub mod item;
pub mod model;

pub use item::{ExtractionState, Item, ItemAttributes, ItemId, ItemOverrides};
pub use model::{ModelVersion, ResolutionTier};
