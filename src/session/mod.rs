//! 计算会话模块：持有配置与条目集合，并在每次变更后重新计算 Token 汇总。
//!
//! # Calculator Session
//!
//! [`CalculatorSession`] owns the mutable [`Configuration`] and the item
//! collection. Every mutation runs the pure aggregator again and replaces the
//! published [`TokenBreakdown`]; nothing is cached per item between passes.
//!
//! Items enter the collection as [`ExtractionState::Pending`] the moment they
//! are classified and contribute zero tokens until their extraction outcome
//! is applied.
//!
//! ## Example
//!
//! ```rust
//! use ai_token_estimator::extract::{DeclaredExtractor, DeclaredMetadata, RawItem};
//! use ai_token_estimator::session::CalculatorSession;
//! use ai_token_estimator::types::ModelVersion;
//!
//! # tokio_test::block_on(async {
//! let mut session = CalculatorSession::new();
//! let clip = RawItem::new("clip.mp4", "video/mp4", 1 << 20).with_declared(DeclaredMetadata {
//!     duration_secs: Some(10.0),
//!     ..Default::default()
//! });
//! session.ingest(vec![clip], &DeclaredExtractor).await;
//! assert_eq!(session.breakdown().total, 1020 + 10);
//!
//! session.set_model_version(ModelVersion::Gemini25);
//! assert_eq!(session.breakdown().total, 2950 + 10);
//! # });
//! ```

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::config::{validate_fps, Configuration};
use crate::error::Error;
use crate::extract::{MetadataExtractor, RawItem};
use crate::tokens::{
    aggregate, context_share, item_tokens, CostEstimate, ItemContribution, ModelPricing,
    TokenBreakdown, DEFAULT_CONTEXT_WINDOW,
};
use crate::types::{
    ExtractionState, Item, ItemAttributes, ItemId, ModelVersion, ResolutionTier,
};

/// Single-writer state holder for one estimation session.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    config: Configuration,
    items: Vec<Item>,
    breakdown: TokenBreakdown,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::with_config(Configuration::default())
    }

    pub fn with_config(config: Configuration) -> Self {
        let mut session = Self {
            config,
            items: Vec::new(),
            breakdown: TokenBreakdown::default(),
        };
        session.recompute();
        session
    }

    // ---- configuration ----

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn model_version(&self) -> ModelVersion {
        self.config.model_version()
    }

    pub fn default_resolution_tier(&self) -> ResolutionTier {
        self.config.default_resolution_tier()
    }

    pub fn video_fps(&self) -> f64 {
        self.config.video_fps()
    }

    pub fn set_model_version(&mut self, version: ModelVersion) {
        info!(model = %version, "model version changed");
        self.config.set_model_version(version);
        self.recompute();
    }

    pub fn set_default_resolution_tier(&mut self, tier: ResolutionTier) {
        info!(tier = %tier, "default resolution tier changed");
        self.config.set_default_resolution_tier(tier);
        self.recompute();
    }

    /// Rejected values leave the configuration and breakdown unchanged.
    pub fn set_video_fps(&mut self, fps: f64) -> crate::Result<()> {
        self.config.set_video_fps(fps)?;
        info!(fps, "video sampling rate changed");
        self.recompute();
        Ok(())
    }

    pub fn set_configuration(&mut self, config: Configuration) -> crate::Result<()> {
        config.validate()?;
        info!(model = %config.model_version(), "configuration replaced");
        self.config = config;
        self.recompute();
        Ok(())
    }

    // ---- items ----

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> crate::Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(Error::ItemNotFound(id))
    }

    /// Classify and append raw items as pending. Returns their new ids in
    /// submission order.
    pub fn add_items(&mut self, raws: &[RawItem]) -> Vec<ItemId> {
        let ids = raws
            .iter()
            .map(|raw| {
                let item = Item::new(raw.name.clone(), raw.size, raw.category());
                debug!(name = %item.name, category = %item.category, "item classified");
                let id = item.id;
                self.items.push(item);
                id
            })
            .collect::<Vec<_>>();
        info!(count = ids.len(), "items added");
        self.recompute();
        ids
    }

    /// Insert an already-built item. Ready attributes that do not fit the
    /// item's category mark it failed.
    pub fn insert_item(&mut self, mut item: Item) -> ItemId {
        if let ExtractionState::Ready(attrs) = &item.state {
            if let Err(e) = attrs.validate_for(item.category) {
                warn!(name = %item.name, error = %e, "rejecting item attributes");
                item.state = ExtractionState::Failed {
                    reason: e.to_string(),
                };
            }
        }
        let id = item.id;
        info!(name = %item.name, category = %item.category, "item inserted");
        self.items.push(item);
        self.recompute();
        id
    }

    /// Apply the outcome of one item's metadata extraction.
    ///
    /// Failures and invalid attributes are recorded on the item, never
    /// returned; the only error is an unknown id.
    pub fn complete_extraction(
        &mut self,
        id: ItemId,
        outcome: crate::Result<ItemAttributes>,
    ) -> crate::Result<()> {
        let item = self.item_mut(id)?;
        let validated = outcome.and_then(|attrs| {
            attrs.validate_for(item.category)?;
            Ok(attrs)
        });
        item.state = match validated {
            Ok(attrs) => {
                debug!(name = %item.name, kind = attrs.kind(), "extraction complete");
                ExtractionState::Ready(attrs)
            }
            Err(e) => {
                warn!(name = %item.name, error = %e, "metadata extraction failed");
                ExtractionState::Failed {
                    reason: e.to_string(),
                }
            }
        };
        self.recompute();
        Ok(())
    }

    /// Add raw items and drive their extractions concurrently, applying each
    /// outcome as it completes. Completion order is unspecified.
    pub async fn ingest<E>(&mut self, raws: Vec<RawItem>, extractor: &E) -> Vec<ItemId>
    where
        E: MetadataExtractor + ?Sized,
    {
        let ids = self.add_items(&raws);

        let mut pending = raws
            .iter()
            .zip(ids.iter().copied())
            .map(|(raw, id)| async move {
                let outcome = extractor.extract(raw, raw.category()).await;
                (id, outcome)
            })
            .collect::<FuturesUnordered<_>>();

        while let Some((id, outcome)) = pending.next().await {
            if let Err(e) = self.complete_extraction(id, outcome) {
                warn!(error = %e, "dropping extraction outcome");
            }
        }
        ids
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(idx);
        info!(name = %removed.name, "item removed");
        self.recompute();
        Some(removed)
    }

    /// Set or clear the per-item resolution tier.
    pub fn set_item_resolution_tier(
        &mut self,
        id: ItemId,
        tier: Option<ResolutionTier>,
    ) -> crate::Result<()> {
        self.item_mut(id)?.overrides.resolution_tier = tier;
        self.recompute();
        Ok(())
    }

    /// Set or clear the per-item frame sampling rate.
    pub fn set_item_fps(&mut self, id: ItemId, fps: Option<f64>) -> crate::Result<()> {
        if let Some(fps) = fps {
            validate_fps(fps, "overrides.fps")?;
        }
        self.item_mut(id)?.overrides.fps = fps;
        self.recompute();
        Ok(())
    }

    /// True while any item still awaits extraction.
    pub fn is_processing(&self) -> bool {
        self.items.iter().any(|i| i.state.is_pending())
    }

    // ---- results ----

    pub fn breakdown(&self) -> &TokenBreakdown {
        &self.breakdown
    }

    pub fn item_contribution(&self, id: ItemId) -> Option<ItemContribution> {
        self.item(id).and_then(|item| item_tokens(item, &self.config))
    }

    pub fn cost_estimate(&self) -> CostEstimate {
        ModelPricing::for_version(self.config.model_version()).calculate_cost(self.breakdown.total)
    }

    /// Percentage of a 128k context window used by the current total.
    pub fn context_share(&self) -> f64 {
        context_share(self.breakdown.total, DEFAULT_CONTEXT_WINDOW)
    }

    fn recompute(&mut self) {
        self.breakdown = aggregate(&self.items, &self.config);
        debug!(
            total = self.breakdown.total,
            items = self.items.len(),
            "token breakdown recomputed"
        );
    }
}
