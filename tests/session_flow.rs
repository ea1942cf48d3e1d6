//! End-to-end tests for the calculator session with asynchronous extraction

use std::collections::HashMap;
use std::time::Duration;

use ai_token_estimator::extract::{DeclaredMetadata, MetadataExtractor, RawItem};
use ai_token_estimator::types::{ExtractionState, ItemAttributes, ModelVersion, ResolutionTier};
use ai_token_estimator::{aggregate, CalculatorSession, ContentCategory, Error};
use async_trait::async_trait;

/// Extractor that answers from a script after a per-item delay, so items
/// complete in a different order than they were submitted.
struct ScriptedExtractor {
    script: HashMap<String, (u64, Option<ItemAttributes>)>,
}

impl ScriptedExtractor {
    fn new() -> Self {
        Self {
            script: HashMap::new(),
        }
    }

    fn answer(mut self, name: &str, delay_ms: u64, attrs: ItemAttributes) -> Self {
        self.script.insert(name.to_string(), (delay_ms, Some(attrs)));
        self
    }

    fn fail(mut self, name: &str, delay_ms: u64) -> Self {
        self.script.insert(name.to_string(), (delay_ms, None));
        self
    }
}

#[async_trait]
impl MetadataExtractor for ScriptedExtractor {
    async fn extract(
        &self,
        raw: &RawItem,
        _category: ContentCategory,
    ) -> ai_token_estimator::Result<ItemAttributes> {
        match self.script.get(&raw.name) {
            Some((delay, outcome)) => {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
                outcome
                    .clone()
                    .ok_or_else(|| Error::extraction(&raw.name, "scripted failure"))
            }
            None => Err(Error::extraction(&raw.name, "not scripted")),
        }
    }
}

fn mixed_inputs() -> Vec<RawItem> {
    vec![
        RawItem::new("readme.txt", "text/plain", 8),
        RawItem::new("lib.rs", "", 13),
        RawItem::new("photo.png", "image/png", 1000),
        RawItem::new("clip.mp4", "video/mp4", 5000),
        RawItem::new("voice.mp3", "audio/mpeg", 2000),
        RawItem::new("paper.pdf", "application/pdf", 3000),
    ]
}

fn mixed_extractor() -> ScriptedExtractor {
    ScriptedExtractor::new()
        .answer("readme.txt", 30, ItemAttributes::text("abcdefgh"))
        .answer("lib.rs", 5, ItemAttributes::text("x".repeat(13)))
        .answer(
            "photo.png",
            20,
            ItemAttributes::Image {
                width: 769,
                height: 769,
            },
        )
        .answer("clip.mp4", 1, ItemAttributes::Video { duration_secs: 10.0 })
        .answer("voice.mp3", 15, ItemAttributes::Audio { duration_secs: 10.0 })
        .answer("paper.pdf", 10, ItemAttributes::Pdf { page_count: 2 })
}

#[tokio::test]
async fn test_mixed_ingest_gemini30() {
    let mut session = CalculatorSession::new();
    let ids = session.ingest(mixed_inputs(), &mixed_extractor()).await;

    assert_eq!(ids.len(), 6);
    assert!(!session.is_processing());

    let b = session.breakdown();
    assert_eq!(b.per_category.text, 2 + 4);
    assert_eq!(b.per_category.images, 560 + 2 * 560);
    assert_eq!(b.per_category.video, 700 + 320);
    assert_eq!(b.per_category.audio, 320);
    assert_eq!(b.per_category.overhead, 10);
    assert_eq!(b.total, b.per_category.sum());
}

#[tokio::test]
async fn test_switching_model_recomputes_everything() {
    let mut session = CalculatorSession::new();
    session.ingest(mixed_inputs(), &mixed_extractor()).await;

    session.set_model_version(ModelVersion::Gemini25);
    let b = *session.breakdown();
    assert_eq!(b.per_category.images, 1032 + 2 * 258);
    assert_eq!(b.per_category.video, 2630 + 320);
    assert_eq!(b.per_category.audio, 320);
    assert_eq!(b.per_category.text, 6);

    // Tier and fps do not matter under 2.5.
    session.set_default_resolution_tier(ResolutionTier::High);
    session.set_video_fps(5.0).unwrap();
    assert_eq!(*session.breakdown(), b);
}

#[tokio::test]
async fn test_failure_does_not_affect_other_items() {
    let extractor = mixed_extractor().fail("clip.mp4", 2);
    let mut session = CalculatorSession::new();
    let ids = session.ingest(mixed_inputs(), &extractor).await;

    let clip = session.item(ids[3]).unwrap();
    assert!(matches!(clip.state, ExtractionState::Failed { .. }));
    assert_eq!(session.breakdown().per_category.video, 0);
    assert_eq!(session.breakdown().per_category.audio, 320);
    assert!(!session.is_processing());
}

#[tokio::test]
async fn test_breakdown_is_idempotent() {
    let mut session = CalculatorSession::new();
    session.ingest(mixed_inputs(), &mixed_extractor()).await;

    let first = aggregate(session.items(), session.config());
    let second = aggregate(session.items(), session.config());
    assert_eq!(first, second);
    assert_eq!(first, *session.breakdown());

    let mut reversed: Vec<_> = session.items().to_vec();
    reversed.reverse();
    assert_eq!(aggregate(&reversed, session.config()), first);
}

#[tokio::test]
async fn test_remove_and_readd_reproduces_contribution() {
    let mut session = CalculatorSession::new();
    let ids = session.ingest(mixed_inputs(), &mixed_extractor()).await;
    let before = *session.breakdown();
    let photo_contribution = session.item_contribution(ids[2]).unwrap();

    let removed = session.remove_item(ids[2]).unwrap();
    assert_eq!(
        session.breakdown().per_category.images,
        before.per_category.images - photo_contribution.tokens
    );

    let new_ids = session
        .ingest(
            vec![RawItem::new(removed.name.clone(), "image/png", removed.size)],
            &mixed_extractor(),
        )
        .await;
    assert_ne!(new_ids[0], ids[2]);
    assert_eq!(session.item_contribution(new_ids[0]), Some(photo_contribution));
    assert_eq!(*session.breakdown(), before);
}

#[tokio::test]
async fn test_pending_items_contribute_zero() {
    let mut session = CalculatorSession::new();
    let ids = session.add_items(&mixed_inputs());
    assert!(session.is_processing());
    assert_eq!(session.breakdown().total, 10);

    session
        .complete_extraction(ids[4], Ok(ItemAttributes::Audio { duration_secs: 2.0 }))
        .unwrap();
    assert_eq!(session.breakdown().total, 64 + 10);
    assert!(session.is_processing());
}

#[tokio::test]
async fn test_declared_manifest_items() {
    let manifest = r#"
- name: talk.mp4
  media_type: video/mp4
  size: 1048576
  duration_secs: 60
- name: slides.pdf
  media_type: application/pdf
  page_count: 12
- name: prompt.md
  content: "Summarize the talk."
"#;
    let raws: Vec<RawItem> = serde_yaml::from_str(manifest).unwrap();
    let mut session = CalculatorSession::new();
    session
        .ingest(raws, &ai_token_estimator::extract::DeclaredExtractor)
        .await;

    let b = session.breakdown();
    assert_eq!(b.per_category.video, 60 * 70 + 60 * 32);
    assert_eq!(b.per_category.images, 12 * 560);
    assert_eq!(b.per_category.text, 5);
}

#[tokio::test]
async fn test_per_item_tier_override() {
    let raw = RawItem::new("scan.png", "image/png", 1).with_declared(DeclaredMetadata {
        width: Some(2000),
        height: Some(3000),
        ..Default::default()
    });
    let mut session = CalculatorSession::new();
    let ids = session
        .ingest(vec![raw], &ai_token_estimator::extract::DeclaredExtractor)
        .await;

    session
        .set_item_resolution_tier(ids[0], Some(ResolutionTier::High))
        .unwrap();
    assert_eq!(session.breakdown().per_category.images, 1120);

    // The override outlives default-tier changes.
    session.set_default_resolution_tier(ResolutionTier::Low);
    assert_eq!(session.breakdown().per_category.images, 1120);

    session.set_item_resolution_tier(ids[0], None).unwrap();
    assert_eq!(session.breakdown().per_category.images, 280);
}

#[tokio::test]
async fn test_huge_duration_saturates_total() {
    let mut session = CalculatorSession::new();
    let ids = session.add_items(&[RawItem::new("endless.mp3", "audio/mpeg", 1)]);

    session
        .complete_extraction(ids[0], Ok(ItemAttributes::Audio { duration_secs: 1e300 }))
        .unwrap();

    let b = session.breakdown();
    assert_eq!(b.per_category.audio, usize::MAX);
    assert_eq!(b.total, usize::MAX);
    assert!(!session.is_processing());
}
