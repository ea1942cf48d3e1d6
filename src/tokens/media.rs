//! Image, video, audio and PDF estimators.

use crate::types::{ModelVersion, ResolutionTier};

/// Cost of one fixed image tile under Gemini 2.5.
pub const GEMINI_25_TILE_COST: usize = 258;
/// Images at or below this size on both axes are billed as a single tile.
pub const GEMINI_25_SMALL_IMAGE_MAX: u32 = 384;
/// Edge length of the square tiles larger images are split into.
pub const GEMINI_25_TILE_SIZE: u32 = 768;
pub const GEMINI_25_VIDEO_TOKENS_PER_SECOND: f64 = 263.0;
pub const GEMINI_30_VIDEO_TOKENS_PER_FRAME: usize = 70;
pub const AUDIO_TOKENS_PER_SECOND: f64 = 32.0;

// Float-to-int `as` saturates, so absurd durations pin at `usize::MAX`.
#[inline]
fn ceil_tokens(value: f64) -> usize {
    value.ceil() as usize
}

/// Tokens for one image.
///
/// Gemini 2.5 tiles by pixel dimensions; Gemini 3.0 charges the flat cost of
/// `tier` and ignores the dimensions.
pub fn image_tokens(version: ModelVersion, width: u32, height: u32, tier: ResolutionTier) -> usize {
    match version {
        ModelVersion::Gemini25 => {
            if width <= GEMINI_25_SMALL_IMAGE_MAX && height <= GEMINI_25_SMALL_IMAGE_MAX {
                return GEMINI_25_TILE_COST;
            }
            let tiles_x = width.div_ceil(GEMINI_25_TILE_SIZE) as usize;
            let tiles_y = height.div_ceil(GEMINI_25_TILE_SIZE) as usize;
            tiles_x
                .saturating_mul(tiles_y)
                .saturating_mul(GEMINI_25_TILE_COST)
        }
        ModelVersion::Gemini30 => tier.token_cost(),
    }
}

/// Tokens for a video, including its audio track when `include_audio`.
///
/// `fps` is only consulted under Gemini 3.0 and must be positive there.
pub fn video_tokens(
    version: ModelVersion,
    duration_secs: f64,
    fps: f64,
    include_audio: bool,
) -> usize {
    let video = match version {
        ModelVersion::Gemini25 => ceil_tokens(duration_secs * GEMINI_25_VIDEO_TOKENS_PER_SECOND),
        ModelVersion::Gemini30 => {
            let frames = ceil_tokens(duration_secs * fps);
            frames.saturating_mul(GEMINI_30_VIDEO_TOKENS_PER_FRAME)
        }
    };
    let audio = if include_audio {
        audio_tokens(duration_secs)
    } else {
        0
    };
    video.saturating_add(audio)
}

/// Tokens for an audio clip. Identical under both generations.
pub fn audio_tokens(duration_secs: f64) -> usize {
    ceil_tokens(duration_secs * AUDIO_TOKENS_PER_SECOND)
}

/// Tokens for a PDF, each page billed as one image.
pub fn pdf_tokens(version: ModelVersion, page_count: u32, tier: ResolutionTier) -> usize {
    let per_page = match version {
        ModelVersion::Gemini25 => GEMINI_25_TILE_COST,
        ModelVersion::Gemini30 => tier.token_cost(),
    };
    (page_count as usize).saturating_mul(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ModelVersion::{Gemini25, Gemini30};
    use ResolutionTier::{High, Low, Medium};

    #[test]
    fn test_gemini25_small_image_single_tile() {
        assert_eq!(image_tokens(Gemini25, 1, 1, Medium), 258);
        assert_eq!(image_tokens(Gemini25, 384, 384, Medium), 258);
        assert_eq!(image_tokens(Gemini25, 0, 0, Medium), 258);
    }

    #[test]
    fn test_gemini25_tiling() {
        // Just over the small-image bound still fits in one 768 tile.
        assert_eq!(image_tokens(Gemini25, 385, 100, Medium), 258);
        assert_eq!(image_tokens(Gemini25, 768, 768, Medium), 258);
        assert_eq!(image_tokens(Gemini25, 769, 769, Medium), 4 * 258);
        assert_eq!(image_tokens(Gemini25, 1920, 1080, Medium), 3 * 2 * 258);
    }

    #[test]
    fn test_gemini30_ignores_dimensions() {
        for (w, h) in [(1, 1), (384, 384), (769, 769), (8000, 6000)] {
            assert_eq!(image_tokens(Gemini30, w, h, Low), 280);
            assert_eq!(image_tokens(Gemini30, w, h, Medium), 560);
            assert_eq!(image_tokens(Gemini30, w, h, High), 1120);
        }
    }

    #[test]
    fn test_video_gemini30_frames() {
        assert_eq!(video_tokens(Gemini30, 10.0, 1.0, true), 700 + 320);
        assert_eq!(video_tokens(Gemini30, 10.0, 1.0, false), 700);
        // 2.5 s at 1 fps samples 3 frames
        assert_eq!(video_tokens(Gemini30, 2.5, 1.0, false), 3 * 70);
        assert_eq!(video_tokens(Gemini30, 10.0, 2.0, false), 1400);
    }

    #[test]
    fn test_video_gemini25_continuous() {
        assert_eq!(video_tokens(Gemini25, 10.0, 1.0, true), 2630 + 320);
        // fps is not consulted under 2.5
        assert_eq!(video_tokens(Gemini25, 10.0, 30.0, true), 2950);
        assert_eq!(video_tokens(Gemini25, 0.5, 1.0, false), 132);
    }

    #[test]
    fn test_audio() {
        assert_eq!(audio_tokens(0.0), 0);
        assert_eq!(audio_tokens(10.0), 320);
        assert_eq!(audio_tokens(0.25), 8);
        assert_eq!(audio_tokens(0.01), 1);
    }

    #[test]
    fn test_pdf() {
        assert_eq!(pdf_tokens(Gemini25, 1, High), 258);
        assert_eq!(pdf_tokens(Gemini25, 3, Low), 774);
        assert_eq!(pdf_tokens(Gemini30, 3, Low), 840);
        assert_eq!(pdf_tokens(Gemini30, 2, High), 2240);
    }

    #[test]
    fn test_huge_durations_saturate() {
        for v in [Gemini25, Gemini30] {
            assert_eq!(video_tokens(v, 1e300, 1.0, true), usize::MAX);
            assert_eq!(video_tokens(v, f64::MAX, 30.0, false), usize::MAX);
        }
        assert_eq!(audio_tokens(1e300), usize::MAX);
        assert_eq!(image_tokens(Gemini25, u32::MAX, u32::MAX, Medium), {
            let tiles = u32::MAX.div_ceil(768) as usize;
            tiles.saturating_mul(tiles).saturating_mul(258)
        });
    }
}
