//! Character-heuristic token counters for text and code.

/// Average characters per token for prose.
pub const CHARS_PER_TOKEN_TEXT: f64 = 4.0;
/// Average characters per token for source code (denser in symbols).
pub const CHARS_PER_TOKEN_CODE: f64 = 3.25;
/// Tokens per character for CJK scripts.
pub const TOKENS_PER_CHAR_CJK: f64 = 0.7;

pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Divides the character length by a fixed ratio, rounding up.
#[derive(Debug, Clone)]
pub struct CharacterEstimator {
    chars_per_token: f64,
}

impl CharacterEstimator {
    pub fn new() -> Self {
        Self::with_ratio(CHARS_PER_TOKEN_TEXT)
    }
    pub fn code() -> Self {
        Self::with_ratio(CHARS_PER_TOKEN_CODE)
    }
    pub fn with_ratio(r: f64) -> Self {
        Self { chars_per_token: r }
    }
}

impl Default for CharacterEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for CharacterEstimator {
    fn count(&self, text: &str) -> usize {
        (char_len(text) as f64 / self.chars_per_token).ceil() as usize
    }
}

/// Multiplies the character length by a flat per-character rate.
#[derive(Debug, Clone)]
pub struct CjkEstimator {
    tokens_per_char: f64,
}

impl CjkEstimator {
    pub fn new() -> Self {
        Self {
            tokens_per_char: TOKENS_PER_CHAR_CJK,
        }
    }
}

impl Default for CjkEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCounter for CjkEstimator {
    fn count(&self, text: &str) -> usize {
        (char_len(text) as f64 * self.tokens_per_char).ceil() as usize
    }
}

/// Which heuristic to apply to a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    #[default]
    Prose,
    Code,
    /// Not selected by the aggregator; available to callers that detect
    /// CJK content themselves.
    Cjk,
}

impl TextMode {
    pub fn counter(&self) -> Box<dyn TokenCounter> {
        match self {
            Self::Prose => Box::new(CharacterEstimator::new()),
            Self::Code => Box::new(CharacterEstimator::code()),
            Self::Cjk => Box::new(CjkEstimator::new()),
        }
    }
}

/// Estimate tokens for text or code content.
///
/// Length is measured in Unicode scalar values, so an emoji outside the
/// Basic Multilingual Plane counts once, not as a UTF-16 surrogate pair.
pub fn estimate_text(content: &str, is_code: bool) -> usize {
    let mode = if is_code { TextMode::Code } else { TextMode::Prose };
    estimate_text_with_mode(content, mode)
}

pub fn estimate_text_with_mode(content: &str, mode: TextMode) -> usize {
    if content.is_empty() {
        return 0;
    }
    mode.counter().count(content)
}

// Unicode scalar values, not bytes.
fn char_len(text: &str) -> usize {
    text.chars().count()
}
