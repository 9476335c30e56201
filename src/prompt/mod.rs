pub mod gemini;
pub mod passage;

use icu_normalizer::ComposingNormalizerBorrowed;
use thiserror::Error;

pub use gemini::GeminiPromptSource;
pub use passage::PassagePromptSource;

pub const FALLBACK_PROMPT: &str = "The quick brown fox jumps over the lazy dog. This is a default fallback text. If you see this, there might be an issue with the API key or service.";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PromptError {
    #[error("prompt source is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("received an empty prompt")]
    Empty,
    #[error("prompt request failed: {status} {text}")]
    Status { status: u16, text: String },
    #[error("this build has no network support")]
    Offline,
    #[cfg(feature = "network")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Anything that can hand out a single-line challenge text.
pub trait PromptSource: Send + Sync {
    fn fetch_prompt(&self) -> Result<String, PromptError>;
}

/// Collapse a raw prompt to one trimmed NFC line. `None` when nothing is left.
pub fn normalize_prompt(raw: &str) -> Option<String> {
    let single_line = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if single_line.is_empty() {
        return None;
    }
    let nfc = ComposingNormalizerBorrowed::new_nfc();
    Some(nfc.normalize(&single_line).into_owned())
}

/// Fetch once; any failure yields the fallback text. No retry.
pub fn fetch_prompt_or_fallback(source: &dyn PromptSource) -> String {
    match source.fetch_prompt() {
        Ok(prompt) => prompt,
        Err(e) => {
            log::warn!("Error fetching typing prompt: {e}");
            FALLBACK_PROMPT.to_string()
        }
    }
}
