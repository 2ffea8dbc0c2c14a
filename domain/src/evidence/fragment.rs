//! Evidence fragment (Value Object)
//!
//! A fragment is one normalized snippet of retrieved information. Two
//! fragments are the same piece of evidence when their [`FragmentKey`]s
//! match, regardless of which agent or round found them.

use crate::debate::role::AgentRole;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Snippets shorter than this (ignoring whitespace) carry no usable evidence
pub const MIN_SNIPPET_CHARS: usize = 20;

/// Leading digest bytes kept in a fragment id
const DIGEST_BYTES: usize = 8;

/// Integrity problems that cause a candidate fragment to be dropped
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FragmentError {
    #[error("snippet has neither a source identifier nor a title")]
    MissingSource,

    #[error("snippet text too short ({0} chars)")]
    TextTooShort(usize),

    #[error("relevance {0} is outside [0, 1]")]
    RelevanceOutOfRange(f64),
}

/// Uniqueness key: normalized source identifier plus normalized text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentKey {
    source: String,
    text: String,
}

impl FragmentKey {
    pub fn new(source_id: &str, text: &str) -> Self {
        Self {
            source: normalize_source(source_id),
            text: normalize_text(text),
        }
    }

    /// SHA-256 of the key truncated to 64 bits, rendered as hex
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.text.as_bytes());
        hex::encode(&hasher.finalize()[..DIGEST_BYTES])
    }
}

/// Lower-cased URL-ish identifier without scheme, `www.` or trailing slash
fn normalize_source(source_id: &str) -> String {
    let lowered = source_id.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    without_www.trim_end_matches('/').to_string()
}

/// Lower-cased text with whitespace runs collapsed
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A single piece of retrieved evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceFragment {
    /// Hex digest of the uniqueness key; used for citations
    pub id: String,
    pub source_id: String,
    pub title: String,
    pub text: String,
    pub relevance: f64,
    pub role: AgentRole,
    pub round: usize,
}

impl EvidenceFragment {
    /// Build a fragment from a raw search snippet, checking integrity.
    pub fn new(
        source_id: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        relevance: f64,
        role: AgentRole,
        round: usize,
    ) -> Result<Self, FragmentError> {
        let mut source_id: String = source_id.into();
        let title: String = title.into();
        let text: String = text.into();

        if source_id.trim().is_empty() {
            if title.trim().is_empty() {
                return Err(FragmentError::MissingSource);
            }
            source_id = title.clone();
        }

        let significant = text.chars().filter(|c| !c.is_whitespace()).count();
        if significant < MIN_SNIPPET_CHARS {
            return Err(FragmentError::TextTooShort(significant));
        }

        if !(0.0..=1.0).contains(&relevance) {
            return Err(FragmentError::RelevanceOutOfRange(relevance));
        }

        let id = FragmentKey::new(&source_id, &text).digest();
        Ok(Self {
            id,
            source_id,
            title,
            text: text.trim().to_string(),
            relevance,
            role,
            round,
        })
    }

    pub fn key(&self) -> FragmentKey {
        FragmentKey::new(&self.source_id, &self.text)
    }

    /// Text clipped to `max_chars` characters for prompt inclusion
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.text.chars().count() <= max_chars {
            return self.text.clone();
        }
        let clipped: String = self.text.chars().take(max_chars).collect();
        format!("{}...", clipped.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Automation raised output per worker by twelve percent in 2023.";

    #[test]
    fn test_key_normalizes_source_and_text() {
        let a = FragmentKey::new("https://www.Example.org/report/", TEXT);
        let b = FragmentKey::new(
            "http://example.org/report",
            "  automation raised   output per worker by twelve percent in 2023. ",
        );
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_differs_for_different_sources() {
        let a = FragmentKey::new("a.org", TEXT).digest();
        let b = FragmentKey::new("b.org", TEXT).digest();
        assert_ne!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_digest_is_truncated_sha256() {
        // Source and text are separated by a NUL byte
        let key = FragmentKey {
            source: "a.org".to_string(),
            text: "abc".to_string(),
        };
        let full = hex::encode(Sha256::digest(b"a.org\0abc"));
        assert_eq!(key.digest(), &full[..16]);
        assert!(key.digest().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_missing_source_falls_back_to_title() {
        let fragment =
            EvidenceFragment::new("", "Labour report", TEXT, 0.7, AgentRole::Economic, 1).unwrap();
        assert_eq!(fragment.source_id, "Labour report");
    }

    #[test]
    fn test_missing_source_and_title_is_rejected() {
        let err = EvidenceFragment::new(" ", "", TEXT, 0.7, AgentRole::Economic, 1).unwrap_err();
        assert_eq!(err, FragmentError::MissingSource);
    }

    #[test]
    fn test_short_text_is_rejected() {
        let err =
            EvidenceFragment::new("a.org", "t", "too short", 0.7, AgentRole::Economic, 1)
                .unwrap_err();
        assert_eq!(err, FragmentError::TextTooShort(8));
    }

    #[test]
    fn test_relevance_out_of_range_is_rejected() {
        let err = EvidenceFragment::new("a.org", "t", TEXT, f64::NAN, AgentRole::Economic, 1)
            .unwrap_err();
        assert!(matches!(err, FragmentError::RelevanceOutOfRange(_)));
    }

    #[test]
    fn test_excerpt_clips_long_text() {
        let fragment =
            EvidenceFragment::new("a.org", "t", TEXT, 0.7, AgentRole::Economic, 1).unwrap();
        assert_eq!(fragment.excerpt(10), "Automation...");
        assert_eq!(fragment.excerpt(500), TEXT);
    }
}
