//! Text analysis for synthesized arguments.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`parse_confidence`] | Read a self-reported confidence from a model reply |
//! | [`strip_confidence`] | Remove the confidence line from the argument body |
//! | [`extract_key_points`] | Pull up to [`MAX_KEY_POINTS`] points from the text |
//! | [`is_substantial`] | Minimum shape check for a usable argument |
//! | [`parse_queries`] | Read search queries from a query-writer reply |

use regex::Regex;
use std::sync::LazyLock;

pub const MAX_KEY_POINTS: usize = 5;

/// Arguments shorter than this are rejected
pub const MIN_ARGUMENT_CHARS: usize = 100;

/// Sentences needed for an argument to be usable
pub const MIN_SUBSTANTIAL_SENTENCES: usize = 3;

/// A sentence shorter than this does not count as substantial
const SUBSTANTIAL_SENTENCE_CHARS: usize = 20;

static CONFIDENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\W*confidence(?:\s+(?:score|level))?\s*\**\s*[:=]\s*\**\s*([0-9]+(?:\.[0-9]+)?)\s*(%|/\s*10\b|/\s*100\b)?[\s.*]*$",
    )
        .expect("confidence pattern is valid")
});

/// Longest search query accepted from a model reply
pub const MAX_QUERY_CHARS: usize = 120;

static QUERY_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*\u{2022}]|\d+[.)]|[Qq]uery\s*\d*\s*:)\s*")
        .expect("query marker pattern is valid")
});

static ENUMERATED_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:[-*\u{2022}]|\d+[.)])\s+(.{10,}?)\s*$")
        .expect("enumeration pattern is valid")
});

/// Parse a self-reported confidence.
///
/// # Supported Formats
///
/// 1. **JSON**: `{"confidence": 0.8}`
/// 2. **Line**: `CONFIDENCE: 0.8`, `Confidence: 80%`, `confidence = 8/10`
///
/// The line must carry a `:` or `=` separator and nothing but the value
/// after it, so prose such as `Confidence 2023 survey ...` is left alone.
/// Values above 1 without an explicit scale are read as percentages.
/// Returns `None` when nothing parseable is found.
///
/// # Examples
///
/// ```
/// use debate_domain::debate::text::parse_confidence;
///
/// assert_eq!(parse_confidence("...\nCONFIDENCE: 0.75"), Some(0.75));
/// assert_eq!(parse_confidence("Confidence: 80%"), Some(0.8));
/// assert_eq!(parse_confidence("no score here"), None);
/// ```
pub fn parse_confidence(response: &str) -> Option<f64> {
    if let Some(start) = response.find('{')
        && let Some(end) = response[start..].rfind('}')
    {
        let json_str = &response[start..start + end + 1];
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(json_str)
            && let Some(value) = parsed.get("confidence").and_then(|v| v.as_f64())
        {
            return Some(normalize(value, None));
        }
    }

    let captures = CONFIDENCE_LINE.captures(response)?;
    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    let scale = captures
        .get(2)
        .map(|m| m.as_str().replace(char::is_whitespace, ""));
    Some(normalize(value, scale.as_deref()))
}

fn normalize(value: f64, scale: Option<&str>) -> f64 {
    let scaled = match scale {
        Some("/10") => value / 10.0,
        Some("%") | Some("/100") => value / 100.0,
        _ if value > 1.0 => value / 100.0,
        _ => value,
    };
    scaled.clamp(0.0, 1.0)
}

/// Remove confidence lines so they don't leak into the argument body
pub fn strip_confidence(response: &str) -> String {
    response
        .lines()
        .filter(|line| !CONFIDENCE_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Split on sentence terminators, keeping only substantial sentences
fn substantial_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > SUBSTANTIAL_SENTENCE_CHARS)
        .collect()
}

/// Check that an argument has enough body to be worth presenting
pub fn is_substantial(text: &str) -> bool {
    text.trim().chars().count() >= MIN_ARGUMENT_CHARS
        && substantial_sentences(text).len() >= MIN_SUBSTANTIAL_SENTENCES
}

/// Extract key points: enumerated or bulleted lines first, otherwise the
/// leading substantial sentences.
pub fn extract_key_points(text: &str) -> Vec<String> {
    let enumerated: Vec<String> = ENUMERATED_POINT
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .take(MAX_KEY_POINTS)
        .collect();
    if !enumerated.is_empty() {
        return enumerated;
    }

    substantial_sentences(text)
        .into_iter()
        .take(MAX_KEY_POINTS)
        .map(str::to_string)
        .collect()
}

/// Read up to `max` search queries from a model reply, one per line.
///
/// Bullets, numbering and surrounding quotes are removed. Blank lines,
/// headings ending in `:` and lines longer than [`MAX_QUERY_CHARS`] are
/// skipped, as are case-insensitive duplicates.
pub fn parse_queries(response: &str, max: usize) -> Vec<String> {
    let mut queries: Vec<String> = Vec::new();
    for line in response.lines() {
        if queries.len() >= max {
            break;
        }
        let stripped = QUERY_MARKER.replace(line, "");
        let query = stripped
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();
        if query.is_empty() || query.ends_with(':') || query.chars().count() > MAX_QUERY_CHARS {
            continue;
        }
        if !queries.iter().any(|q| q.eq_ignore_ascii_case(query)) {
            queries.push(query.to_string());
        }
    }
    queries
}
