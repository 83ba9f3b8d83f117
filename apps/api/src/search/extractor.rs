//! Response Extractor — recovers a candidate result object from an agent reply of unknown shape.
//!
//! Extraction is an ordered chain of strategies; the first one that yields an object wins:
//! 1. `DirectObject`  — the reply is already a JSON object
//! 2. `StrictJson`    — the reply text parses as a JSON object (code fences tolerated)
//! 3. `EmbeddedJson`  — the greedy `{ … }` span inside the reply text parses as an object
//!
//! A winning candidate with no jobs then gets one rescue pass: if it wraps its real answer
//! in a `text` / `message` / `response` string, that string is searched the same way and the
//! nested fields override the outer ones.
//!
//! Every failure is swallowed. `None` means the agent gave unusable output; it is not an error.

use serde_json::Value;
use tracing::debug;

use crate::search::models::{fields, CandidateResult, RawAgentReply};
use crate::search::normalizer::RESULT_FIELD_KINDS;

/// One way of turning a reply into a candidate object.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(&self, reply: &RawAgentReply) -> Option<CandidateResult>;
}

/// The reply already is a structured object.
pub struct DirectObject;

impl ExtractionStrategy for DirectObject {
    fn name(&self) -> &'static str {
        "direct_object"
    }

    fn attempt(&self, reply: &RawAgentReply) -> Option<CandidateResult> {
        match reply {
            RawAgentReply::Structured(Value::Object(map)) => Some(CandidateResult::new(map.clone())),
            _ => None,
        }
    }
}

/// The whole reply text is JSON.
pub struct StrictJson;

impl ExtractionStrategy for StrictJson {
    fn name(&self) -> &'static str {
        "strict_json"
    }

    fn attempt(&self, reply: &RawAgentReply) -> Option<CandidateResult> {
        match reply {
            RawAgentReply::Text(text) => parse_strict(text),
            RawAgentReply::Structured(_) => None,
        }
    }
}

/// A JSON object is buried somewhere in prose.
pub struct EmbeddedJson;

impl ExtractionStrategy for EmbeddedJson {
    fn name(&self) -> &'static str {
        "embedded_json"
    }

    fn attempt(&self, reply: &RawAgentReply) -> Option<CandidateResult> {
        match reply {
            RawAgentReply::Text(text) => parse_embedded(text),
            RawAgentReply::Structured(_) => None,
        }
    }
}

pub struct ResponseExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResponseExtractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(DirectObject),
            Box::new(StrictJson),
            Box::new(EmbeddedJson),
        ])
    }
}

impl ResponseExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, reply: &RawAgentReply) -> Option<CandidateResult> {
        let candidate = self.strategies.iter().find_map(|strategy| {
            let candidate = strategy.attempt(reply)?;
            debug!(strategy = strategy.name(), "Agent reply extracted");
            Some(candidate)
        })?;

        Some(rescue_nested(candidate))
    }
}

/// Extracts with the default strategy chain.
pub fn extract(reply: &RawAgentReply) -> Option<CandidateResult> {
    ResponseExtractor::default().extract(reply)
}

/// If `outer` has no jobs but carries its answer as free text, parse that text and let the
/// nested fields override the outer ones. Only fields the nested object defines with a
/// usable shape are taken.
fn rescue_nested(mut outer: CandidateResult) -> CandidateResult {
    if !outer.has_no_jobs() {
        return outer;
    }

    let Some(nested) = nested_text(&outer).and_then(parse_text) else {
        return outer;
    };
    debug!("Recovered nested agent result from free-text field");

    for (field, kind) in RESULT_FIELD_KINDS {
        if let Some(value) = nested.get(field).filter(|v| kind.accepts(v)) {
            outer.insert(field, value.clone());
        }
    }
    outer
}

/// The first of `text` / `message` / `response` that is present decides; it is only
/// used when it is a non-empty string.
fn nested_text(candidate: &CandidateResult) -> Option<&str> {
    fields::NESTED_TEXT_FIELDS
        .iter()
        .find_map(|field| candidate.get(field).filter(|v| !v.is_null()))?
        .as_str()
        .filter(|text| !text.is_empty())
}

fn parse_text(text: &str) -> Option<CandidateResult> {
    parse_strict(text).or_else(|| parse_embedded(text))
}

/// Parses the whole text as a JSON object. A JSON string holding an object
/// (double-encoded output) is unwrapped once.
fn parse_strict(text: &str) -> Option<CandidateResult> {
    match serde_json::from_str::<Value>(strip_json_fences(text)).ok()? {
        Value::Object(map) => Some(CandidateResult::new(map)),
        Value::String(inner) => match serde_json::from_str::<Value>(inner.trim()).ok()? {
            Value::Object(map) => Some(CandidateResult::new(map)),
            _ => None,
        },
        _ => None,
    }
}

/// Parses the greedy span from the first `{` to the last `}`.
fn parse_embedded(text: &str) -> Option<CandidateResult> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Value>(&text[start..=end]).ok()? {
        Value::Object(map) => Some(CandidateResult::new(map)),
        _ => None,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from agent output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };

    stripped
        .trim_start()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped.trim_start())
}
