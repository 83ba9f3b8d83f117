//! Result Normalizer — turns an untrusted `CandidateResult` into a canonical `SearchResult`.
//!
//! This is the single point where agent output becomes trusted. `normalize` is total:
//! missing fields, wrong types and `None` all map to defaults, never to an error.

use serde_json::{Map, Value};

use crate::search::models::{fields, CandidateResult, JobEntry, SearchResult};

pub const UNTITLED_POSITION: &str = "Untitled Position";
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Expected JSON shape of a field. A value of the wrong shape is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Array,
    /// Any scalar. Numbers and booleans are rendered as their JSON text.
    Text,
}

impl FieldKind {
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Number => value.is_number(),
            FieldKind::Array => value.is_array(),
            FieldKind::Text => value.is_string() || value.is_number() || value.is_boolean(),
        }
    }
}

/// Result-level fields with the shape each must have to be kept.
pub const RESULT_FIELD_KINDS: [(&str, FieldKind); 5] = [
    (fields::RANKED_JOBS, FieldKind::Array),
    (fields::TOTAL_FOUND, FieldKind::Number),
    (fields::FILTERED_COUNT, FieldKind::Number),
    (fields::COMPANIES_SEARCHED, FieldKind::Array),
    (fields::RANKING_SUMMARY, FieldKind::Text),
];

/// A type a JSON field can be normalized into.
trait FromField: Sized {
    const KIND: FieldKind;

    fn convert(value: &Value) -> Option<Self>;
}

impl FromField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn convert(value: &Value) -> Option<Self> {
        scalar_text(value)
    }
}

impl FromField for u64 {
    const KIND: FieldKind = FieldKind::Number;

    fn convert(value: &Value) -> Option<Self> {
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .map(|n| if n > 0.0 { n.round() as u64 } else { 0 })
        })
    }
}

/// Match scores: rounded and clamped into 0 – 100.
impl FromField for u8 {
    const KIND: FieldKind = FieldKind::Number;

    fn convert(value: &Value) -> Option<Self> {
        value.as_f64().map(|n| n.round().clamp(0.0, 100.0) as u8)
    }
}

impl FromField for Vec<String> {
    const KIND: FieldKind = FieldKind::Array;

    fn convert(value: &Value) -> Option<Self> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(scalar_text).collect())
    }
}

impl FromField for Vec<JobEntry> {
    const KIND: FieldKind = FieldKind::Array;

    fn convert(value: &Value) -> Option<Self> {
        value
            .as_array()
            .map(|items| items.iter().map(normalize_job).collect())
    }
}

/// Reads `name` from `source`, keeping it only if it has the expected shape.
fn normalize_field<T: FromField>(source: Option<&Map<String, Value>>, name: &str, default: T) -> T {
    source
        .and_then(|fields| fields.get(name))
        .filter(|value| T::KIND.accepts(value))
        .and_then(T::convert)
        .unwrap_or(default)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Normalizes a candidate (or its absence) into a `SearchResult`. Never fails.
pub fn normalize(candidate: Option<&CandidateResult>) -> SearchResult {
    let source = candidate.map(CandidateResult::as_map);

    SearchResult {
        jobs: normalize_field(source, fields::RANKED_JOBS, Vec::new()),
        total_found: normalize_field(source, fields::TOTAL_FOUND, 0),
        filtered_count: normalize_field(source, fields::FILTERED_COUNT, 0),
        companies_searched: normalize_field(source, fields::COMPANIES_SEARCHED, Vec::new()),
        ranking_summary: normalize_field(source, fields::RANKING_SUMMARY, String::new()),
    }
}

/// Normalizes one element of `ranked_jobs`. Non-object elements yield an all-default entry.
pub fn normalize_job(raw: &Value) -> JobEntry {
    let source = raw.as_object();

    JobEntry {
        title: normalize_field(source, fields::JOB_TITLE, UNTITLED_POSITION.to_string()),
        company: normalize_field(source, fields::COMPANY_NAME, UNKNOWN_COMPANY.to_string()),
        match_score: normalize_field(source, fields::MATCH_SCORE, 0),
        summary: normalize_field(source, fields::SUMMARY, String::new()),
        requirements: normalize_field(source, fields::KEY_REQUIREMENTS, Vec::new()),
        match_reasoning: normalize_field(source, fields::MATCH_REASONING, String::new()),
        application_url: normalize_field(source, fields::APPLICATION_URL, String::new()),
        posted_date: normalize_field(source, fields::POSTED_DATE, String::new()),
        location: normalize_field(source, fields::LOCATION, String::new()),
    }
}
