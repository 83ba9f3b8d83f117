use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whatever the agent handed back, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAgentReply {
    Structured(Value),
    Text(String),
}

impl From<Value> for RawAgentReply {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => RawAgentReply::Text(text),
            other => RawAgentReply::Structured(other),
        }
    }
}

impl From<String> for RawAgentReply {
    fn from(text: String) -> Self {
        RawAgentReply::Text(text)
    }
}

impl From<&str> for RawAgentReply {
    fn from(text: &str) -> Self {
        RawAgentReply::Text(text.to_string())
    }
}

/// A provisionally-parsed agent object. Nothing in it is trusted until
/// it has been through `normalizer::normalize`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateResult(Map<String, Value>);

impl CandidateResult {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// True when `ranked_jobs` is absent, not an array, or an empty array.
    pub fn has_no_jobs(&self) -> bool {
        self.get(fields::RANKED_JOBS)
            .and_then(Value::as_array)
            .map_or(true, |jobs| jobs.is_empty())
    }
}

/// Wire names used by the agent's output contract.
pub mod fields {
    pub const RANKED_JOBS: &str = "ranked_jobs";
    pub const TOTAL_FOUND: &str = "total_found";
    pub const FILTERED_COUNT: &str = "filtered_count";
    pub const COMPANIES_SEARCHED: &str = "companies_searched";
    pub const RANKING_SUMMARY: &str = "ranking_summary";

    pub const JOB_TITLE: &str = "job_title";
    pub const COMPANY_NAME: &str = "company_name";
    pub const MATCH_SCORE: &str = "match_score";
    pub const SUMMARY: &str = "job_description_summary";
    pub const KEY_REQUIREMENTS: &str = "key_requirements";
    pub const MATCH_REASONING: &str = "match_reasoning";
    pub const APPLICATION_URL: &str = "application_url";
    pub const POSTED_DATE: &str = "posted_date";
    pub const LOCATION: &str = "location";

    /// Free-text fields an agent may have wrapped its real answer in.
    pub const NESTED_TEXT_FIELDS: [&str; 3] = ["text", "message", "response"];
}

/// A single canonical job. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub title: String,
    pub company: String,
    /// 0 – 100
    pub match_score: u8,
    pub summary: String,
    pub requirements: Vec<String>,
    pub match_reasoning: String,
    pub application_url: String,
    /// `YYYY-MM-DD`, or empty when the agent gave none.
    pub posted_date: String,
    pub location: String,
}

impl JobEntry {
    pub fn match_tier(&self) -> MatchTier {
        MatchTier::from_score(self.match_score)
    }
}

/// Canonical result of one completed search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub jobs: Vec<JobEntry>,
    pub total_found: u64,
    pub filtered_count: u64,
    pub companies_searched: Vec<String>,
    pub ranking_summary: String,
}

/// Coarse bucket of a match score, used by front-ends to colour results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strong,
    Moderate,
    Weak,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            MatchTier::Strong
        } else if score >= 60 {
            MatchTier::Moderate
        } else {
            MatchTier::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_value_becomes_text_reply() {
        let reply = RawAgentReply::from(json!("{\"ranked_jobs\": []}"));
        assert_eq!(reply, RawAgentReply::Text("{\"ranked_jobs\": []}".to_string()));
    }

    #[test]
    fn test_object_value_stays_structured() {
        let reply = RawAgentReply::from(json!({"ranked_jobs": []}));
        assert!(matches!(reply, RawAgentReply::Structured(Value::Object(_))));
    }

    #[test]
    fn test_has_no_jobs_for_missing_wrong_type_and_empty() {
        let missing = CandidateResult::default();
        assert!(missing.has_no_jobs());

        let mut wrong_type = CandidateResult::default();
        wrong_type.insert(fields::RANKED_JOBS, json!("none"));
        assert!(wrong_type.has_no_jobs());

        let mut empty = CandidateResult::default();
        empty.insert(fields::RANKED_JOBS, json!([]));
        assert!(empty.has_no_jobs());

        let mut populated = CandidateResult::default();
        populated.insert(fields::RANKED_JOBS, json!([{"job_title": "PM"}]));
        assert!(!populated.has_no_jobs());
    }

    #[test]
    fn test_match_tier_thresholds() {
        assert_eq!(MatchTier::from_score(100), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(80), MatchTier::Strong);
        assert_eq!(MatchTier::from_score(79), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(60), MatchTier::Moderate);
        assert_eq!(MatchTier::from_score(59), MatchTier::Weak);
        assert_eq!(MatchTier::from_score(0), MatchTier::Weak);
    }

    #[test]
    fn test_job_entry_serializes_camel_case() {
        let job = JobEntry {
            title: "PM".to_string(),
            company: "Stripe".to_string(),
            match_score: 90,
            summary: String::new(),
            requirements: vec![],
            match_reasoning: String::new(),
            application_url: String::new(),
            posted_date: "2025-02-15".to_string(),
            location: String::new(),
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["matchScore"], 90);
        assert_eq!(value["postedDate"], "2025-02-15");
        assert!(value.get("match_score").is_none());
    }
}
