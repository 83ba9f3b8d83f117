//! Search pipeline: profile → agent message → agent → extract → normalize.
//!
//! An agent or transport failure short-circuits with `AppError::Agent` before the
//! extractor ever runs, so it can never be confused with an unparseable reply.

use serde::Serialize;
use tracing::{info, warn};

use crate::agent_client::AgentInvoker;
use crate::errors::AppError;
use crate::profile::models::SearchProfile;
use crate::search::extractor::extract;
use crate::search::models::{JobEntry, MatchTier, SearchResult};
use crate::search::normalizer::normalize;
use crate::search::prompts::build_search_message;
use crate::search::ranking::{order, SortMode};

/// A job ready for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(flatten)]
    pub job: JobEntry,
    pub match_tier: MatchTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub result: SearchResult,
    pub jobs: Vec<JobView>,
    pub sort: SortMode,
}

impl SearchResponse {
    pub fn new(result: SearchResult, sort: SortMode) -> Self {
        let jobs = order(&result, sort)
            .into_iter()
            .map(|job| JobView {
                match_tier: job.match_tier(),
                job,
            })
            .collect();

        Self { result, jobs, sort }
    }
}

/// Runs one search for `profile` and returns the normalized result.
pub async fn run_search(
    agent: &dyn AgentInvoker,
    profile: &SearchProfile,
) -> Result<SearchResult, AppError> {
    profile.validate()?;

    let message = build_search_message(profile);
    let reply = agent
        .invoke(&message, &profile.attachments)
        .await
        .map_err(|e| {
            warn!("Agent call failed: {e}");
            AppError::Agent(e.user_message())
        })?;

    let candidate = extract(&reply);
    if candidate.is_none() {
        info!("Agent reply contained no usable result; returning empty result");
    }

    let result = normalize(candidate.as_ref());
    info!(
        "Search completed: {} jobs, total_found={}, filtered_count={}",
        result.jobs.len(),
        result.total_found,
        result.filtered_count
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::models::RawAgentReply;
    use crate::test_support::StubAgent;
    use serde_json::json;

    fn profile() -> SearchProfile {
        SearchProfile {
            target_role: "Senior Product Manager".to_string(),
            attachments: vec!["asset-42".to_string()],
            ..SearchProfile::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_profile_never_calls_agent() {
        let agent = StubAgent::replying(RawAgentReply::from("{}"));
        let err = run_search(&agent, &SearchProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(agent.calls(), 0);
    }

    #[tokio::test]
    async fn test_prose_reply_is_extracted_and_normalized() {
        let agent = StubAgent::replying(RawAgentReply::from(
            "Sure! {\"ranked_jobs\":[{\"job_title\":\"PM\",\"match_score\":91}],\"total_found\":4} Hope it helps.",
        ));
        let result = run_search(&agent, &profile()).await.unwrap();
        assert_eq!(result.jobs.len(), 1);
        assert_eq!(result.jobs[0].company, "Unknown Company");
        assert_eq!(result.total_found, 4);
    }

    #[tokio::test]
    async fn test_unusable_reply_is_empty_result_not_error() {
        let agent = StubAgent::replying(RawAgentReply::from("not json at all"));
        let result = run_search(&agent, &profile()).await.unwrap();
        assert_eq!(result, SearchResult::default());
    }

    #[tokio::test]
    async fn test_agent_failure_short_circuits_with_message() {
        let agent = StubAgent::rejecting("Agent quota exceeded");
        let err = run_search(&agent, &profile()).await.unwrap_err();
        match err {
            AppError::Agent(message) => assert_eq!(message, "Agent quota exceeded"),
            other => panic!("expected agent error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attachments_are_forwarded() {
        let agent = StubAgent::replying(RawAgentReply::Structured(json!({})));
        run_search(&agent, &profile()).await.unwrap();
        let (message, attachments) = agent.last_call().unwrap();
        assert!(message.contains("Senior Product Manager"));
        assert_eq!(attachments, vec!["asset-42".to_string()]);
    }

    #[test]
    fn test_search_response_orders_and_tiers_jobs() {
        let result = crate::search::sample::sample_result();
        let response = SearchResponse::new(result, SortMode::MostRecent);
        let dates: Vec<&str> = response
            .jobs
            .iter()
            .map(|v| v.job.posted_date.as_str())
            .collect();
        assert_eq!(
            dates,
            vec!["2025-02-15", "2025-02-12", "2025-02-10", "2025-02-08", "2025-02-05"]
        );
        assert_eq!(response.jobs[0].match_tier, MatchTier::Strong);
        assert_eq!(response.jobs[4].match_tier, MatchTier::Weak);
        // stored result keeps agent order
        assert_eq!(response.result.jobs[0].company, "Stripe");
    }

    #[test]
    fn test_job_view_flattens_entry() {
        let response = SearchResponse::new(
            crate::search::sample::sample_result(),
            SortMode::BestMatch,
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["jobs"][0]["matchScore"], 94);
        assert_eq!(value["jobs"][0]["matchTier"], "strong");
        assert_eq!(value["sort"], "best_match");
    }
}
