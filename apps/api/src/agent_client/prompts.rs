// Shared prompt fragments for agent calls.
// Each service that calls the agent builds its own message in a prompts.rs alongside it.

/// Output contract appended to every search message. The agent does not always honour it;
/// `search::extractor` copes with whatever comes back.
pub const RESULT_SCHEMA_INSTRUCTION: &str = r#"Respond with a JSON object of this shape:
{
  "ranked_jobs": [
    {
      "job_title": "Senior Product Manager",
      "company_name": "Stripe",
      "match_score": 94,
      "job_description_summary": "One or two sentences.",
      "key_requirements": ["5+ years PM experience"],
      "match_reasoning": "Why this role fits the profile.",
      "application_url": "https://...",
      "posted_date": "YYYY-MM-DD",
      "location": "City, Country or Remote"
    }
  ],
  "total_found": 0,
  "filtered_count": 0,
  "companies_searched": ["Company"],
  "ranking_summary": "Short overview of the results."
}"#;
