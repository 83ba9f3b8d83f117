//! Canned profile and result used to preview the results view without calling the agent.

use serde_json::{json, Value};

use crate::profile::models::SearchProfile;
use crate::profile::tags::TagSet;
use crate::search::models::{CandidateResult, SearchResult};
use crate::search::normalizer::normalize;

pub fn sample_profile() -> SearchProfile {
    let skills = [
        "Product Strategy",
        "Agile/Scrum",
        "Data Analytics",
        "Stakeholder Management",
        "SQL",
        "User Research",
    ]
    .iter()
    .fold(TagSet::new(), |tags, skill| tags.add(skill));

    let target_companies = ["Stripe", "Plaid", "Robinhood"]
        .iter()
        .fold(TagSet::new(), |tags, company| tags.add(company));

    SearchProfile {
        current_company: "TechVista Inc.".to_string(),
        current_role: "Product Manager".to_string(),
        years_of_experience: "6".to_string(),
        target_domain: "FinTech".to_string(),
        target_role: "Senior Product Manager".to_string(),
        skills,
        target_companies,
        applied_job_ids: "JOB-2024-1234\nJOB-2024-5678".to_string(),
        attachments: vec![],
    }
}

/// The sample result, fed through the same normalizer as live agent output.
pub fn sample_result() -> SearchResult {
    let candidate = match sample_reply() {
        Value::Object(map) => Some(CandidateResult::new(map)),
        _ => None,
    };
    normalize(candidate.as_ref())
}

fn sample_reply() -> Value {
    json!({
        "ranked_jobs": [
            {
                "job_title": "Senior Product Manager, Payments Platform",
                "company_name": "Stripe",
                "match_score": 94,
                "job_description_summary": "Lead the strategic direction of Stripe's core payments platform. Define product roadmap, work with engineering teams, and drive growth metrics for merchant-facing products.",
                "key_requirements": ["5+ years PM experience", "Payments/FinTech background", "Data-driven decision making", "Stakeholder management", "SQL proficiency"],
                "match_reasoning": "Strong alignment with the candidate's product management experience and FinTech domain interest. SQL and data analytics skills directly match requirements.",
                "application_url": "https://stripe.com/jobs/senior-pm-payments",
                "posted_date": "2025-02-15"
            },
            {
                "job_title": "Product Manager, Risk & Compliance",
                "company_name": "Plaid",
                "match_score": 87,
                "job_description_summary": "Own the product vision for Plaid's risk and compliance tools. Collaborate with cross-functional teams to help financial institutions manage regulatory requirements.",
                "key_requirements": ["4+ years PM experience", "FinTech or banking experience", "Regulatory knowledge preferred", "Agile methodologies", "Strong communication"],
                "match_reasoning": "Excellent match on PM experience and Agile/Scrum skills. Slight gap in regulatory domain knowledge.",
                "application_url": "https://plaid.com/careers/pm-risk",
                "posted_date": "2025-02-10"
            },
            {
                "job_title": "Senior Product Manager, Brokerage",
                "company_name": "Robinhood",
                "match_score": 82,
                "job_description_summary": "Drive product strategy for Robinhood's brokerage platform with a focus on acquisition, engagement, and retention.",
                "key_requirements": ["6+ years PM experience", "Consumer product experience", "Growth metrics expertise", "A/B testing", "User research skills"],
                "match_reasoning": "Good match on years of experience and user research skills. Some gap in brokerage domain knowledge.",
                "application_url": "https://robinhood.com/careers/sr-pm-brokerage",
                "posted_date": "2025-02-12"
            },
            {
                "job_title": "Product Manager, Data Infrastructure",
                "company_name": "Square",
                "match_score": 71,
                "job_description_summary": "Lead the data infrastructure product team. Build scalable data pipelines and analytics platforms that power merchant insights.",
                "key_requirements": ["4+ years PM experience", "Technical background", "Data engineering knowledge", "SQL expertise", "API design experience"],
                "match_reasoning": "Moderate match. SQL skills align, but the role requires a deeper data engineering background.",
                "application_url": "https://squareup.com/careers/pm-data",
                "posted_date": "2025-02-08"
            },
            {
                "job_title": "Associate Product Manager, Lending",
                "company_name": "SoFi",
                "match_score": 55,
                "job_description_summary": "Support the lending product team in defining features for personal loan and refinance products.",
                "key_requirements": ["2+ years PM experience", "Financial services interest", "Basic SQL", "Communication skills", "Attention to detail"],
                "match_reasoning": "FinTech domain matches, but this is a more junior role than the candidate's current level.",
                "application_url": "https://sofi.com/careers/apm-lending",
                "posted_date": "2025-02-05"
            }
        ],
        "total_found": 23,
        "filtered_count": 2,
        "companies_searched": ["Stripe", "Plaid", "Robinhood", "Square", "SoFi", "Affirm", "Brex", "Chime"],
        "ranking_summary": "Found 23 matching positions across 8 FinTech companies. 2 previously applied positions were filtered out. Top matches are concentrated at Stripe and Plaid."
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_profile_is_searchable() {
        let profile = sample_profile();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.skills.len(), 6);
        assert_eq!(profile.target_companies.len(), 3);
    }

    #[test]
    fn test_sample_result_is_fully_normalized() {
        let result = sample_result();
        assert_eq!(result.jobs.len(), 5);
        assert_eq!(result.total_found, 23);
        assert_eq!(result.filtered_count, 2);
        assert_eq!(result.companies_searched.len(), 8);
        // the sample carries no locations; they normalize to empty
        assert!(result.jobs.iter().all(|j| j.location.is_empty()));
    }
}
