//! Builds the natural-language search message sent to the agent.

use crate::agent_client::prompts::RESULT_SCHEMA_INSTRUCTION;
use crate::profile::models::SearchProfile;

const NOT_SPECIFIED: &str = "Not specified";

/// Search message template. Replace: {current_company}, {current_role}, {years},
/// {target_domain}, {target_role}, {skills}, {optional_lines}, {schema}
const SEARCH_PROMPT_TEMPLATE: &str = "Find matching jobs for the following profile:
Current Company: {current_company}
Current Role: {current_role}
Years of Experience: {years}
Target Domain: {target_domain}
Target Job Role: {target_role}
Skills/Requirements: {skills}
{optional_lines}Please search for matching job openings, evaluate them against this profile, and return a ranked list with match scores.

{schema}";

pub fn build_search_message(profile: &SearchProfile) -> String {
    let skills = if profile.skills.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        profile.skills.as_slice().join(", ")
    };

    let mut optional_lines = String::new();
    if !profile.target_companies.is_empty() {
        optional_lines.push_str(&format!(
            "Target Companies: {}\n",
            profile.target_companies.as_slice().join(", ")
        ));
    }
    let applied = profile.applied_job_ids.trim();
    if !applied.is_empty() {
        optional_lines.push_str(&format!(
            "Previously Applied Job IDs to exclude: {applied}\n"
        ));
    }

    SEARCH_PROMPT_TEMPLATE
        .replace("{current_company}", or_not_specified(&profile.current_company))
        .replace("{current_role}", or_not_specified(&profile.current_role))
        .replace("{years}", or_not_specified(&profile.years_of_experience))
        .replace("{target_domain}", or_not_specified(&profile.target_domain))
        .replace("{target_role}", or_not_specified(&profile.target_role))
        .replace("{skills}", &skills)
        .replace("{optional_lines}", &optional_lines)
        .replace("{schema}", RESULT_SCHEMA_INSTRUCTION)
}

fn or_not_specified(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}
