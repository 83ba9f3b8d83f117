use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::profile::tags::TagSet;

/// A user's job-search profile as collected by the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProfile {
    pub current_company: String,
    pub current_role: String,
    pub years_of_experience: String,
    pub target_domain: String,
    pub target_role: String,
    pub skills: TagSet,
    pub target_companies: TagSet,
    /// One previously-applied job id per line.
    pub applied_job_ids: String,
    /// Opaque ids of files already uploaded elsewhere, forwarded to the agent untouched.
    pub attachments: Vec<String>,
}

/// The scalar part of a profile; tags are edited through their own endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileFields {
    pub current_company: String,
    pub current_role: String,
    pub years_of_experience: String,
    pub target_domain: String,
    pub target_role: String,
    pub applied_job_ids: String,
    pub attachments: Vec<String>,
}

impl SearchProfile {
    /// A search needs at least a target role or a target domain.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.target_role.trim().is_empty() && self.target_domain.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter at least a Target Role or Target Domain.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_fields(&self, fields: ProfileFields) -> Self {
        Self {
            current_company: fields.current_company,
            current_role: fields.current_role,
            years_of_experience: fields.years_of_experience,
            target_domain: fields.target_domain,
            target_role: fields.target_role,
            skills: self.skills.clone(),
            target_companies: self.target_companies.clone(),
            applied_job_ids: fields.applied_job_ids,
            attachments: fields.attachments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_role_or_domain() {
        let profile = SearchProfile {
            current_role: "Product Manager".to_string(),
            target_role: "   ".to_string(),
            ..SearchProfile::default()
        };
        assert!(matches!(profile.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_accepts_domain_only() {
        let profile = SearchProfile {
            target_domain: "FinTech".to_string(),
            ..SearchProfile::default()
        };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_with_fields_keeps_tags() {
        let profile = SearchProfile {
            skills: TagSet::new().add("SQL"),
            target_companies: TagSet::new().add("Stripe"),
            ..SearchProfile::default()
        };
        let updated = profile.with_fields(ProfileFields {
            target_role: "Senior PM".to_string(),
            ..ProfileFields::default()
        });
        assert_eq!(updated.target_role, "Senior PM");
        assert_eq!(updated.skills.as_slice(), ["SQL"]);
        assert_eq!(updated.target_companies.as_slice(), ["Stripe"]);
    }

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: SearchProfile =
            serde_json::from_str(r#"{"target_role": "PM", "skills": ["SQL", "SQL"]}"#).unwrap();
        assert_eq!(profile.target_role, "PM");
        assert_eq!(profile.skills.len(), 1);
        assert!(profile.attachments.is_empty());
    }
}
