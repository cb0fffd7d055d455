//! Hackathon listing fields.

use serde::{Deserialize, Serialize};

use super::listing::{parse_date, require_title, Collection, Listing, Mode};
use crate::error::{AppError, AppResult};

/// Who may enter a hackathon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipationType {
    #[default]
    Both,
    TeamsOnly,
    IndividualsOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hackathon {
    pub title: String,
    pub description: String,
    pub company: String,
    pub prize: String,
    pub team_size: u32,
    pub submission_url: String,
    pub start_date: String,
    pub end_date: String,
    pub mode: Mode,
    pub requirements: String,
    pub instructions: String,
    pub problem_statement: String,
    pub skills_required: String,
    pub eligibility_criteria: String,
    pub participation_type: ParticipationType,
    pub course_branch: String,
    pub year: String,
    pub venue_location: String,
    pub venue_time: String,
    pub submission_procedure: String,
    pub participant_limit: Option<u32>,
    /// Client-defined phase schedule, kept as an opaque JSON string.
    pub phases: Option<String>,
}

impl Listing for Hackathon {
    const COLLECTION: Collection = Collection::Hackathons;
    const LABEL: &'static str = "Hackathon";

    fn validate(&self) -> AppResult<()> {
        require_title(Self::LABEL, &self.title)?;
        if let (Some(start), Some(end)) = (parse_date(&self.start_date), parse_date(&self.end_date))
        {
            if end < start {
                return Err(AppError::Validation(
                    "Hackathon end date must not be before start date".to_string(),
                ));
            }
        }
        if self.participant_limit == Some(0) {
            return Err(AppError::Validation(
                "participantLimit must be positive".to_string(),
            ));
        }
        if let Some(phases) = &self.phases {
            if !phases.trim().is_empty() && serde_json::from_str::<serde_json::Value>(phases).is_err()
            {
                return Err(AppError::Validation("phases must be valid JSON".to_string()));
            }
        }
        Ok(())
    }
}
