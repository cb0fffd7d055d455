//! Job listing fields.

use serde::{Deserialize, Serialize};

use super::listing::{parse_date, require_title, Collection, Listing, Mode};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Internship,
    Contract,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: JobType,
    pub mode: Mode,
    pub salary: String,
    pub skills_required: String,
    pub experience: String,
    pub eligibility_criteria: String,
    pub application_deadline: String,
    pub apply_url: String,
    pub openings: Option<u32>,
}

impl Listing for Job {
    const COLLECTION: Collection = Collection::Jobs;
    const LABEL: &'static str = "Job";

    fn validate(&self) -> AppResult<()> {
        require_title(Self::LABEL, &self.title)?;
        if self.company.trim().is_empty() {
            return Err(AppError::Validation("Job company is required".to_string()));
        }
        if !self.application_deadline.trim().is_empty()
            && parse_date(&self.application_deadline).is_none()
        {
            return Err(AppError::Validation(
                "applicationDeadline must be a YYYY-MM-DD date".to_string(),
            ));
        }
        if self.openings == Some(0) {
            return Err(AppError::Validation("openings must be positive".to_string()));
        }
        Ok(())
    }
}
