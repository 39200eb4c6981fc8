use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::utils::photo::PhotoResolver;
use crate::utils::time::{self, hhmm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInterviewPayload {
    pub candidate_id: i64,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduleInterviewPayload {
    /// Builds the payload from raw form input (`YYYY-MM-DD`, `HH:MM`).
    pub fn parse(candidate_id: i64, date: &str, time: &str) -> Result<Self> {
        if date.trim().is_empty() || time.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Please fill in both the date and time fields".to_string(),
            ));
        }
        Ok(Self {
            candidate_id,
            date: time::parse_date(date)?,
            time: time::parse_time(time)?,
            notes: None,
        })
    }

    pub fn into_interview(self, id: Option<i64>, candidate_name: Option<String>) -> Interview {
        Interview {
            id,
            candidate_id: self.candidate_id,
            candidate_name,
            date: self.date,
            time: self.time,
            notes: self.notes,
        }
    }
}

/// Pre-filled scheduling form for the selected candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewForm {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub position: String,
    pub photo_url: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
}

impl InterviewForm {
    pub fn for_candidate(candidate: &Candidate, photos: &PhotoResolver, today: NaiveDate) -> Self {
        Self {
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
            position: candidate.position_or_default().to_string(),
            photo_url: photos.resolve(candidate.photo_url.as_deref()),
            date: time::tomorrow(today),
            time: time::default_interview_time(),
        }
    }
}
