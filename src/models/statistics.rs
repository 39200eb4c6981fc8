use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::interview::Interview;

/// Dashboard counters shown above the candidate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    #[serde(alias = "activos")]
    pub active: usize,
    #[serde(alias = "en_proceso")]
    pub in_process: usize,
    #[serde(alias = "entrevistas_pendientes")]
    pub pending_interviews: usize,
}

impl Statistics {
    pub fn from_candidates(
        candidates: &[Candidate],
        interviews: &[Interview],
        today: NaiveDate,
    ) -> Self {
        let count = |status: CandidateStatus| {
            candidates.iter().filter(|c| c.status == status).count()
        };
        Self {
            total: candidates.len(),
            active: count(CandidateStatus::Active),
            in_process: count(CandidateStatus::InProcess),
            pending_interviews: interviews.iter().filter(|i| i.is_pending(today)).count(),
        }
    }
}
