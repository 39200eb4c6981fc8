use async_trait::async_trait;

use crate::dto::candidate_dto::{CandidateDraft, CandidatePatch};
use crate::dto::interview_dto::ScheduleInterviewPayload;
use crate::dto::session_dto::LoginPayload;
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::statistics::Statistics;
use crate::models::user::SessionUser;

/// The REST service that owns candidate, session and interview data.
///
/// Implementations report a missing record as `Error::NotFound`, a missing
/// session as `Error::Unauthorized` and anything else that went wrong on the
/// way as a network-class error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateBackend: Send + Sync {
    async fn list_candidates(&self) -> Result<Vec<Candidate>>;

    async fn get_candidate(&self, id: i64) -> Result<Candidate>;

    async fn create_candidate(&self, draft: &CandidateDraft) -> Result<Candidate>;

    async fn update_candidate(&self, id: i64, patch: &CandidatePatch) -> Result<Candidate>;

    async fn delete_candidate(&self, id: i64) -> Result<()>;

    async fn current_session(&self) -> Result<SessionUser>;

    async fn login(&self, payload: &LoginPayload) -> Result<SessionUser>;

    async fn logout(&self) -> Result<()>;

    async fn statistics(&self) -> Result<Statistics>;

    async fn create_interview(&self, payload: &ScheduleInterviewPayload) -> Result<Interview>;

    async fn list_interviews(&self) -> Result<Vec<Interview>>;
}
