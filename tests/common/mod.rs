#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use recruit_dashboard::dto::candidate_dto::{CandidateDraft, CandidatePatch};
use recruit_dashboard::dto::interview_dto::ScheduleInterviewPayload;
use recruit_dashboard::dto::session_dto::LoginPayload;
use recruit_dashboard::models::interview::Interview;
use recruit_dashboard::models::statistics::Statistics;
use recruit_dashboard::models::user::SessionUser;
use recruit_dashboard::services::backend::CandidateBackend;
use recruit_dashboard::{Candidate, CandidateStatus, Error, Result};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

pub fn candidate(id: i64, name: &str, status: CandidateStatus, date: (i32, u32, u32)) -> Candidate {
    Candidate {
        id,
        name: name.to_string(),
        email: format!("{}@ejemplo.com", name.to_lowercase().replace(' ', ".")),
        phone: format!("555-{:04}", id),
        position: None,
        status,
        registered_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        notes: None,
        photo_url: None,
    }
}

/// Ana (Active, 2025-03-15) and Carlos (In process, 2025-03-20).
pub fn ana_and_carlos() -> Vec<Candidate> {
    vec![
        candidate(1, "Ana García", CandidateStatus::Active, (2025, 3, 15)),
        candidate(2, "Carlos López", CandidateStatus::InProcess, (2025, 3, 20)),
    ]
}

pub fn admin() -> SessionUser {
    SessionUser {
        id: Some(1),
        email: "admin@ejemplo.com".to_string(),
        name: Some("Admin".to_string()),
        profile_url: None,
    }
}

/// In-memory stand-in for the REST backend.
#[derive(Default)]
pub struct FakeBackend {
    pub candidates: Mutex<Vec<Candidate>>,
    pub interviews: Mutex<Vec<Interview>>,
    pub session: Mutex<Option<SessionUser>>,
    /// Scripted list responses, consumed in call order before `candidates` is used.
    pub list_script: Mutex<VecDeque<(Duration, Vec<Candidate>)>>,
    pub offline: AtomicBool,
}

impl FakeBackend {
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        let backend = Self::default();
        *backend.candidates.lock().unwrap() = candidates;
        backend
    }

    pub fn signed_in(self) -> Self {
        *self.session.lock().unwrap() = Some(admin());
        self
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn script_list(&self, delay: Duration, candidates: Vec<Candidate>) {
        self.list_script.lock().unwrap().push_back((delay, candidates));
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Network("connection refused".to_string()));
        }
        Ok(())
    }

    fn not_found(id: i64) -> Error {
        Error::candidate_not_found(id)
    }
}

#[async_trait]
impl CandidateBackend for FakeBackend {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        self.check_online()?;
        let scripted = self.list_script.lock().unwrap().pop_front();
        match scripted {
            Some((delay, candidates)) => {
                tokio::time::sleep(delay).await;
                Ok(candidates)
            }
            None => Ok(self.candidates.lock().unwrap().clone()),
        }
    }

    async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        self.check_online()?;
        self.candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create_candidate(&self, draft: &CandidateDraft) -> Result<Candidate> {
        self.check_online()?;
        let mut candidates = self.candidates.lock().unwrap();
        let id = candidates.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = draft.clone().into_candidate(id, today());
        candidates.push(created.clone());
        Ok(created)
    }

    async fn update_candidate(&self, id: i64, patch: &CandidatePatch) -> Result<Candidate> {
        self.check_online()?;
        let mut candidates = self.candidates.lock().unwrap();
        let existing = candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        existing.apply_patch(patch);
        Ok(existing.clone())
    }

    async fn delete_candidate(&self, id: i64) -> Result<()> {
        self.check_online()?;
        let mut candidates = self.candidates.lock().unwrap();
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        if candidates.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn current_session(&self) -> Result<SessionUser> {
        self.check_online()?;
        self.session
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Unauthorized("no session".to_string()))
    }

    async fn login(&self, payload: &LoginPayload) -> Result<SessionUser> {
        self.check_online()?;
        if payload.password != "secret" {
            return Err(Error::Unauthorized("bad credentials".to_string()));
        }
        let user = SessionUser {
            email: payload.email.clone(),
            ..admin()
        };
        *self.session.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn statistics(&self) -> Result<Statistics> {
        self.check_online()?;
        let candidates = self.candidates.lock().unwrap().clone();
        let interviews = self.interviews.lock().unwrap().clone();
        Ok(Statistics::from_candidates(&candidates, &interviews, today()))
    }

    async fn create_interview(&self, payload: &ScheduleInterviewPayload) -> Result<Interview> {
        self.check_online()?;
        let mut interviews = self.interviews.lock().unwrap();
        let id = interviews.len() as i64 + 1;
        let interview = payload.clone().into_interview(Some(id), None);
        interviews.push(interview.clone());
        Ok(interview)
    }

    async fn list_interviews(&self) -> Result<Vec<Interview>> {
        self.check_online()?;
        Ok(self.interviews.lock().unwrap().clone())
    }
}
