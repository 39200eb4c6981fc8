use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::dto::candidate_dto::{CandidateDraft, CandidatePatch};
use crate::dto::interview_dto::{InterviewForm, ScheduleInterviewPayload};
use crate::dto::session_dto::LoginPayload;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::statistics::Statistics;
use crate::models::user::{SessionState, SessionUser};
use crate::services::backend::CandidateBackend;
use crate::services::calendar_service::{self, CalendarDay, CalendarMonth};
use crate::services::candidate_controller::CandidateListController;
use crate::services::demo_data::{demo_candidates, DataSource};
use crate::services::list_view::{ListView, Notification};
use crate::services::theme_service::ThemeSettings;
use crate::utils::photo::PhotoResolver;
use crate::utils::time;
use crate::utils::validation::validate;

/// Result of one candidate list request, tagged with the source it was
/// requested from.
#[derive(Debug)]
pub struct CandidateFetch {
    pub source: DataSource,
    pub result: Result<Vec<Candidate>>,
}

/// Glue between the backend, the candidate list and the rest of the
/// dashboard (session, statistics, interviews, calendar).
pub struct DashboardService {
    backend: Arc<dyn CandidateBackend>,
    controller: CandidateListController,
    source: DataSource,
    session: SessionState,
    interviews: Vec<Interview>,
    scheduling: Option<Candidate>,
    photos: PhotoResolver,
    theme: ThemeSettings,
    local_fallback_create: bool,
    clock: fn() -> NaiveDate,
}

impl DashboardService {
    pub fn new(backend: Arc<dyn CandidateBackend>, view: Box<dyn ListView>, config: &Config) -> Self {
        Self {
            backend,
            controller: CandidateListController::new(view, config.page_size),
            source: DataSource::Live,
            session: SessionState::Anonymous,
            interviews: Vec::new(),
            scheduling: None,
            photos: PhotoResolver::new(config.backend_url.clone()),
            theme: ThemeSettings::default(),
            local_fallback_create: config.local_fallback_create,
            clock: time::today,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn controller(&self) -> &CandidateListController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CandidateListController {
        &mut self.controller
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn interviews(&self) -> &[Interview] {
        &self.interviews
    }

    pub fn photos(&self) -> &PhotoResolver {
        &self.photos
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeSettings {
        &mut self.theme
    }

    /// Replaces the signed-in user's photo for this session only.
    pub fn set_profile_photo(&mut self, url: &str) -> Result<String> {
        if !self.session.is_authenticated() {
            return self.report(Err(Error::Unauthorized("Not signed in".to_string())));
        }
        let resolved = self.photos.resolve(Some(url));
        if let SessionState::Authenticated(user) = &mut self.session {
            user.profile_url = Some(resolved.clone());
        }
        self.theme.set_profile_photo(Some(&resolved));
        self.controller.view_mut().show_session(self.session.user());
        self.controller
            .notify(Notification::success("Profile photo updated"));
        Ok(resolved)
    }

    /// Decides between the login screen and the dashboard.
    pub async fn start(&mut self) -> &SessionState {
        match self.backend.current_session().await {
            Ok(user) => {
                info!("Resuming session for {}", user.email);
                self.enter_session(user).await;
            }
            Err(Error::Unauthorized(_)) => {
                info!("No active session, showing login");
                self.set_session(SessionState::Anonymous);
            }
            Err(e) => {
                warn!("Could not check the current session: {}", e);
                self.set_session(SessionState::Anonymous);
            }
        }
        &self.session
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<SessionUser> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        if let Err(e) = validate(&payload) {
            self.controller
                .notify(Notification::warning("Please enter your email and password"));
            return Err(e);
        }

        match self.backend.login(&payload).await {
            Ok(user) => {
                info!("Logged in as {}", user.email);
                self.controller
                    .notify(Notification::success(format!("Welcome {}!", user.display_name())));
                self.enter_session(user.clone()).await;
                Ok(user)
            }
            Err(e) => {
                warn!("Login failed for {}: {}", payload.email, e);
                self.report(Err(e))
            }
        }
    }

    pub async fn logout(&mut self) {
        if let Err(e) = self.backend.logout().await {
            warn!("Backend logout failed: {}", e);
        }
        info!("Session closed");
        self.set_session(SessionState::Anonymous);
        self.scheduling = None;
        self.interviews.clear();
        self.controller.load(Vec::new());
        self.controller
            .notify(Notification::success("Signed out successfully"));
    }

    async fn enter_session(&mut self, user: SessionUser) {
        self.set_session(SessionState::Authenticated(user));
        self.refresh().await;
        self.load_interviews().await;
    }

    fn set_session(&mut self, state: SessionState) {
        self.session = state;
        self.controller.view_mut().show_session(self.session.user());
    }

    /// Starts a list request without borrowing the service, so several can
    /// be in flight. Each is applied with [`Self::apply_fetched`] as it lands.
    pub fn fetch_candidates(&self) -> impl Future<Output = CandidateFetch> + Send + 'static {
        let backend = Arc::clone(&self.backend);
        let source = self.source;
        async move {
            let result = match source {
                DataSource::Live => backend.list_candidates().await,
                DataSource::Demo => Ok(demo_candidates()),
            };
            CandidateFetch { source, result }
        }
    }

    pub fn apply_fetched(&mut self, fetch: CandidateFetch) -> DataSource {
        if fetch.source != self.source {
            debug!(
                fetched = ?fetch.source,
                current = ?self.source,
                "Discarding candidate list requested from the other data source"
            );
            return self.source;
        }

        match fetch.result {
            Ok(candidates) => {
                info!(count = candidates.len(), source = ?fetch.source, "Candidates loaded");
                self.controller.load(candidates);
            }
            Err(e) if e.is_network() => self.switch_to_demo(&e),
            Err(Error::Unauthorized(msg)) => {
                warn!("Session expired while loading candidates: {}", msg);
                self.set_session(SessionState::Anonymous);
                self.controller.load(Vec::new());
                self.controller
                    .notify(Notification::warning("Your session has expired, please sign in again"));
            }
            Err(e) => {
                error!("Failed to load candidates: {}", e);
                self.controller.notify(e.to_notification());
            }
        }
        self.source
    }

    pub async fn refresh(&mut self) -> DataSource {
        let fetch = self.fetch_candidates().await;
        self.apply_fetched(fetch)
    }

    /// Leaves demo mode and tries the backend again.
    pub async fn retry_live(&mut self) -> DataSource {
        if self.source.is_demo() {
            info!("Retrying live backend");
            self.source = DataSource::Live;
            self.controller
                .notify(Notification::info("Trying to reach the server again"));
        }
        self.refresh().await
    }

    fn switch_to_demo(&mut self, cause: &Error) {
        warn!("Backend unavailable ({}), switching to demo data", cause);
        self.source = DataSource::Demo;
        self.controller.load(demo_candidates());
        self.controller.notify(Notification::warning(
            "Could not reach the server, showing demo data",
        ));
    }

    pub async fn create_candidate(&mut self, draft: CandidateDraft) -> Result<Candidate> {
        if let Err(e) = validate(&draft) {
            return self.report(Err(e));
        }
        let today = (self.clock)();

        if self.source.is_demo() {
            let added = self.controller.add(draft, None, today);
            return self.report_success(added, "Candidate added successfully");
        }

        match self.backend.create_candidate(&draft).await {
            Ok(created) => {
                let id = created.id;
                let added = self
                    .controller
                    .add(CandidateDraft::from(created), Some(id), today);
                self.report_success(added, "Candidate added successfully")
            }
            Err(e) if e.is_network() && self.local_fallback_create => {
                warn!("Backend create failed ({}), keeping candidate locally", e);
                let added = self.controller.add(draft, None, today);
                if added.is_ok() {
                    self.controller.notify(Notification::warning(
                        "Server unreachable, the candidate was saved locally only",
                    ));
                }
                self.report(added)
            }
            Err(e) => {
                error!("Failed to create candidate: {}", e);
                self.report(Err(e))
            }
        }
    }

    pub async fn update_candidate(&mut self, id: i64, patch: CandidatePatch) -> Result<Candidate> {
        if !self.controller.contains(id) {
            return self.report(Err(Error::candidate_not_found(id)));
        }
        if let Err(e) = validate(&patch) {
            return self.report(Err(e));
        }

        let updated = if self.source.is_demo() {
            self.controller.update(id, &patch)
        } else {
            match self.backend.update_candidate(id, &patch).await {
                Ok(confirmed) => self.controller.replace(id, confirmed),
                Err(e) => {
                    error!("Failed to update candidate {}: {}", id, e);
                    return self.report(Err(e));
                }
            }
        };
        self.report_success(updated, "Candidate updated successfully")
    }

    pub async fn delete_candidate(&mut self, id: i64) -> Result<Candidate> {
        if !self.controller.contains(id) {
            return self.report(Err(Error::candidate_not_found(id)));
        }

        if !self.source.is_demo() {
            if let Err(e) = self.backend.delete_candidate(id).await {
                error!("Failed to delete candidate {}: {}", id, e);
                return self.report(Err(e));
            }
        }
        let removed = self.controller.remove(id);
        self.report_success(removed, "Candidate deleted successfully")
    }

    pub fn open_candidate(&mut self, id: i64) -> Result<Candidate> {
        let selected = self.controller.select(id);
        self.report(selected)
    }

    pub fn close_candidate(&mut self) {
        self.controller.deselect();
    }

    /// Re-reads one record from the backend. A 404 drops the local copy.
    pub async fn refresh_candidate(&mut self, id: i64) -> Result<Candidate> {
        if self.source.is_demo() {
            let local = self
                .controller
                .get(id)
                .cloned()
                .ok_or_else(|| Error::candidate_not_found(id));
            return self.report(local);
        }

        match self.backend.get_candidate(id).await {
            Ok(fresh) => {
                let result = if self.controller.contains(id) {
                    self.controller.replace(id, fresh)
                } else {
                    let today = (self.clock)();
                    self.controller
                        .add(CandidateDraft::from(fresh), Some(id), today)
                };
                self.report(result)
            }
            Err(e) if e.is_not_found() => {
                if self.controller.contains(id) {
                    info!("Candidate {} no longer exists on the backend", id);
                    let _ = self.controller.remove(id);
                }
                self.report(Err(e))
            }
            Err(e) => {
                warn!("Could not refresh candidate {}: {}", id, e);
                self.report(Err(e))
            }
        }
    }

    pub async fn statistics(&self) -> Statistics {
        if !self.source.is_demo() {
            match self.backend.statistics().await {
                Ok(stats) => return stats,
                Err(e) => warn!("Statistics unavailable ({}), computing locally", e),
            }
        }
        self.local_statistics()
    }

    pub fn local_statistics(&self) -> Statistics {
        Statistics::from_candidates(self.controller.candidates(), &self.interviews, (self.clock)())
    }

    pub async fn load_interviews(&mut self) -> &[Interview] {
        if !self.source.is_demo() {
            match self.backend.list_interviews().await {
                Ok(interviews) => self.interviews = interviews,
                Err(e) => warn!("Could not load interviews: {}", e),
            }
        }
        &self.interviews
    }

    /// Opens the scheduling form for the selected candidate. The detail view
    /// is closed while the form is open.
    pub fn open_interview_form(&mut self) -> Result<InterviewForm> {
        let candidate = match self.controller.selected().cloned() {
            Some(c) => c,
            None => {
                return self.report(Err(Error::InvalidInput(
                    "Select a candidate before scheduling an interview".to_string(),
                )))
            }
        };
        let form = InterviewForm::for_candidate(&candidate, &self.photos, (self.clock)());
        self.controller.deselect();
        self.scheduling = Some(candidate);
        Ok(form)
    }

    pub fn cancel_interview_form(&mut self) {
        self.scheduling = None;
    }

    pub async fn schedule_interview(&mut self, date: &str, time: &str) -> Result<Interview> {
        let candidate = match self.scheduling.clone() {
            Some(c) => c,
            None => {
                return self.report(Err(Error::InvalidInput(
                    "No candidate selected for the interview".to_string(),
                )))
            }
        };
        let payload = match ScheduleInterviewPayload::parse(candidate.id, date, time) {
            Ok(p) => p,
            Err(e) => return self.report(Err(e)),
        };

        let interview = if self.source.is_demo() {
            let next_id = self.interviews.iter().filter_map(|i| i.id).max().unwrap_or(0) + 1;
            payload.into_interview(Some(next_id), Some(candidate.name.clone()))
        } else {
            match self.backend.create_interview(&payload).await {
                Ok(mut created) => {
                    if created.candidate_name.is_none() {
                        created.candidate_name = Some(candidate.name.clone());
                    }
                    created
                }
                Err(e) => {
                    error!("Failed to schedule interview for {}: {}", candidate.id, e);
                    return self.report(Err(e));
                }
            }
        };

        info!(candidate = candidate.id, date = %interview.date, "Interview scheduled");
        self.interviews.push(interview.clone());
        self.scheduling = None;
        self.controller
            .notify(Notification::success("Interview scheduled successfully"));
        Ok(interview)
    }

    pub fn calendar(&self, month: CalendarMonth) -> Vec<CalendarDay> {
        calendar_service::month_grid(month, (self.clock)(), &self.interviews)
    }

    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.controller.notify(e.to_notification());
        }
        result
    }

    fn report_success<T>(&mut self, result: Result<T>, message: &str) -> Result<T> {
        if result.is_ok() {
            self.controller.notify(Notification::success(message));
        }
        self.report(result)
    }
}
