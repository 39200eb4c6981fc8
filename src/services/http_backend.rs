use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::dto::candidate_dto::{CandidateDraft, CandidatePatch};
use crate::dto::interview_dto::ScheduleInterviewPayload;
use crate::dto::session_dto::{LoginPayload, LoginResponse};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::interview::Interview;
use crate::models::statistics::Statistics;
use crate::models::user::SessionUser;
use crate::services::backend::CandidateBackend;

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()?;
        Ok(Self::new(client, config.backend_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", path, e);
            Error::Reqwest(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(Error::NotFound(format!("{} not found", path))),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized(body)),
            other => {
                warn!("Backend {} returned {}: {}", path, other, body);
                Err(Error::Network(format!("{} returned {}", path, other)))
            }
        }
    }

    async fn json<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = self.send(path, request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CandidateBackend for HttpBackend {
    async fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let path = "candidates";
        self.json(path, self.client.get(self.url(path))).await
    }

    async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        let path = format!("candidates/{}", id);
        self.json(&path, self.client.get(self.url(&path)))
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::candidate_not_found(id),
                other => other,
            })
    }

    async fn create_candidate(&self, draft: &CandidateDraft) -> Result<Candidate> {
        let path = "candidates";
        info!("Creating candidate {}", draft.email);
        self.json(path, self.client.post(self.url(path)).json(draft))
            .await
    }

    async fn update_candidate(&self, id: i64, patch: &CandidatePatch) -> Result<Candidate> {
        let path = format!("candidates/{}", id);
        self.json(&path, self.client.put(self.url(&path)).json(patch))
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::candidate_not_found(id),
                other => other,
            })
    }

    async fn delete_candidate(&self, id: i64) -> Result<()> {
        let path = format!("candidates/{}", id);
        self.send(&path, self.client.delete(self.url(&path)))
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => Error::candidate_not_found(id),
                other => other,
            })?;
        Ok(())
    }

    async fn current_session(&self) -> Result<SessionUser> {
        let path = "session/current";
        self.json(path, self.client.get(self.url(path))).await
    }

    async fn login(&self, payload: &LoginPayload) -> Result<SessionUser> {
        let path = "session/login";
        let response: LoginResponse = self
            .json(path, self.client.post(self.url(path)).json(payload))
            .await?;
        Ok(response.user)
    }

    async fn logout(&self) -> Result<()> {
        let path = "session/logout";
        self.send(path, self.client.post(self.url(path))).await?;
        Ok(())
    }

    async fn statistics(&self) -> Result<Statistics> {
        let path = "statistics";
        self.json(path, self.client.get(self.url(path))).await
    }

    async fn create_interview(&self, payload: &ScheduleInterviewPayload) -> Result<Interview> {
        let path = "interviews";
        self.json(path, self.client.post(self.url(path)).json(payload))
            .await
    }

    async fn list_interviews(&self) -> Result<Vec<Interview>> {
        let path = "interviews";
        self.json(path, self.client.get(self.url(path))).await
    }
}
