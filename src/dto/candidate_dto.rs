use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::{Candidate, CandidateStatus};

/// Form contents for a new candidate. The id is assigned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct CandidateDraft {
    #[validate(length(min = 1))]
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(rename = "telefono", alias = "phone")]
    pub phone: String,
    #[serde(rename = "puesto", alias = "position", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "estado", alias = "status", default)]
    pub status: CandidateStatus,
    #[serde(rename = "notas", alias = "notes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "foto_url", alias = "photo_url", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(
        rename = "fecha_registro",
        alias = "registered_date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub registered_date: Option<NaiveDate>,
}

impl CandidateDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn into_candidate(self, id: i64, today: NaiveDate) -> Candidate {
        Candidate {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            status: self.status,
            registered_date: Some(self.registered_date.unwrap_or(today)),
            notes: self.notes,
            photo_url: self.photo_url,
        }
    }
}

impl From<Candidate> for CandidateDraft {
    fn from(candidate: Candidate) -> Self {
        Self {
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            position: candidate.position,
            status: candidate.status,
            notes: candidate.notes,
            photo_url: candidate.photo_url,
            registered_date: candidate.registered_date,
        }
    }
}

/// Partial update. `None` leaves the stored value as it is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct CandidatePatch {
    #[validate(length(min = 1))]
    #[serde(rename = "nombre", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    #[serde(rename = "telefono", alias = "phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "puesto", alias = "position", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "estado", alias = "status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CandidateStatus>,
    #[serde(rename = "notas", alias = "notes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "foto_url", alias = "photo_url", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl CandidatePatch {
    pub fn status(status: CandidateStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
