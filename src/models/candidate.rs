use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dto::candidate_dto::CandidatePatch;
use crate::utils::photo::PhotoResolver;
use crate::utils::time::format_date;

pub const POSITION_PLACEHOLDER: &str = "Not specified";
pub const NOTES_PLACEHOLDER: &str = "No notes";

/// Field names on the wire are the backend's (`nombre`, `telefono`, ...); the
/// English spellings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(rename = "nombre", alias = "name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "telefono", alias = "phone", default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(rename = "puesto", alias = "position", default)]
    pub position: Option<String>,
    #[serde(rename = "estado", alias = "status", default, deserialize_with = "null_as_default")]
    pub status: CandidateStatus,
    #[serde(rename = "fecha_registro", alias = "registered_date", default)]
    pub registered_date: Option<NaiveDate>,
    #[serde(rename = "notas", alias = "notes", default)]
    pub notes: Option<String>,
    #[serde(rename = "foto_url", alias = "photo_url", default)]
    pub photo_url: Option<String>,
}

/// Reads `null` as the type's default instead of failing the whole record.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Candidate {
    pub fn position_or_default(&self) -> &str {
        non_empty(self.position.as_deref()).unwrap_or(POSITION_PLACEHOLDER)
    }

    pub fn notes_or_default(&self) -> &str {
        non_empty(self.notes.as_deref()).unwrap_or(NOTES_PLACEHOLDER)
    }

    /// `needle` must already be lowercased. Position only takes part when set.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(&self.name)
            || contains(&self.email)
            || contains(&self.phone)
            || self.position.as_deref().map(contains).unwrap_or(false)
    }

    /// Merges every field present in `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &CandidatePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(position) = &patch.position {
            self.position = Some(position.clone());
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(photo_url) = &patch.photo_url {
            self.photo_url = Some(photo_url.clone());
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Candidate pipeline state. The backend stores the Spanish labels; the
/// English spellings parse to the same variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CandidateStatus {
    Active,
    #[default]
    InProcess,
    Rejected,
    Other(String),
}

impl CandidateStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CandidateStatus::Active => "Activo",
            CandidateStatus::InProcess => "En proceso",
            CandidateStatus::Rejected => "Rechazado",
            CandidateStatus::Other(label) => label,
        }
    }

    pub fn badge(&self) -> BadgeClass {
        match self {
            CandidateStatus::Active => BadgeClass::Success,
            CandidateStatus::Rejected => BadgeClass::Danger,
            _ => BadgeClass::Warning,
        }
    }
}

impl From<String> for CandidateStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "activo" | "active" => CandidateStatus::Active,
            "en proceso" | "in-process" | "in process" | "in_process" => {
                CandidateStatus::InProcess
            }
            "rechazado" | "rejected" => CandidateStatus::Rejected,
            _ => CandidateStatus::Other(raw.trim().to_string()),
        }
    }
}

impl From<&str> for CandidateStatus {
    fn from(raw: &str) -> Self {
        CandidateStatus::from(raw.to_string())
    }
}

impl From<CandidateStatus> for String {
    fn from(status: CandidateStatus) -> Self {
        match status {
            CandidateStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for CandidateStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CandidateStatus::from(s))
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeClass {
    Success,
    Danger,
    Warning,
}

impl BadgeClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeClass::Success => "badge-success",
            BadgeClass::Danger => "badge-danger",
            BadgeClass::Warning => "badge-warning",
        }
    }
}

/// What the detail panel shows for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub status: String,
    pub badge: &'static str,
    pub registered: String,
    pub notes: String,
    pub photo_url: String,
}

impl CandidateDetail {
    pub fn new(candidate: &Candidate, photos: &PhotoResolver) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            position: candidate.position_or_default().to_string(),
            status: candidate.status.to_string(),
            badge: candidate.status.badge().css_class(),
            registered: format_date(candidate.registered_date),
            notes: candidate.notes_or_default().to_string(),
            photo_url: photos.resolve(candidate.photo_url.as_deref()),
        }
    }
}
