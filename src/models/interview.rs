use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::time::hhmm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "recluta_id")]
    pub candidate_id: i64,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(alias = "fecha")]
    pub date: NaiveDate,
    #[serde(alias = "hora", with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Interview {
    pub fn is_pending(&self, today: NaiveDate) -> bool {
        self.date >= today
    }

    pub fn calendar_label(&self) -> String {
        match &self.candidate_name {
            Some(name) => format!("Interview: {}", name),
            None => format!("Interview: candidate #{}", self.candidate_id),
        }
    }
}
