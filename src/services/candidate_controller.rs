use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dto::candidate_dto::{CandidateDraft, CandidatePatch};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::services::list_view::{ListView, Notification, Pagination};
use crate::utils::text::collate;
use crate::utils::validation::validate;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CandidateStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: &CandidateStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "todos" => Ok(StatusFilter::All),
            _ => Ok(StatusFilter::Only(CandidateStatus::from(s))),
        }
    }
}

impl From<CandidateStatus> for StatusFilter {
    fn from(status: CandidateStatus) -> Self {
        StatusFilter::Only(status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    DateAsc,
    DateDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
        }
    }

    fn compare(&self, a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
        match self {
            SortKey::NameAsc => collate(&a.name, &b.name),
            SortKey::NameDesc => collate(&b.name, &a.name),
            SortKey::DateAsc => a.registered_date.cmp(&b.registered_date),
            SortKey::DateDesc => b.registered_date.cmp(&a.registered_date),
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name-asc" | "nombre-asc" => Ok(SortKey::NameAsc),
            "name-desc" | "nombre-desc" => Ok(SortKey::NameDesc),
            "date-asc" | "fecha-asc" => Ok(SortKey::DateAsc),
            "date-desc" | "fecha-desc" => Ok(SortKey::DateDesc),
            other => Err(Error::InvalidInput(format!("Unknown sort option: {}", other))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active search, status filter and sort order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: Option<SortKey>,
}

/// Filters then sorts. Without a sort key the collection order is kept.
fn compute_visible<'a>(candidates: &'a [Candidate], query: &ListQuery) -> Vec<&'a Candidate> {
    let needle = query.search.to_lowercase();
    let mut rows: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.matches_search(&needle) && query.status.matches(&c.status))
        .collect();
    if let Some(sort) = query.sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }
    rows
}

/// Owns the candidate collection and keeps the table, the page indicator and
/// the detail panel in step with it.
pub struct CandidateListController {
    candidates: Vec<Candidate>,
    query: ListQuery,
    selected: Option<i64>,
    page_size: usize,
    view: Box<dyn ListView>,
}

impl CandidateListController {
    pub fn new(view: Box<dyn ListView>, page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            query: ListQuery::default(),
            selected: None,
            page_size,
            view,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn get(&self, id: i64) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn visible_subset(&self) -> Vec<&Candidate> {
        compute_visible(&self.candidates, &self.query)
    }

    /// Id used when a record is created without the backend.
    pub fn next_local_id(&self) -> i64 {
        self.candidates.iter().map(|c| c.id).max().map_or(1, |max| max + 1)
    }

    pub fn load(&mut self, candidates: Vec<Candidate>) {
        debug!(count = candidates.len(), "Loading candidate collection");
        self.candidates = candidates;
        self.query.search.clear();
        self.query.status = StatusFilter::All;
        if self.selected.take().is_some() {
            self.view.close_detail();
        }
        self.publish();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.publish();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status = filter;
        self.publish();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.query.sort = Some(key);
        self.publish();
    }

    pub fn clear_sort(&mut self) {
        self.query.sort = None;
        self.publish();
    }

    pub fn select(&mut self, id: i64) -> Result<Candidate> {
        let candidate = self
            .get(id)
            .cloned()
            .ok_or_else(|| Error::candidate_not_found(id))?;
        self.selected = Some(id);
        self.view.show_detail(&candidate);
        Ok(candidate)
    }

    pub fn deselect(&mut self) {
        if self.selected.take().is_some() {
            self.view.close_detail();
        }
    }

    /// Appends a new record. `assigned_id` is the backend id; without one the
    /// next local id is used until the next reload replaces it.
    pub fn add(
        &mut self,
        draft: CandidateDraft,
        assigned_id: Option<i64>,
        today: NaiveDate,
    ) -> Result<Candidate> {
        validate(&draft)?;
        let id = assigned_id.unwrap_or_else(|| self.next_local_id());
        let candidate = draft.into_candidate(id, today);

        match self.candidates.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                warn!(id, "Backend id already present locally, replacing stale record");
                *existing = candidate.clone();
            }
            None => self.candidates.push(candidate.clone()),
        }
        self.publish();
        Ok(candidate)
    }

    pub fn update(&mut self, id: i64, patch: &CandidatePatch) -> Result<Candidate> {
        validate(patch)?;
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::candidate_not_found(id))?;
        candidate.apply_patch(patch);
        let merged = candidate.clone();

        if self.selected == Some(id) {
            self.view.show_detail(&merged);
        }
        self.publish();
        Ok(merged)
    }

    /// Swaps in a record confirmed by the backend. Fields it no longer carries
    /// are cleared locally too.
    pub fn replace(&mut self, id: i64, mut record: Candidate) -> Result<Candidate> {
        let slot = self
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::candidate_not_found(id))?;
        record.id = id;
        *slot = record.clone();

        if self.selected == Some(id) {
            self.view.show_detail(&record);
        }
        self.publish();
        Ok(record)
    }

    pub fn remove(&mut self, id: i64) -> Result<Candidate> {
        let index = self
            .candidates
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::candidate_not_found(id))?;
        let removed = self.candidates.remove(index);

        if self.selected == Some(id) {
            self.selected = None;
            self.view.close_detail();
        }
        self.publish();
        Ok(removed)
    }

    pub fn notify(&mut self, notification: Notification) {
        self.view.notify(notification);
    }

    pub fn view_mut(&mut self) -> &mut dyn ListView {
        self.view.as_mut()
    }

    fn publish(&mut self) {
        let rows = compute_visible(&self.candidates, &self.query);
        let pagination = Pagination::first_page(rows.len(), self.page_size);
        self.view.render_rows(&rows);
        self.view.render_pagination(pagination);
    }
}
