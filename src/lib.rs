pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::error::{Error, Result};
pub use crate::models::candidate::{Candidate, CandidateStatus};
pub use crate::services::candidate_controller::{CandidateListController, SortKey, StatusFilter};
pub use crate::services::dashboard_service::DashboardService;
pub use crate::services::list_view::{ListView, Notification, Pagination};
