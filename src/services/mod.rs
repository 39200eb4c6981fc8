pub mod backend;
pub mod calendar_service;
pub mod candidate_controller;
pub mod dashboard_service;
pub mod demo_data;
pub mod http_backend;
pub mod list_view;
pub mod theme_service;
