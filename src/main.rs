use std::sync::Arc;

use recruit_dashboard::{
    config::{get_config, init_config},
    models::candidate::{Candidate, CandidateDetail},
    models::user::SessionUser,
    services::http_backend::HttpBackend,
    utils::photo::PhotoResolver,
    DashboardService, ListView, Notification, Pagination,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prints the candidate table to stdout.
struct ConsoleView {
    photos: PhotoResolver,
}

impl ListView for ConsoleView {
    fn render_rows(&mut self, rows: &[&Candidate]) {
        if rows.is_empty() {
            println!("No candidates found");
            return;
        }
        for candidate in rows {
            let detail = CandidateDetail::new(candidate, &self.photos);
            println!(
                "{:>4}  {:<24} {:<30} {:<24} {:<12} {}",
                detail.id, detail.name, detail.email, detail.position, detail.status, detail.registered
            );
        }
    }

    fn render_pagination(&mut self, pagination: Pagination) {
        println!(
            "Page {} of {} ({} candidates)",
            pagination.current_page, pagination.total_pages, pagination.total_items
        );
    }

    fn show_detail(&mut self, candidate: &Candidate) {
        let detail = CandidateDetail::new(candidate, &self.photos);
        println!("{:#?}", detail);
    }

    fn close_detail(&mut self) {}

    fn notify(&mut self, notification: Notification) {
        println!("[{:?}] {}", notification.kind, notification.message);
    }

    fn show_session(&mut self, user: Option<&SessionUser>) {
        match user {
            Some(user) => println!("Signed in as {}", user.display_name()),
            None => println!("Not signed in"),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config();

    info!("Using backend at {}", config.backend_url);
    let backend = Arc::new(HttpBackend::from_config(config)?);
    let view = ConsoleView {
        photos: PhotoResolver::new(config.backend_url.clone()),
    };
    let mut dashboard = DashboardService::new(backend, Box::new(view), config);

    if !dashboard.start().await.is_authenticated() {
        let email = std::env::var("DASHBOARD_EMAIL").unwrap_or_default();
        let password = std::env::var("DASHBOARD_PASSWORD").unwrap_or_default();
        if dashboard.login(&email, &password).await.is_err() {
            info!("Continuing without a session");
            dashboard.refresh().await;
        }
    }

    let stats = dashboard.statistics().await;
    println!(
        "Total: {}  Active: {}  In process: {}  Pending interviews: {}",
        stats.total, stats.active, stats.in_process, stats.pending_interviews
    );
    Ok(())
}
