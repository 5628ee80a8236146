pub mod auth;
pub mod dashboard_service;
pub mod scheduling_service;
pub mod seed;

pub use auth::AuthService;
pub use dashboard_service::DashboardService;
pub use scheduling_service::SchedulingService;
