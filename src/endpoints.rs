//! The URIs served by the app.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the transactions table, statistics and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
