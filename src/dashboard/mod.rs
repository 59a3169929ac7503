//! Dashboard module
//!
//! Provides a page that filters the transactions by month and search text and
//! summarises the result with a paged table, totals and charts.

mod aggregation;
mod cards;
mod charts;
mod controls;
mod filter;
mod handlers;
mod pipeline;
mod tables;

pub use aggregation::{PriceBucket, TransactionStats};
pub use filter::MonthFilter;
pub use handlers::get_dashboard_page;
pub use pipeline::Dashboard;
