//! A dashboard for a dataset of product transactions.
//!
//! The dataset is fetched once when the server starts. The dashboard filters
//! it by month of sale and by a search text, shows the matching transactions a
//! page at a time, and summarises them with sales totals, a price histogram and
//! a breakdown by category.
//!
//! This library provides a web server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod data_source;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod not_found;
mod pagination;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{Dashboard, MonthFilter, PriceBucket, TransactionStats};
pub use data_source::{
    DEFAULT_DATA_URL, DataSource, TransactionSource, fetch_transactions, load_transactions,
};
pub use logging::{add_tracing_layer, setup_logging};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use transaction::{Transaction, parse_transactions};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The dataset could not be downloaded, e.g. the request timed out or the
    /// server responded with an error status.
    #[error("could not fetch transactions: {0}")]
    FetchError(String),

    /// The dataset file could not be read.
    #[error("could not read transactions: {0}")]
    ReadFileError(String),

    /// The dataset is not valid JSON or is not a JSON array.
    #[error("invalid transaction data: {0}")]
    InvalidPayload(String),

    /// The month selector is neither "All" nor the name of a month.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// The timezone is not a canonical timezone name, e.g. "Pacific/Auckland".
    #[error("\"{0}\" is not a valid canonical timezone name")]
    InvalidTimezoneError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "Invalid month \"{month}\". Use \"All\" or a month name such as \"March\"."
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        test_utils::{parse_html_document, select_texts},
    };

    #[tokio::test]
    async fn invalid_month_is_bad_request() {
        let response = Error::InvalidMonth("Smarch".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_renders_404_page() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_eq!(select_texts(&html, "h1"), ["404"]);
    }

    #[tokio::test]
    async fn invalid_timezone_explains_fix() {
        let response = Error::InvalidTimezoneError("Middle/Earth".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let text = select_texts(&html, "p").join(" ");
        assert!(text.contains("Middle/Earth"), "got {text}");
    }

    #[tokio::test]
    async fn other_errors_hide_details() {
        let response = Error::FetchError("connection refused".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let text = select_texts(&html, "p").join(" ");
        assert!(!text.contains("connection refused"));
    }
}
