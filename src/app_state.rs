//! Implements a struct that holds the state of the web server.

use crate::{
    Error, data_source::TransactionSource, pagination::PaginationConfig, timezone::get_timezone,
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions shown on the dashboard, empty until they are loaded.
    pub transactions: TransactionSource,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] that reads transactions from `transactions`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a known timezone.
    pub fn new(
        transactions: TransactionSource,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        if get_timezone(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            transactions,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        })
    }
}
