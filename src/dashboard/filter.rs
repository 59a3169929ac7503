//! The filter stage: selects the transactions that match the month selector
//! and the search text.

use std::{fmt, str::FromStr};

use time::Month;
use time_tz::Tz;

use crate::{Error, transaction::Transaction};

/// The month selector shown above the transactions table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    /// Do not filter by month.
    #[default]
    All,
    /// Only keep transactions sold in this month (of any year).
    Month(Month),
}

/// All selectable months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl MonthFilter {
    /// The value used for this selector in query strings and select options.
    pub fn as_query_value(self) -> String {
        self.to_string()
    }

    /// Whether a transaction sold in `month` passes this filter.
    pub fn matches(self, month: Month) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(selected) => selected == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => write!(f, "All"),
            MonthFilter::Month(month) => write!(f, "{month}"),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();

        if text.is_empty() || text.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }

        MONTHS
            .iter()
            .find(|month| month.to_string().eq_ignore_ascii_case(text))
            .map(|&month| MonthFilter::Month(month))
            .ok_or_else(|| Error::InvalidMonth(text.to_owned()))
    }
}

/// Whether `transaction` matches the lowercase search text `query`.
///
/// The query is matched as a substring of the title, the description and the
/// price written out as text, so "50" also matches a price of 150 or 500.
pub fn matches_search(transaction: &Transaction, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    transaction.title.to_lowercase().contains(query)
        || transaction.description.to_lowercase().contains(query)
        || transaction.price_text().contains(query)
}

/// Select the transactions sold in the month chosen by `month_filter`.
///
/// When `search` is given, transactions must also match it (see
/// [matches_search]); the comparison ignores case. The order of
/// `transactions` is preserved.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    month_filter: MonthFilter,
    search: Option<&str>,
    timezone: &Tz,
) -> Vec<&'a Transaction> {
    let query = search.map(str::to_lowercase).unwrap_or_default();

    transactions
        .iter()
        .filter(|transaction| month_filter.matches(transaction.sale_month(timezone)))
        .filter(|transaction| matches_search(transaction, &query))
        .collect()
}
