//! Ties the filter, aggregation and pagination stages together.

use time_tz::Tz;

use crate::{
    dashboard::{
        aggregation::{
            CategoryCount, PriceHistogram, TransactionStats, calculate_price_histogram,
            calculate_transaction_stats, count_by_category,
        },
        filter::{MonthFilter, filter_transactions},
    },
    pagination::{page_count, page_slice},
    transaction::Transaction,
};

/// The dashboard inputs and everything derived from them.
///
/// Changing the raw transactions, the month or the search text recomputes all
/// derived values from scratch and returns to the first page.
pub struct Dashboard<'a> {
    transactions: &'a [Transaction],
    timezone: &'a Tz,
    page_size: usize,
    month: MonthFilter,
    search: String,
    page_index: usize,
    filtered: Vec<&'a Transaction>,
    stats: TransactionStats,
    histogram: PriceHistogram,
    categories: Vec<CategoryCount>,
}

impl<'a> Dashboard<'a> {
    /// Show every transaction in `transactions`, starting on the first page.
    pub fn new(transactions: &'a [Transaction], timezone: &'a Tz, page_size: usize) -> Self {
        let mut dashboard = Self {
            transactions,
            timezone,
            page_size,
            month: MonthFilter::All,
            search: String::new(),
            page_index: 0,
            filtered: Vec::new(),
            stats: TransactionStats::default(),
            histogram: calculate_price_histogram(&[]),
            categories: Vec::new(),
        };
        dashboard.recompute();

        dashboard
    }

    /// Swap in a new raw collection, e.g. once the dataset has been fetched.
    pub fn replace_transactions(&mut self, transactions: &'a [Transaction]) {
        self.transactions = transactions;
        self.recompute();
    }

    /// Only show transactions sold in `month`.
    pub fn select_month(&mut self, month: MonthFilter) {
        self.month = month;
        self.recompute();
    }

    /// Filter by `text`. An empty string clears the search.
    pub fn search(&mut self, text: &str) {
        text.trim().clone_into(&mut self.search);
        self.recompute();
    }

    /// Move to the zero-based `page_index`.
    ///
    /// The index is not checked against [Dashboard::page_count]; a page past
    /// the end simply has no rows.
    pub fn go_to_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    fn recompute(&mut self) {
        let search = (!self.search.is_empty()).then_some(self.search.as_str());

        self.filtered = filter_transactions(self.transactions, self.month, search, self.timezone);
        self.stats = calculate_transaction_stats(&self.filtered);
        self.histogram = calculate_price_histogram(&self.filtered);
        self.categories = count_by_category(&self.filtered);
        self.page_index = 0;
    }

    /// The selected month.
    pub fn month(&self) -> MonthFilter {
        self.month
    }

    /// The trimmed search text, empty when not searching.
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// The zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The maximum number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The timezone used for months and sale dates.
    pub fn timezone(&self) -> &Tz {
        self.timezone
    }

    /// The transactions that pass the month and search filters, in source order.
    pub fn filtered(&self) -> &[&'a Transaction] {
        &self.filtered
    }

    /// Totals over the filtered transactions.
    pub fn stats(&self) -> TransactionStats {
        self.stats
    }

    /// Counts of the filtered transactions per price bucket.
    pub fn histogram(&self) -> &PriceHistogram {
        &self.histogram
    }

    /// Counts of the filtered transactions per category.
    pub fn categories(&self) -> &[CategoryCount] {
        &self.categories
    }

    /// The filtered transactions on the current page.
    pub fn page_rows(&self) -> &[&'a Transaction] {
        page_slice(&self.filtered, self.page_index, self.page_size)
    }

    /// The number of pages needed for the filtered transactions.
    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }
}
