//! Summary statistics, the price histogram and category counts for the
//! filtered transactions.

use std::collections::HashMap;

use crate::transaction::Transaction;

/// Totals over a collection of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionStats {
    /// Sum of the prices of all transactions.
    pub total_amount: f64,
    /// Number of transactions that were sold.
    pub total_sold: usize,
    /// Number of transactions that were not sold.
    pub total_not_sold: usize,
}

/// One of the fixed price ranges used for the histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    /// $0 to $50.
    UpTo50,
    /// $51 to $100.
    UpTo100,
    /// $101 to $150.
    UpTo150,
    /// $151 and above.
    Over150,
}

impl PriceBucket {
    /// All buckets in ascending price order.
    pub const ALL: [PriceBucket; 4] = [
        PriceBucket::UpTo50,
        PriceBucket::UpTo100,
        PriceBucket::UpTo150,
        PriceBucket::Over150,
    ];

    /// The bucket `price` falls into.
    ///
    /// Upper bounds are inclusive so whole dollar prices land in the labelled
    /// range, and fractional prices between two ranges (e.g. $50.50) go to the
    /// higher one.
    pub fn for_price(price: f64) -> Self {
        if price <= 50.0 {
            PriceBucket::UpTo50
        } else if price <= 100.0 {
            PriceBucket::UpTo100
        } else if price <= 150.0 {
            PriceBucket::UpTo150
        } else {
            PriceBucket::Over150
        }
    }

    /// The label shown on the chart axis.
    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::UpTo50 => "$0 - $50",
            PriceBucket::UpTo100 => "$51 - $100",
            PriceBucket::UpTo150 => "$101 - $150",
            PriceBucket::Over150 => "$151+",
        }
    }

    fn index(self) -> usize {
        match self {
            PriceBucket::UpTo50 => 0,
            PriceBucket::UpTo100 => 1,
            PriceBucket::UpTo150 => 2,
            PriceBucket::Over150 => 3,
        }
    }
}

/// The number of transactions in a price bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRangeCount {
    /// The price range.
    pub bucket: PriceBucket,
    /// The number of transactions in the range.
    pub count: usize,
}

impl PriceRangeCount {
    /// The label of the price range.
    pub fn label(&self) -> &'static str {
        self.bucket.label()
    }
}

/// Transaction counts for every price bucket, in ascending price order.
pub type PriceHistogram = [PriceRangeCount; 4];

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// The category name as it appears in the dataset.
    pub category: String,
    /// The number of transactions in the category.
    pub count: usize,
}

/// Sum the prices and count sold and unsold transactions.
pub fn calculate_transaction_stats(transactions: &[&Transaction]) -> TransactionStats {
    transactions
        .iter()
        .fold(TransactionStats::default(), |mut stats, transaction| {
            stats.total_amount += transaction.price;

            if transaction.sold {
                stats.total_sold += 1;
            } else {
                stats.total_not_sold += 1;
            }

            stats
        })
}

/// Count the transactions in each price bucket.
pub fn calculate_price_histogram(transactions: &[&Transaction]) -> PriceHistogram {
    let mut histogram = PriceBucket::ALL.map(|bucket| PriceRangeCount { bucket, count: 0 });

    for transaction in transactions {
        histogram[PriceBucket::for_price(transaction.price).index()].count += 1;
    }

    histogram
}

/// Count the transactions in each category.
///
/// Categories are listed in the order they first appear in `transactions`.
pub fn count_by_category(transactions: &[&Transaction]) -> Vec<CategoryCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CategoryCount> = Vec::new();

    for transaction in transactions {
        let category = transaction.category.as_str();

        match positions.get(category) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(category, counts.len());
                counts.push(CategoryCount {
                    category: category.to_owned(),
                    count: 1,
                });
            }
        }
    }

    counts
}
