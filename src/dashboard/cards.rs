//! Summary cards for the totals of the filtered transactions.

use maud::{Markup, html};

use crate::{
    dashboard::{aggregation::TransactionStats, filter::MonthFilter},
    html::format_currency,
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md hover:shadow-lg \
    transition-shadow flex flex-col justify-between";

/// Renders the statistics section: a heading naming the selected month and a
/// card for each total.
pub(super) fn stats_cards_view(stats: &TransactionStats, month: MonthFilter) -> Markup {
    html! {
        section id="statistics" class="w-full mx-auto mb-8"
        {
            h3 class="text-xl font-semibold mb-4"
            {
                "Transaction Statistics for " (month)
            }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4"
            {
                (stat_card("total-amount", "Total Sales Amount", &format_currency(stats.total_amount)))
                (stat_card("total-sold", "Total Sold Items", &stats.total_sold.to_string()))
                (stat_card("total-not-sold", "Total Not Sold Items", &stats.total_not_sold.to_string()))
            }
        }
    }
}

fn stat_card(id: &str, label: &str, value: &str) -> Markup {
    html! {
        div
            id=(id)
            class=(CARD_STYLE)
            aria-label=(format!("{label}: {value}"))
        {
            h4 class="text-sm text-gray-600 dark:text-gray-400 mb-2" { (label) }

            div class="text-3xl font-bold" data-stat-value="true" { (value) }
        }
    }
}
