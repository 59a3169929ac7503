//! The paged table of filtered transactions.

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};
use time_tz::Tz;

use crate::{
    html::{
        BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency,
        truncate_text,
    },
    transaction::Transaction,
};

const DESCRIPTION_MAX_GRAPHEMES: usize = 40;

const SALE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

/// Renders `transactions` as a table, with sale dates shown in `timezone`.
pub(super) fn transactions_table(transactions: &[&Transaction], timezone: &Tz) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow mb-4"
        {
            table
                id="transactions-table"
                class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Product Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Transaction Date" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction, timezone))
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td
                                colspan="7"
                                data-empty-state="true"
                                class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, timezone: &Tz) -> Markup {
    let (description, tooltip) =
        truncate_text(&transaction.description, DESCRIPTION_MAX_GRAPHEMES);
    let local_date = transaction.local_date_of_sale(timezone);
    let date_text = local_date
        .format(SALE_DATE_FORMAT)
        .unwrap_or_else(|_| local_date.date().to_string());

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            th
                scope="row"
                class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
            {
                (transaction.title)
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(BADGE_STYLE) { (transaction.category) }
            }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (format_currency(transaction.price)) }
            td class=(TABLE_CELL_STYLE) { @if transaction.sold { "Yes" } @else { "No" } }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (date_text) }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time_tz::timezones;

    use crate::test_utils::{select_texts, sold_transaction, transaction_on};

    use super::transactions_table;

    #[test]
    fn renders_one_row_per_transaction() {
        let mut first = sold_transaction(1, 329.85, true);
        first.title = "Backpack".to_owned();
        first.category = "men's clothing".to_owned();
        let second = transaction_on(2, 22.3, "2021-12-27T20:29:54Z");
        let transactions = [first, second];
        let rows: Vec<_> = transactions.iter().collect();
        let utc = timezones::get_by_name("Etc/UTC").unwrap();

        let html = Html::parse_fragment(&transactions_table(&rows, utc).into_string());

        let row_selector = Selector::parse("tr[data-transaction-row]").unwrap();
        let rows: Vec<_> = html.select(&row_selector).collect();
        assert_eq!(rows.len(), 2);

        let cell_selector = Selector::parse("td, th").unwrap();
        let first_row: Vec<String> = rows[0]
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(
            first_row,
            [
                "1",
                "Backpack",
                "Description of product 1",
                "men's clothing",
                "$329.85",
                "Yes",
                "3/15/2022"
            ]
        );

        let second_row: Vec<String> = rows[1]
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(second_row[5], "No");
        assert_eq!(second_row[6], "12/27/2021");
    }

    #[test]
    fn sale_date_uses_local_timezone() {
        let late_night = transaction_on(1, 10.0, "2022-03-31T20:00:00Z");
        let rows = [&late_night];
        let auckland = timezones::get_by_name("Pacific/Auckland").unwrap();

        let html = Html::parse_fragment(&transactions_table(&rows, auckland).into_string());

        let cells = select_texts(&html, "tr[data-transaction-row] td");
        assert_eq!(cells.last().map(String::as_str), Some("4/1/2022"));
    }

    #[test]
    fn long_description_is_truncated_with_tooltip() {
        let mut long = sold_transaction(1, 10.0, false);
        long.description = "Your perfect pack for everyday use and walks in the forest. \
            Stash your laptop (up to 15 inches) in the padded sleeve."
            .to_owned();
        let rows = [&long];
        let utc = timezones::get_by_name("Etc/UTC").unwrap();

        let html = Html::parse_fragment(&transactions_table(&rows, utc).into_string());

        let cell = html
            .select(&Selector::parse("td[title]").unwrap())
            .next()
            .expect("truncated description should have a tooltip");
        assert_eq!(cell.value().attr("title"), Some(long.description.as_str()));
        assert!(cell.text().collect::<String>().ends_with("..."));
    }

    #[test]
    fn empty_table_shows_message() {
        let utc = timezones::get_by_name("Etc/UTC").unwrap();

        let html = Html::parse_fragment(&transactions_table(&[], utc).into_string());

        assert_eq!(
            select_texts(&html, "td[data-empty-state]"),
            ["No transactions found."]
        );
        assert!(select_texts(&html, "tr[data-transaction-row]").is_empty());
    }
}
