#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;

pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_texts,
};
pub(crate) use http::{assert_content_type, assert_status_ok};

use time::{OffsetDateTime, format_description::well_known::Rfc3339, macros::datetime};

use crate::transaction::Transaction;

/// An unsold transaction in the "electronics" category, sold on 15 March 2022.
pub(crate) fn transaction(id: i64, price: f64) -> Transaction {
    Transaction {
        id,
        title: format!("Product {id}"),
        description: format!("Description of product {id}"),
        category: "electronics".to_owned(),
        price,
        sold: false,
        date_of_sale: datetime!(2022-03-15 12:00 UTC),
    }
}

pub(crate) fn sold_transaction(id: i64, price: f64, sold: bool) -> Transaction {
    Transaction {
        sold,
        ..transaction(id, price)
    }
}

/// A transaction sold at the RFC 3339 timestamp `date_of_sale`.
#[track_caller]
pub(crate) fn transaction_on(id: i64, price: f64, date_of_sale: &str) -> Transaction {
    Transaction {
        date_of_sale: OffsetDateTime::parse(date_of_sale, &Rfc3339)
            .unwrap_or_else(|error| panic!("invalid test date {date_of_sale}: {error}")),
        ..transaction(id, price)
    }
}
