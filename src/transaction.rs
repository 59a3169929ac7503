//! The product transaction record and the rules for reading it from the
//! JSON payload served by the data source.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use time::{
    Date, Month, OffsetDateTime, Time,
    format_description::well_known::{Iso8601, Rfc3339},
    macros::format_description,
};
use time_tz::{Offset, TimeZone, Tz};

use crate::Error;

/// A single product transaction as published by the data source.
///
/// Records are read-only: they are created once when the dataset arrives and
/// are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The unique identifier of the transaction.
    pub id: i64,
    /// The product name.
    pub title: String,
    /// The product description.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// The sale price in dollars. Never negative.
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the transaction took place.
    #[serde(deserialize_with = "deserialize_date_of_sale")]
    pub date_of_sale: OffsetDateTime,
}

impl Transaction {
    /// The month of the sale as seen from `timezone`.
    pub fn sale_month(&self, timezone: &Tz) -> Month {
        self.local_date_of_sale(timezone).month()
    }

    /// The sale date-time converted to the offset `timezone` used at that instant.
    pub fn local_date_of_sale(&self, timezone: &Tz) -> OffsetDateTime {
        let offset = timezone.get_offset_utc(&self.date_of_sale).to_utc();

        self.date_of_sale.to_offset(offset)
    }

    /// The price as plain decimal text, e.g. "500" or "329.85".
    ///
    /// Search queries are matched against this text.
    pub fn price_text(&self) -> String {
        self.price.to_string()
    }
}

/// Parse the raw JSON payload from the data source.
///
/// The payload must be a JSON array. Each element is converted on its own,
/// and elements that do not describe a valid transaction are logged and
/// skipped so that one bad record does not hide the rest of the dataset.
///
/// # Errors
/// Returns [Error::InvalidPayload] if `payload` is not valid JSON or is not an
/// array.
pub fn parse_transactions(payload: &str) -> Result<Vec<Transaction>, Error> {
    let value: Value =
        serde_json::from_str(payload).map_err(|error| Error::InvalidPayload(error.to_string()))?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(Error::InvalidPayload(format!(
                "expected a JSON array of transactions, got {}",
                json_type_name(&other)
            )));
        }
    };

    let element_count = elements.len();
    let transactions: Vec<Transaction> = elements
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, element)| match serde_json::from_value::<Transaction>(element) {
                Ok(transaction) => Some(transaction),
                Err(error) => {
                    tracing::warn!("skipping transaction at index {index}: {error}");
                    None
                }
            },
        )
        .collect();

    let skipped = element_count - transactions.len();
    if skipped > 0 {
        tracing::warn!("skipped {skipped} of {element_count} transactions in the payload");
    }

    Ok(transactions)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = f64::deserialize(deserializer)?;

    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(de::Error::custom(format!(
            "price must be a non-negative number, got {price}"
        )))
    }
}

fn deserialize_date_of_sale<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_date_of_sale(&text)
        .ok_or_else(|| de::Error::custom(format!("could not parse \"{text}\" as a sale date")))
}

/// Parse a sale timestamp.
///
/// Tries RFC 3339 first, then the more lenient ISO 8601 parser, and finally a
/// plain calendar date which is taken to be midnight UTC.
fn parse_date_of_sale(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time);
    }

    if let Ok(date_time) = OffsetDateTime::parse(text, &Iso8601::DEFAULT) {
        return Some(date_time);
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
}
