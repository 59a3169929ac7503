//! Loads the transaction dataset once and shares it with the request handlers.

use std::{
    fmt,
    path::PathBuf,
    sync::{Arc, OnceLock},
    time::Duration,
};

use crate::{
    Error,
    transaction::{Transaction, parse_transactions},
};

/// Where the dataset is published by default.
pub const DEFAULT_DATA_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Where to read the transaction dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A URL that returns the dataset as a JSON array for a GET request.
    Url(String),
    /// A local JSON file with the same content.
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The raw transactions, shared between the loader and the request handlers.
///
/// The collection is published at most once. Until then, and forever if
/// loading fails, readers see an empty collection.
#[derive(Debug, Clone, Default)]
pub struct TransactionSource {
    transactions: Arc<OnceLock<Vec<Transaction>>>,
}

impl TransactionSource {
    /// Create a source with no transactions yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source that already holds `transactions`.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        let source = Self::new();
        source.publish(transactions);
        source
    }

    /// The published transactions, or an empty slice if none have arrived.
    pub fn get(&self) -> &[Transaction] {
        self.transactions
            .get()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether a dataset has been published.
    pub fn is_loaded(&self) -> bool {
        self.transactions.get().is_some()
    }

    /// Publish `transactions`.
    ///
    /// Returns `false` and drops `transactions` if a dataset was already
    /// published.
    pub fn publish(&self, transactions: Vec<Transaction>) -> bool {
        self.transactions.set(transactions).is_ok()
    }
}

/// Read and parse the dataset from `source`.
///
/// `timeout` bounds the whole HTTP request, it does not apply to files.
///
/// # Errors
/// Returns an error if the request fails, the server responds with an error
/// status, the file cannot be read, or the payload is not a JSON array.
pub async fn fetch_transactions(
    source: &DataSource,
    timeout: Duration,
) -> Result<Vec<Transaction>, Error> {
    let payload = match source {
        DataSource::Url(url) => fetch_payload(url, timeout).await?,
        DataSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|error| {
            Error::ReadFileError(format!("could not read {}: {error}", path.display()))
        })?,
    };

    parse_transactions(&payload)
}

async fn fetch_payload(url: &str, timeout: Duration) -> Result<String, Error> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|error| Error::FetchError(format!("could not build HTTP client: {error}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| Error::FetchError(format!("GET {url} failed: {error}")))?;

    response
        .text()
        .await
        .map_err(|error| Error::FetchError(format!("could not read response from {url}: {error}")))
}

/// Fetch the dataset from `source` and publish it to `target`.
///
/// Failures are logged and otherwise ignored: `target` then stays empty and
/// the dashboard shows no transactions. There is no retry.
pub async fn load_transactions(source: DataSource, timeout: Duration, target: TransactionSource) {
    tracing::info!("Fetching transactions from {source}");

    match fetch_transactions(&source, timeout).await {
        Ok(transactions) => {
            let count = transactions.len();

            if target.publish(transactions) {
                tracing::info!("Loaded {count} transactions from {source}");
            } else {
                tracing::warn!("Transactions were already loaded, ignoring {count} from {source}");
            }
        }
        Err(error) => {
            tracing::error!("Error fetching data: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use axum::{Router, http::StatusCode, routing::get};
    use tokio::net::TcpListener;

    use crate::{Error, test_utils::transaction};

    use super::{DataSource, TransactionSource, fetch_transactions, load_transactions};

    const PAYLOAD: &str = r#"[
        { "id": 1, "title": "Shirt", "price": 22.3, "description": "Slim fit",
          "category": "men's clothing", "sold": true, "dateOfSale": "2021-12-27T20:29:54+05:30" },
        { "id": 2, "title": "Ring", "price": 695, "description": "Silver dragon",
          "category": "jewelery", "sold": false, "dateOfSale": "2022-03-27T20:29:54+05:30" }
    ]"#;

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind test listener");
        let address = listener.local_addr().expect("Could not get local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        format!("http://{address}")
    }

    fn temp_file_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn fetches_transactions_over_http() {
        let base_url = serve(Router::new().route("/data.json", get(|| async { PAYLOAD }))).await;
        let source = DataSource::Url(format!("{base_url}/data.json"));

        let transactions = fetch_transactions(&source, TIMEOUT).await.unwrap();

        let ids: Vec<i64> = transactions.iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 2]);
        assert_eq!(transactions[1].price, 695.0);
    }

    #[tokio::test]
    async fn error_status_is_a_fetch_error() {
        let base_url = serve(Router::new().route(
            "/data.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
        ))
        .await;
        let source = DataSource::Url(format!("{base_url}/data.json"));

        let result = fetch_transactions(&source, TIMEOUT).await;

        assert!(
            matches!(result, Err(Error::FetchError(_))),
            "want fetch error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reads_transactions_from_file() {
        let path = temp_file_path("transactions.json");
        tokio::fs::write(&path, PAYLOAD).await.unwrap();

        let transactions = fetch_transactions(&DataSource::File(path.clone()), TIMEOUT)
            .await
            .unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].title, "Shirt");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let path = temp_file_path("does-not-exist.json");

        let result = fetch_transactions(&DataSource::File(path), TIMEOUT).await;

        assert!(matches!(result, Err(Error::ReadFileError(_))));
    }

    #[tokio::test]
    async fn load_publishes_transactions() {
        let base_url = serve(Router::new().route("/data.json", get(|| async { PAYLOAD }))).await;
        let target = TransactionSource::new();

        load_transactions(
            DataSource::Url(format!("{base_url}/data.json")),
            TIMEOUT,
            target.clone(),
        )
        .await;

        assert!(target.is_loaded());
        assert_eq!(target.get().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_leaves_source_empty() {
        let base_url = serve(Router::new().route(
            "/data.json",
            get(|| async { r#"{ "not": "an array" }"# }),
        ))
        .await;
        let target = TransactionSource::new();

        load_transactions(
            DataSource::Url(format!("{base_url}/data.json")),
            TIMEOUT,
            target.clone(),
        )
        .await;

        assert!(!target.is_loaded());
        assert!(target.get().is_empty());
    }

    #[test]
    fn publishes_only_once() {
        let source = TransactionSource::with_transactions(vec![transaction(1, 1.0)]);

        assert!(!source.publish(vec![transaction(2, 2.0), transaction(3, 3.0)]));
        assert_eq!(source.get().len(), 1);
        assert_eq!(source.get()[0].id, 1);
    }

    #[test]
    fn clones_share_the_published_dataset() {
        let source = TransactionSource::new();
        let handler_view = source.clone();

        source.publish(vec![transaction(1, 1.0)]);

        assert_eq!(handler_view.get().len(), 1);
    }
}
