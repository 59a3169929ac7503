use std::{net::SocketAddr, path::PathBuf, process::ExitCode, time::Duration};

use axum_server::Handle;
use clap::Parser;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use transactions_dashboard::{
    AppState, DEFAULT_DATA_URL, DataSource, PaginationConfig, TransactionSource,
    add_tracing_layer, build_router, graceful_shutdown, load_transactions, setup_logging,
};

/// The web server for the product transactions dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the JSON array of transactions to show.
    #[arg(long, default_value = DEFAULT_DATA_URL)]
    data_url: String,

    /// Read the transactions from a local JSON file instead of a URL.
    #[arg(long, conflicts_with = "data_url")]
    data_file: Option<PathBuf>,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical timezone name used to group sales by month, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The number of transactions to show per page.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    page_size: u64,

    /// How long to wait for the transactions to download, in seconds.
    #[arg(long, default_value_t = 30)]
    fetch_timeout: u64,

    /// Write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("Could not open log file: {error}");
        return ExitCode::FAILURE;
    }

    let transactions = TransactionSource::new();
    let pagination_config = PaginationConfig {
        default_page_size: args.page_size,
        ..Default::default()
    };
    let state = match AppState::new(transactions.clone(), &args.timezone, pagination_config) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start server: {error}");
            return ExitCode::FAILURE;
        }
    };

    let source = match args.data_file {
        Some(path) => DataSource::File(path),
        None => DataSource::Url(args.data_url),
    };
    tokio::spawn(load_transactions(
        source,
        Duration::from_secs(args.fetch_timeout),
        transactions,
    ));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on http://{}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
