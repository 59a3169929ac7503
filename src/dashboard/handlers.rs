//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for the full page and the htmx content fragment
//! - State and query types used by the handler

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        cards::stats_cards_view,
        charts::{
            DashboardChart, category_chart, category_counts_view, charts_view,
            echarts_head_element, price_range_chart,
        },
        controls::{DASHBOARD_CONTENT_TARGET, filter_controls_view},
        filter::MonthFilter,
        pipeline::Dashboard,
        tables::transactions_table,
    },
    data_source::TransactionSource,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    pagination::{PaginationConfig, create_pagination_indicators, pagination_view},
    timezone::get_timezone,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The raw transactions, empty until the dataset has been loaded.
    pub transactions: TransactionSource,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The config that controls how to display pages of transactions.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// A month name or "All". Missing means "All".
    pub month: Option<String>,
    /// Text to search for in the title, description and price.
    pub search: Option<String>,
    /// The one-based page number.
    pub page: Option<u64>,
}

/// Display the dashboard for the month, search text and page in the query.
///
/// Requests made by htmx get only the dashboard content, everything else gets
/// the full page.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let month: MonthFilter = query
        .month
        .as_deref()
        .unwrap_or_default()
        .parse()
        .inspect_err(|error| tracing::debug!("rejected dashboard query: {error}"))?;

    let timezone = get_timezone(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let config = &state.pagination_config;
    let page_size = usize::try_from(config.default_page_size).unwrap_or(usize::MAX);
    let page = query.page.unwrap_or(config.default_page).max(1);

    let mut dashboard = Dashboard::new(state.transactions.get(), timezone, page_size);
    dashboard.select_month(month);
    dashboard.search(query.search.as_deref().unwrap_or_default());
    dashboard.go_to_page(usize::try_from(page - 1).unwrap_or(usize::MAX));

    let content = dashboard_content_view(&dashboard, page, config.max_pages);

    if is_htmx_request {
        Ok(content.into_response())
    } else {
        Ok(dashboard_view(&dashboard, &content).into_response())
    }
}

/// The URL of the dashboard page with the given filters and one-based `page`.
fn dashboard_url(month: MonthFilter, search: &str, page: u64) -> String {
    let mut params = vec![("month", month.as_query_value())];
    if !search.is_empty() {
        params.push(("search", search.to_owned()));
    }
    params.push(("page", page.to_string()));

    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("{}?{}", endpoints::DASHBOARD_VIEW, query),
        Err(error) => {
            tracing::error!("Could not encode dashboard query {params:?}: {error}");
            endpoints::DASHBOARD_VIEW.to_owned()
        }
    }
}

fn build_dashboard_charts(dashboard: &Dashboard) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(dashboard.histogram()).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(dashboard.categories()).to_string(),
        },
    ]
}

/// Renders the full dashboard page: the filter controls and the content.
fn dashboard_view(dashboard: &Dashboard, content: &Markup) -> Markup {
    let page = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h1 class="text-2xl font-bold mb-6" { "Transactions Dashboard" }

                (filter_controls_view(dashboard.month(), dashboard.search_text()))

                div id="dashboard-content" class="w-full"
                {
                    (content)
                }
            }
        }
    );

    base("Dashboard", &[echarts_head_element()], &page)
}

/// Renders the part of the dashboard that changes with the filters and page:
/// the table, its pagination, the statistics and the charts.
fn dashboard_content_view(dashboard: &Dashboard, page: u64, max_pages: u64) -> Markup {
    let page_count = u64::try_from(dashboard.page_count()).unwrap_or(u64::MAX);
    let indicators = create_pagination_indicators(page, page_count, max_pages);
    let month = dashboard.month();
    let search = dashboard.search_text();
    let pagination = pagination_view(
        &indicators,
        |page| dashboard_url(month, search, page),
        DASHBOARD_CONTENT_TARGET,
    );
    let charts = build_dashboard_charts(dashboard);

    html!(
        section id="transactions" class="w-full mb-8"
        {
            (transactions_table(dashboard.page_rows(), dashboard.timezone()))

            div class="flex flex-wrap justify-between items-center gap-4"
            {
                p id="page-number" class="text-sm" { "Page No: " (page) }

                (pagination)

                p id="page-size" class="text-sm" { "Per Page: " (dashboard.page_size()) }
            }
        }

        (stats_cards_view(&dashboard.stats(), month))

        (charts_view(&charts))

        (category_counts_view(dashboard.categories()))
    )
}
