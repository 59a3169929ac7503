//! The month selector and search box above the dashboard content.

use maud::{Markup, html};

use crate::{
    dashboard::filter::{MONTHS, MonthFilter},
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The element that htmx requests from the filter controls replace.
pub(super) const DASHBOARD_CONTENT_TARGET: &str = "#dashboard-content";

/// Renders the filter form.
///
/// The form works as a plain GET form without JavaScript. With htmx, changing
/// the month or typing in the search box fetches only the dashboard content.
/// Neither control sends a page number, so every change starts on page one.
pub(super) fn filter_controls_view(month: MonthFilter, search: &str) -> Markup {
    html! {
        form
            id="dashboard-filters"
            action=(endpoints::DASHBOARD_VIEW)
            method="get"
            class="w-full grid grid-cols-1 md:grid-cols-2 gap-4 mb-8"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    id="month"
                    name="month"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(endpoints::DASHBOARD_VIEW)
                    hx-include="closest form"
                    hx-target=(DASHBOARD_CONTENT_TARGET)
                    hx-push-url="true"
                    hx-indicator="#loading-indicator"
                    hx-trigger="change"
                {
                    option value=(MonthFilter::All.as_query_value()) selected[month == MonthFilter::All]
                    {
                        "All Months"
                    }

                    @for option_month in MONTHS {
                        @let filter = MonthFilter::Month(option_month);
                        option value=(filter.as_query_value()) selected[month == filter]
                        {
                            (option_month)
                        }
                    }
                }
            }

            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    id="search"
                    name="search"
                    type="search"
                    value=(search)
                    placeholder="Search transaction..."
                    autocomplete="off"
                    class=(FORM_TEXT_INPUT_STYLE)
                    hx-get=(endpoints::DASHBOARD_VIEW)
                    hx-include="closest form"
                    hx-target=(DASHBOARD_CONTENT_TARGET)
                    hx-push-url="true"
                    hx-indicator="#loading-indicator"
                    hx-trigger="input changed delay:300ms, search";
            }

            span id="loading-indicator" class="htmx-indicator text-sm text-gray-500" { "Loading..." }

            noscript
            {
                button type="submit" class="mt-2 px-4 py-2 rounded bg-blue-600 text-white" { "Apply" }
            }
        }
    }
}
