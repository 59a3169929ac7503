//! Chart generation and rendering for the dashboard.
//!
//! Two ECharts visualizations of the filtered transactions:
//! - **Price Range Chart**: Bar chart of the number of items in each price bucket
//! - **Category Chart**: Pie chart of the number of items per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and inline initialization code. The code is
//! inline so that it also runs when htmx swaps in new dashboard content.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{CategoryCount, PriceHistogram},
    html::HeadElement,
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// The script tag that loads ECharts, for the page head.
pub(super) fn echarts_head_element() -> HeadElement {
    HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())
}

/// Renders the chart containers followed by the script that draws them.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-8"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }

            script { (charts_script(charts)) }
        }
    )
}

/// Generates JavaScript that (re)initializes the ECharts instance for each chart.
///
/// An existing instance on the same element is disposed first, since htmx
/// replaces the containers whenever the filters change. `</` is escaped so a
/// category name cannot close the script element.
fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom || typeof echarts === "undefined") {{
                        return;
                    }}
                    const existing = echarts.getInstanceByDom(chartDom);
                    if (existing) {{
                        existing.dispose();
                    }}
                    const chart = echarts.init(chartDom);
                    chart.setOption({});
                    window.addEventListener('resize', () => chart.resize());
                }})();"#,
                chart.id,
                chart.options.replace("</", "<\\/")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(script_content)
}

/// Creates the bar chart of item counts per price range.
pub(super) fn price_range_chart(histogram: &PriceHistogram) -> Chart {
    let labels: Vec<&str> = histogram.iter().map(|range| range.label()).collect();
    let values: Vec<f64> = histogram.iter().map(|range| range.count as f64).collect();

    Chart::new()
        .title(Title::new().text("Product Distribution by Price Range"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Number of Items").data(values))
}

/// Creates the pie chart of item counts per category.
pub(super) fn category_chart(categories: &[CategoryCount]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|category| (category.count as f64, category.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Items by Category"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name("Category")
                .radius(vec!["35%", "60%"])
                .data(data),
        )
}

/// A plain list of the category counts, readable without JavaScript.
pub(super) fn category_counts_view(categories: &[CategoryCount]) -> Markup {
    html! {
        ul id="category-counts" class="sr-only"
        {
            @for category in categories {
                li data-category=(category.category) { (category.category) ": " (category.count) }
            }
        }
    }
}
