//! This modules defines the common functionality for paging data.

use maud::{Markup, html};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page.
    pub default_page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// The number of pages needed to show `item_count` items, `page_size` at a time.
pub fn page_count(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }

    item_count.div_ceil(page_size)
}

/// The items on the page at the zero-based `page_index`.
///
/// Pages past the end are empty rather than an error.
pub fn page_slice<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    let start = page_index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

/// Build the indicators for one-based page numbers.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

const PAGE_LINK_STYLE: &str = "block px-3 py-2 rounded text-blue-600 hover:underline \
    dark:text-blue-500";
const CURRENT_PAGE_STYLE: &str = "block px-3 py-2 rounded font-bold text-white bg-blue-600 \
    dark:bg-blue-500";

/// Render the page navigation.
///
/// `page_url` maps a one-based page number to the URL of that page. The
/// `hx_target` is the element htmx should swap with the linked page.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
    hx_target: &str,
) -> Markup {
    html! {
        nav class="pagination flex justify-center" aria-label="Pagination"
        {
            ul class="pagination flex flex-wrap items-center gap-1 p-0 m-0"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                a
                                    href=(page_url(*page))
                                    hx-get=(page_url(*page))
                                    hx-target=(hx_target)
                                    hx-push-url="true"
                                    class=(PAGE_LINK_STYLE)
                                { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class=(CURRENT_PAGE_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="block px-3 py-2 text-gray-500" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a
                                    href=(page_url(*page))
                                    hx-get=(page_url(*page))
                                    hx-target=(hx_target)
                                    hx-push-url="true"
                                    role="button"
                                    class=(PAGE_LINK_STYLE)
                                { "← Previous" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a
                                    href=(page_url(*page))
                                    hx-get=(page_url(*page))
                                    hx-target=(hx_target)
                                    hx-push-url="true"
                                    role="button"
                                    class=(PAGE_LINK_STYLE)
                                { "Next →" }
                            }
                        }
                    }
                }
            }
        }
    }
}
