use crate::model::Product;

pub const DEFAULT_PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub items: Vec<Product>,
    pub total_pages: usize,
}

/// One element of the pagination control row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Page(usize),
    Gap,
}

/// Slices the sorted collection into one 1-based page. `total_pages` is at
/// least 1 even for empty input. An out-of-range page (including page 0)
/// yields an empty slice; no clamping happens here, navigation stays within
/// bounds at the UI layer.
pub fn paginate(products: &[Product], page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = products.len().div_ceil(page_size).max(1);

    let items = match page.checked_sub(1) {
        Some(zero_based) => {
            let start = zero_based.saturating_mul(page_size);
            if start >= products.len() {
                Vec::new()
            } else {
                let end = (start + page_size).min(products.len());
                products[start..end].to_vec()
            }
        }
        None => Vec::new(),
    };

    Page { items, total_pages }
}

/// Display window for the pagination controls: at most five consecutive page
/// numbers centered on the current page, truncated to `[1, total_pages]`.
/// A leading `1 …` appears when the window starts above 2, a trailing
/// `… total_pages` when it ends below `total_pages - 1`.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageControl> {
    let start = current.saturating_sub(2).max(1);
    let end = current.saturating_add(2).min(total_pages);

    let mut controls = Vec::new();
    if start > 2 {
        controls.push(PageControl::Page(1));
        controls.push(PageControl::Gap);
    }
    for page in start..=end {
        controls.push(PageControl::Page(page));
    }
    if end + 1 < total_pages {
        controls.push(PageControl::Gap);
        controls.push(PageControl::Page(total_pages));
    }
    controls
}
