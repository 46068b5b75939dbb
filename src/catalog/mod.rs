/// Catalog browsing: listing requests, series grouping and listing parsing
///
/// Listings are WordPress archive pages. Page 1 is the bare archive, later
/// pages add a `page/N/` segment, and the ordering comes from query
/// parameters.

pub mod categories;
pub mod grouping;
pub mod parser;

pub use categories::{category_at, category_filter, CategoryOption, CATEGORIES};
pub use grouping::{classify_title, SeriesGrouper};
pub use parser::{has_next_page, parse_details, parse_listing, parse_listing_items, ListingItem};

use crate::error::Result;
use crate::models::{ListingMode, ListingQuery};
use tracing::debug;
use url::Url;

/// `page/N/` for N > 1, empty for the first page
pub fn page_segment(page: u32) -> String {
    if page <= 1 {
        String::new()
    } else {
        format!("page/{}/", page)
    }
}

/// Absolute URL for a listing or search call
pub fn listing_url(base: &Url, query: &ListingQuery) -> Result<Url> {
    let root = base.as_str().trim_end_matches('/');
    let page = page_segment(query.page);
    let search_text = query.query.as_deref().map(str::trim).unwrap_or("");

    let url = match query.mode {
        ListingMode::Popular => Url::parse_with_params(
            &format!("{}/index.php/{}{}", root, CATEGORIES[0].path, page),
            &[("orderby", "views"), ("order", "DESC")],
        )?,
        ListingMode::Latest => Url::parse_with_params(
            &format!("{}/index.php/{}{}", root, CATEGORIES[0].path, page),
            &[("orderby", "date"), ("order", "DESC")],
        )?,
        ListingMode::Search if !search_text.is_empty() => search_url(base, search_text, query.page)?,
        ListingMode::Search => {
            let category = category_at(query.category);
            debug!("Browsing category '{}' ({})", category.label, category.path);
            Url::parse_with_params(
                &format!("{}/index.php/{}{}", root, category.path, page),
                &[("orderby", "date"), ("order", "DESC")],
            )?
        }
    };

    Ok(url)
}

/// Full-text search on the site itself
pub fn search_url(base: &Url, text: &str, page: u32) -> Result<Url> {
    let root = base.as_str().trim_end_matches('/');
    Ok(Url::parse_with_params(
        &format!("{}/index.php/{}", root, page_segment(page)),
        &[("s", text)],
    )?)
}
