/// Listing and details page parsing
use super::grouping::SeriesGrouper;
use crate::document::{self, Document};
use crate::models::{TitleDetails, TitleEntry, TitlePage, TitleStatus};
use crate::urls::strip_base;
use chrono::{DateTime, Utc};
use scraper::ElementRef;
use tracing::{debug, info};
use url::Url;

/// One post card on a listing or search page
pub const LISTING_ITEM_SELECTOR: &str = "div.post-item";

/// Raw fields of one listing card, before grouping
#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem {
    /// 1-based position among all cards on the page, linkless ones included
    pub position: usize,
    pub raw_title: String,
    /// Link with the base URL prefix removed
    pub path: String,
    pub thumbnail_url: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// Read one post card; `None` when it has no anchor at all
///
/// An empty `href` yields an empty path. The `title` attribute wins unless it
/// is empty, in which case the anchor text is used.
pub fn parse_listing_item(
    doc: &Document,
    element: ElementRef<'_>,
    position: usize,
    base: &Url,
) -> Option<ListingItem> {
    let anchor = document::select_first_in(element, "a.post-permalink")
        .or_else(|| document::select_first_in(element, "a"))?;

    let href = document::raw_attr(anchor, "href");
    let raw_title = match document::raw_attr(anchor, "title") {
        "" => document::text(anchor),
        title => title.to_string(),
    };

    let thumbnail_url = document::select_first_in(element, "img")
        .and_then(|img| doc.abs_attr(img, "src").or_else(|| doc.abs_attr(img, "data-src")));

    let published = document::select_first_in(element, "time[datetime]")
        .and_then(|time| document::attr(time, "datetime"))
        .and_then(|value| DateTime::parse_from_rfc3339(&value).ok())
        .map(|date| date.with_timezone(&Utc));

    Some(ListingItem {
        position,
        raw_title,
        path: strip_base(base, href),
        thumbnail_url,
        published,
    })
}

/// All post cards on a page, in document order; cards without an anchor are skipped
pub fn parse_listing_items(doc: &Document, base: &Url) -> Vec<ListingItem> {
    doc.select(LISTING_ITEM_SELECTOR)
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let item = parse_listing_item(doc, element, index + 1, base);
            if item.is_none() {
                debug!("Skipping listing card without a link");
            }
            item
        })
        .collect()
}

/// Parse a listing page into grouped, de-duplicated titles
pub fn parse_listing(doc: &Document, base: &Url) -> TitlePage {
    let items = parse_listing_items(doc, base);
    let scanned = items.len();

    let mut grouper = SeriesGrouper::new();
    let titles: Vec<TitleEntry> = items
        .into_iter()
        .filter_map(|item| {
            let (display, kind) = grouper.admit(&item.raw_title)?;
            Some(TitleEntry::new(display, &item.path, &kind).with_thumbnail(item.thumbnail_url))
        })
        .collect();

    let has_next_page = has_next_page(doc);
    info!(
        "📚 Parsed {} titles from {} listing items (next page: {})",
        titles.len(),
        scanned,
        has_next_page
    );

    TitlePage { titles, has_next_page }
}

/// Continuation is a "next" link or `current page < max pages` metadata
pub fn has_next_page(doc: &Document) -> bool {
    if doc.exists("a.next") || doc.exists("li.next") {
        return true;
    }

    let Some(container) = doc.select_first("[data-max-pages]") else {
        return false;
    };

    let page_attr = |name: &str| -> Option<u32> { document::attr(container, name)?.parse().ok() };
    match (page_attr("data-current-page"), page_attr("data-max-pages")) {
        (Some(current), Some(max)) => current < max,
        (None, Some(max)) => max > 1,
        _ => false,
    }
}

/// Parse a title's own page into its detail record
pub fn parse_details(doc: &Document) -> TitleDetails {
    let title = doc
        .select_first("h1.post-title")
        .map(document::text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let description = doc
        .select("div.post-content")
        .into_iter()
        .map(document::text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let genres = doc
        .select("div.categories a")
        .into_iter()
        .map(document::text)
        .filter(|genre| !genre.is_empty())
        .collect();

    let thumbnail_url = doc
        .select_first("div.post-thumbnail img")
        .and_then(|img| doc.abs_attr(img, "src"));

    TitleDetails {
        title,
        description,
        genres,
        thumbnail_url,
        status: TitleStatus::Completed,
    }
}
