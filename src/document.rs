//! Parsed HTML page with CSS-selector queries
use crate::error::{Result, SourceError};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// A fetched page, parsed once and queried many times
pub struct Document {
    html: Html,
    url: Option<Url>,
}

impl Document {
    /// Parse a page with no known location
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
            url: None,
        }
    }

    /// Parse a page fetched from `url`; relative attributes resolve against it
    pub fn parse_with_url(body: &str, url: &str) -> Self {
        let url = match Url::parse(url) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!("Document URL {} does not parse: {}", url, e);
                None
            }
        };

        Self {
            html: Html::parse_document(body),
            url,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// All elements matching `css`, in document order
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match selector(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(e) => {
                debug!("{}", e);
                Vec::new()
            }
        }
    }

    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = selector(css).ok()?;
        let first = self.html.select(&selector).next();
        first
    }

    pub fn exists(&self, css: &str) -> bool {
        self.select_first(css).is_some()
    }

    /// Attribute value resolved to an absolute URL against the page location
    pub fn abs_attr(&self, element: ElementRef<'_>, name: &str) -> Option<String> {
        let value = attr(element, name)?;
        match &self.url {
            Some(base) => base.join(&value).map(String::from).ok(),
            None => Some(value),
        }
    }
}

/// Compile a CSS selector
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SourceError::Selector(format!("{}: {:?}", css, e)))
}

/// Elements under `element` matching `css`
pub fn select_in<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Ok(selector) => element.select(&selector).collect(),
        Err(e) => {
            debug!("{}", e);
            Vec::new()
        }
    }
}

pub fn select_first_in<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css).ok()?;
    let first = element.select(&selector).next();
    first
}

/// Trimmed attribute value; empty values count as missing
pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Attribute value exactly as written; missing reads as empty
pub fn raw_attr<'a>(element: ElementRef<'a>, name: &str) -> &'a str {
    element.value().attr(name).unwrap_or("")
}

/// Visible text with whitespace runs collapsed
pub fn text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}
