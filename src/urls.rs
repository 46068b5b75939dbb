//! Locator <-> absolute URL conversions
use crate::error::Result;
use url::Url;

/// Turn a stored locator into an absolute URL on the site
///
/// Locators are relative to the base URL (`/index.php/foo/`), but an
/// absolute link that slipped through is used as-is.
pub fn site_url(base: &Url, locator: &str) -> Result<Url> {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        return Ok(Url::parse(locator)?);
    }

    let root = base.as_str().trim_end_matches('/');
    let url = if locator.starts_with('/') {
        format!("{}{}", root, locator)
    } else {
        format!("{}/{}", root, locator)
    };
    Ok(Url::parse(&url)?)
}

/// Reverse of [`site_url`]: drop the base URL prefix from a link
pub fn strip_base(base: &Url, link: &str) -> String {
    let root = base.as_str().trim_end_matches('/');
    match link.strip_prefix(root) {
        Some(rest) => rest.to_string(),
        None => link.to_string(),
    }
}

/// Make a stream URL found in page markup absolute
///
/// Root-relative paths hang off the site origin, not the install path.
pub fn absolute_stream_url(base: &Url, src: &str) -> String {
    if let Some(rest) = src.strip_prefix("//") {
        return format!("{}://{}", base.scheme(), rest);
    }

    if src.starts_with('/') {
        return format!("{}{}", base.origin().ascii_serialization(), src);
    }

    if Url::parse(src).is_ok() {
        return src.to_string();
    }

    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    dir.join(src).map(String::from).unwrap_or_else(|_| src.to_string())
}
