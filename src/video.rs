/// Stream extraction from title and episode pages
///
/// Pages embed a video.js player whose `data-settings` attribute is a JSON
/// blob with a `sources` array. Pages without one sometimes carry an iframe
/// player instead; those are detected but not resolved.
use crate::document::{self, Document};
use crate::models::StreamSource;
use crate::urls::absolute_stream_url;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

const PLAYER_SELECTOR: &str = "video-js";
const PLAYER_SETTINGS_ATTR: &str = "data-settings";

/// Direct stream URLs on a page, in document order
pub fn parse_video_sources(doc: &Document, base: &Url) -> Vec<StreamSource> {
    let mut sources = Vec::new();

    for (index, player) in doc.select(PLAYER_SELECTOR).into_iter().enumerate() {
        let Some(settings) = document::attr(player, PLAYER_SETTINGS_ATTR) else {
            continue;
        };

        match player_sources(&settings, base) {
            Ok(found) => sources.extend(found),
            Err(e) => debug!("Ignoring unreadable settings on player {}: {}", index, e),
        }
    }

    if sources.is_empty() {
        let embeds = embedded_players(doc);
        if !embeds.is_empty() {
            debug!("No direct sources; {} embedded player(s) left unresolved: {:?}", embeds.len(), embeds);
        }
    }

    info!("▶️ Extracted {} stream sources", sources.len());
    sources
}

/// Streams listed in one `data-settings` blob
///
/// Only malformed JSON is an error. Entries in `sources` are read one by one;
/// a non-object entry or a missing `src` skips that entry, and a `type` that
/// is not a string just leaves the label plain.
pub fn player_sources(settings: &str, base: &Url) -> serde_json::Result<Vec<StreamSource>> {
    let settings: Value = serde_json::from_str(settings)?;
    let Some(entries) = settings.get("sources").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let src = entry.get("src").and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty());
            let Some(src) = src else {
                debug!("Skipping player source without a usable src: {}", entry);
                return None;
            };
            let kind = entry.get("type").and_then(Value::as_str);
            Some(StreamSource::new(absolute_stream_url(base, src), stream_label(kind)))
        })
        .collect())
}

fn stream_label(kind: Option<&str>) -> String {
    match kind.map(str::trim).filter(|k| !k.is_empty()) {
        Some(kind) => format!("Stream ({})", kind),
        None => "Stream".to_string(),
    }
}

/// `src` of every iframe that looks like an embedded player
///
/// Resolving these into streams is not implemented; callers only get to
/// know they exist.
pub fn embedded_players(doc: &Document) -> Vec<String> {
    doc.select("iframe")
        .into_iter()
        .filter_map(|iframe| document::attr(iframe, "src"))
        .filter(|src| src.contains("embed"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://103.225.94.27/mediaserver").unwrap()
    }

    fn player(settings: &str) -> String {
        format!("<video-js data-settings='{}'></video-js>", settings)
    }

    #[test]
    fn test_root_relative_source_uses_origin() {
        let doc = Document::parse(&player(r#"{"sources":[{"src":"/v/a.mp4","type":"mp4"}]}"#));
        let sources = parse_video_sources(&doc, &base());

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "http://103.225.94.27/v/a.mp4");
        assert_eq!(sources[0].video_url, sources[0].url);
        assert_eq!(sources[0].quality, "Stream (mp4)");
    }

    #[test]
    fn test_invalid_json_is_skipped_without_error() {
        let html = format!(
            "{}{}",
            player("{not json"),
            player(r#"{"sources":[{"src":"http://cdn.example/b.mkv"}]}"#)
        );
        let sources = parse_video_sources(&Document::parse(&html), &base());

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "http://cdn.example/b.mkv");
        assert_eq!(sources[0].quality, "Stream");
    }

    #[test]
    fn test_only_invalid_json_yields_nothing() {
        let doc = Document::parse(&player("[[["));
        assert!(parse_video_sources(&doc, &base()).is_empty());
    }

    #[test]
    fn test_missing_and_null_fields() {
        let doc = Document::parse(&format!(
            "{}{}{}",
            player(r#"{"autoplay":true}"#),
            player(r#"{"sources":null}"#),
            player(r#"{"sources":[{"type":"mp4"},{"src":null},{"src":""},{"src":"/ok.mp4","type":null}]}"#)
        ));
        let sources = parse_video_sources(&doc, &base());

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "http://103.225.94.27/ok.mp4");
    }

    #[test]
    fn test_non_string_type_keeps_source() {
        let doc = Document::parse(&player(r#"{"sources":[{"src":"/v/a.mp4","type":1}]}"#));
        let sources = parse_video_sources(&doc, &base());

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "http://103.225.94.27/v/a.mp4");
        assert_eq!(sources[0].quality, "Stream");
    }

    #[test]
    fn test_junk_entry_keeps_valid_sources() {
        let doc = Document::parse(&player(r#"{"sources":[{"src":"/v/a.mp4"},"junk",42,{"src":7}]}"#));
        let sources = parse_video_sources(&doc, &base());

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url, "http://103.225.94.27/v/a.mp4");
    }

    #[test]
    fn test_sources_not_an_array() {
        let doc = Document::parse(&player(r#"{"sources":{"src":"/v/a.mp4"}}"#));
        assert!(parse_video_sources(&doc, &base()).is_empty());
    }

    #[test]
    fn test_document_order_without_dedup() {
        let doc = Document::parse(&format!(
            "{}{}",
            player(r#"{"sources":[{"src":"/b.mp4"},{"src":"/a.mp4"}]}"#),
            player(r#"{"sources":[{"src":"/b.mp4"}]}"#)
        ));
        let urls: Vec<String> = parse_video_sources(&doc, &base()).into_iter().map(|s| s.url).collect();

        assert_eq!(
            urls,
            vec!["http://103.225.94.27/b.mp4", "http://103.225.94.27/a.mp4", "http://103.225.94.27/b.mp4"]
        );
    }

    #[test]
    fn test_iframe_fallback_detects_but_does_not_resolve() {
        let doc = Document::parse(
            r#"<iframe src="http://103.225.94.27/player/embed/123"></iframe>
               <iframe src="http://ads.example/banner"></iframe>"#,
        );

        assert_eq!(embedded_players(&doc), vec!["http://103.225.94.27/player/embed/123"]);
        assert!(parse_video_sources(&doc, &base()).is_empty());
    }
}
