use async_trait::async_trait;
use mediaserver_source::{
    CatalogSource, FetchedPage, ListingQuery, MediaServer, PageFetcher, RequestDescriptor, Result,
    SourceConfig, SourceError, SourceSession, TitleEntry, TitleKind,
};
use std::collections::HashMap;
use std::sync::Mutex;

const BASE: &str = "http://103.225.94.27/mediaserver";

/// Serves canned pages keyed by request URL and records what was asked for
struct MockFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages.iter().map(|(url, body)| (url.to_string(), body.clone())).collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<FetchedPage> {
        self.requested.lock().unwrap().push(request.url.clone());
        match self.pages.get(&request.url) {
            Some(body) => Ok(FetchedPage::new(request.url.clone(), body.clone())),
            None => Err(SourceError::Status { status: 404, url: request.url.clone() }),
        }
    }
}

fn card(title: &str, slug: &str) -> String {
    format!(
        r#"<article><div class="post-item">
             <a class="post-permalink" href="{BASE}/index.php/{slug}/" title="{title}">{title}</a>
             <div class="thumb"><img src="{BASE}/wp-content/uploads/{slug}.jpg"></div>
           </div></article>"#
    )
}

fn listing_page(cards: &[String], next: bool) -> String {
    let nav = if next { r#"<nav><a class="next page-numbers" href="page/2/">Next</a></nav>"# } else { "" };
    format!("<html><body><main>{}</main>{}</body></html>", cards.join("\n"), nav)
}

fn source() -> MediaServer {
    MediaServer::new(SourceConfig::default()).unwrap()
}

#[tokio::test]
async fn test_popular_listing_groups_series() {
    let popular_url = format!("{BASE}/index.php/categories/movies/?orderby=views&order=DESC");
    let fetcher = MockFetcher::new(&[(
        popular_url.as_str(),
        listing_page(
            &[
                card("Show Name S01E02 1080p", "show-name-s01e02"),
                card("Random Movie (2020)", "random-movie-2020"),
                card("Show Name S01E01 1080p", "show-name-s01e01"),
                card("Other Show s03e07", "other-show-s03e07"),
            ],
            true,
        ),
    )]);
    let session = SourceSession::new(source(), fetcher);

    let page = session.listing(&ListingQuery::popular(1)).await.unwrap();

    assert!(page.has_next_page);
    let titles: Vec<&str> = page.titles.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Show Name", "Random Movie (2020)", "Other Show"]);
    assert_eq!(page.titles[0].url, "/index.php/show-name-s01e02/?is_series=true&base_title=Show+Name");
    assert_eq!(page.titles[1].url, "/index.php/random-movie-2020/");
    assert_eq!(
        page.titles[1].thumbnail_url.as_deref(),
        Some("http://103.225.94.27/mediaserver/wp-content/uploads/random-movie-2020.jpg")
    );
    assert_eq!(session.fetcher().requested(), vec![popular_url]);
}

#[tokio::test]
async fn test_series_pipeline_from_listing_to_streams() {
    let latest_url = format!("{BASE}/index.php/categories/movies/?orderby=date&order=DESC");
    let search_url = format!("{BASE}/index.php/?s=Show+Name");
    let episode_url = format!("{BASE}/index.php/show-name-s01e05/");

    let fetcher = MockFetcher::new(&[
        (
            latest_url.as_str(),
            listing_page(&[card("Show Name S01E05", "show-name-s01e05")], false),
        ),
        (
            search_url.as_str(),
            listing_page(
                &[
                    card("Show Name S01E03", "show-name-s01e03"),
                    card("Show Name S01E05", "show-name-s01e05"),
                    card("Show Name S01E01", "show-name-s01e01"),
                ],
                false,
            ),
        ),
        (
            episode_url.as_str(),
            r#"<html><body>
                 <video-js class="vjs" data-settings='{"autoplay":false,"sources":[{"src":"/media/show-name-s01e05.mp4","type":"video/mp4"}]}'></video-js>
               </body></html>"#
                .to_string(),
        ),
    ]);
    let session = SourceSession::new(source(), fetcher);

    let page = session.listing(&ListingQuery::latest(1)).await.unwrap();
    assert!(!page.has_next_page);
    let series = &page.titles[0];
    assert_eq!(series.kind(), TitleKind::Series { name: "Show Name".to_string() });

    let episodes = session.episodes(series).await.unwrap();
    let numbers: Vec<f32> = episodes.iter().map(|e| e.episode_number).collect();
    assert_eq!(numbers, vec![5.0, 3.0, 1.0]);
    assert_eq!(episodes[0].url, "/index.php/show-name-s01e05/");

    let streams = session.videos(&episodes[0]).await.unwrap();
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0].url, "http://103.225.94.27/media/show-name-s01e05.mp4");
    assert_eq!(streams[0].quality, "Stream (video/mp4)");

    assert_eq!(session.fetcher().requested(), vec![latest_url, search_url, episode_url]);
}

#[tokio::test]
async fn test_movie_pipeline_reuses_title_page() {
    let movie_url = format!("{BASE}/index.php/random-movie-2020/");
    let movie_page = r#"<html><body>
          <h1 class="post-title">Random Movie (2020)</h1>
          <div class="post-thumbnail"><img src="/wp-content/uploads/random.jpg"></div>
          <div class="post-content"><p>A movie.</p></div>
          <div class="categories"><a>English</a></div>
          <video-js data-settings='{"sources":[{"src":"http://cdn.example/random.mkv"}]}'></video-js>
        </body></html>"#
        .to_string();

    let fetcher = MockFetcher::new(&[(movie_url.as_str(), movie_page)]);
    let session = SourceSession::new(source(), fetcher);
    let title = TitleEntry::new(
        "Random Movie (2020)",
        "/index.php/random-movie-2020/",
        &TitleKind::Movie,
    );

    let details = session.details(&title).await.unwrap();
    assert_eq!(details.title, "Random Movie (2020)");
    assert_eq!(details.genres, vec!["English"]);
    assert_eq!(details.thumbnail_url.as_deref(), Some("http://103.225.94.27/wp-content/uploads/random.jpg"));

    let episodes = session.episodes(&title).await.unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].name, "Full Movie");
    assert_eq!(episodes[0].episode_number, 1.0);
    assert_eq!(episodes[0].url, "/index.php/random-movie-2020/");

    let streams = session.videos(&episodes[0]).await.unwrap();
    assert_eq!(streams[0].url, "http://cdn.example/random.mkv");
    assert_eq!(session.fetcher().requested(), vec![movie_url.clone(), movie_url.clone(), movie_url]);
}

#[tokio::test]
async fn test_series_with_query_permalink_still_searches() {
    let latest_url = format!("{BASE}/index.php/categories/movies/?orderby=date&order=DESC");
    let search_url = format!("{BASE}/index.php/?s=Foo");
    let listing = format!(
        r#"<html><body><div class="post-item"><a href="{BASE}/index.php/?p=123" title="Foo S01E01"></a></div></body></html>"#
    );
    let fetcher = MockFetcher::new(&[
        (latest_url.as_str(), listing),
        (search_url.as_str(), listing_page(&[card("Foo S01E02", "foo-s01e02")], false)),
    ]);
    let session = SourceSession::new(source(), fetcher);

    let page = session.listing(&ListingQuery::latest(1)).await.unwrap();
    assert_eq!(page.titles[0].url, "/index.php/?p=123?is_series=true&base_title=Foo");

    let episodes = session.episodes(&page.titles[0]).await.unwrap();
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].name, "Foo S01E02");
    assert_eq!(session.fetcher().requested(), vec![latest_url, search_url]);
}

#[tokio::test]
async fn test_series_with_no_search_hits_is_empty() {
    let search_url = format!("{BASE}/index.php/?s=Gone+Show");
    let fetcher = MockFetcher::new(&[(search_url.as_str(), listing_page(&[], false))]);
    let session = SourceSession::new(source(), fetcher);
    let title = TitleEntry::new(
        "Gone Show",
        "/index.php/gone-show-s01e01/",
        &TitleKind::Series { name: "Gone Show".to_string() },
    );

    let episodes = session.episodes(&title).await.unwrap();
    assert!(episodes.is_empty());
}

#[test]
fn test_transport_failure_propagates() {
    let fetcher = MockFetcher::new(&[]);
    let session = SourceSession::new(source(), fetcher);

    let result = tokio_test::block_on(session.listing(&ListingQuery::popular(2)));
    assert!(matches!(result, Err(SourceError::Status { status: 404, .. })));
}

#[test]
fn test_listing_count_never_exceeds_items() {
    let source = source();
    let cards = vec![
        card("A S01E01", "a1"),
        card("A S01E02", "a2"),
        card("B", "b"),
        card("B", "b-repost"),
        card("C S02E01", "c1"),
    ];
    let doc = FetchedPage::new(BASE, listing_page(&cards, false)).document();
    let page = source.parse_listing(&doc);

    assert!(page.titles.len() <= cards.len());
    assert_eq!(page.titles.len(), 3);
    assert_eq!(source.parse_listing(&doc), page);
}
