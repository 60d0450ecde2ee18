//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! classify/fetch/extract cycle against them with the production transport.

use site_sweep::config::Config;
use site_sweep::crawler::Coordinator;
use site_sweep::output::CollectingReporter;
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.concurrency_limit = 4;
    config.crawler.request_timeout_secs = 2;
    config
}

fn html_head() -> ResponseTemplate {
    ResponseTemplate::new(200).insert_header("content-type", "text/html; charset=utf-8")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

async fn mount(
    server: &MockServer,
    http_method: &str,
    route: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    let base = server.uri();

    let home = format!(
        r#"<html><head><link rel="stylesheet" href="/style.css"></head><body>
        <a href="{base}/page1">Absolute</a>
        <a href="/page2">Root relative</a>
        <a href="./page3">Dot relative</a>
        <a href="../up">Parent relative</a>
        <a href="/logo.svg">Image</a>
        <a href="/missing">Missing</a>
        <a href="https://example.org/elsewhere">External</a>
        </body></html>"#
    );
    let page1 = format!(
        r#"<html><body>
        <a href="/">Home</a>
        <a href="{base}/page2/?ref=nav#top">Page 2 again</a>
        </body></html>"#
    );

    mount(&server, "HEAD", "/", html_head(), 1).await;
    mount(&server, "GET", "/", html_page(&home), 1).await;

    mount(&server, "HEAD", "/page1", html_head(), 1).await;
    mount(&server, "GET", "/page1", html_page(&page1), 1).await;

    mount(&server, "HEAD", "/page2", html_head(), 1).await;
    mount(&server, "GET", "/page2", html_page("<p>Page 2</p>"), 1).await;

    // HEAD failure must not keep the page from being fetched
    mount(&server, "HEAD", "/page3", ResponseTemplate::new(500), 1).await;
    mount(&server, "GET", "/page3", html_page("<p>Page 3</p>"), 1).await;

    let svg_head = ResponseTemplate::new(200).insert_header("content-type", "image/svg+xml");
    mount(&server, "HEAD", "/logo.svg", svg_head, 1).await;
    mount(&server, "GET", "/logo.svg", ResponseTemplate::new(200), 0).await;

    mount(&server, "HEAD", "/missing", html_head(), 1).await;
    mount(&server, "GET", "/missing", ResponseTemplate::new(404), 1).await;

    mount(&server, "GET", "/up", ResponseTemplate::new(200), 0).await;
    mount(&server, "GET", "/style.css", ResponseTemplate::new(200), 0).await;

    let reporter = CollectingReporter::new();
    let mut coordinator = Coordinator::new(&base, &test_config())
        .expect("Failed to create coordinator")
        .with_reporter(Box::new(reporter.clone()));

    let stats = coordinator.run().await.expect("Crawl failed");

    let admitted: HashSet<String> = reporter.admitted().into_iter().collect();
    let expected: HashSet<String> = ["", "/page1", "/page2", "/page3", "/logo.svg", "/missing"]
        .iter()
        .map(|p| format!("{}{}", base, p))
        .collect();
    assert_eq!(admitted, expected);
    assert_eq!(reporter.admitted().len(), 6);

    let pages: HashSet<String> = reporter.pages().into_iter().collect();
    assert!(pages.contains(&base));
    assert!(pages.contains(&format!("{}/page3", base)));
    assert!(!pages.contains(&format!("{}/logo.svg", base)));
    assert!(!pages.contains(&format!("{}/missing", base)));

    assert_eq!(stats.rounds, 2);
    assert_eq!(stats.urls_admitted, 6);
    assert_eq!(stats.pages_fetched, 4);
    assert_eq!(stats.skipped_non_html, 1);
    assert_eq!(stats.classify_fail_open, 1);
    assert_eq!(stats.fetch_failures, 1);
    assert!(coordinator.frontier().is_empty());
}

#[tokio::test]
async fn test_user_agent_sent_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/2.0"))
        .respond_with(html_head())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/2.0"))
        .respond_with(html_page("<p>No links</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "2.0".to_string();

    let mut coordinator = Coordinator::new(&server.uri(), &config)
        .unwrap()
        .with_reporter(Box::new(CollectingReporter::new()));

    let stats = coordinator.run().await.unwrap();
    assert_eq!(stats.pages_fetched, 1);
}

#[tokio::test]
async fn test_head_timeout_fails_open() {
    let server = MockServer::start().await;

    let slow_head = html_head().set_delay(Duration::from_secs(3));
    mount(&server, "HEAD", "/", slow_head, 1).await;
    mount(&server, "GET", "/", html_page("<p>Slow HEAD, fast GET</p>"), 1).await;

    let mut config = test_config();
    config.crawler.request_timeout_secs = 1;

    let reporter = CollectingReporter::new();
    let mut coordinator = Coordinator::new(&server.uri(), &config)
        .unwrap()
        .with_reporter(Box::new(reporter.clone()));

    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.classify_fail_open, 1);
    assert_eq!(stats.pages_fetched, 1);
    assert_eq!(reporter.pages(), vec![server.uri()]);
}

#[tokio::test]
async fn test_unreachable_seed_terminates() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut coordinator = Coordinator::new(&format!("http://{}", addr), &test_config())
        .unwrap()
        .with_reporter(Box::new(CollectingReporter::new()));

    let stats = coordinator.run().await.unwrap();

    assert_eq!(stats.rounds, 1);
    assert_eq!(stats.classify_fail_open, 1);
    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.pages_fetched, 0);
}

#[tokio::test]
async fn test_independent_runs_share_no_state() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    for server in [&first, &second] {
        Mock::given(method("HEAD"))
            .respond_with(html_head())
            .mount(server)
            .await;
    }

    mount(&first, "GET", "/", html_page(r#"<a href="/shared">S</a>"#), 1).await;
    mount(&first, "GET", "/shared", html_page(""), 1).await;
    mount(&second, "GET", "/", html_page(r#"<a href="/shared">S</a>"#), 1).await;
    mount(&second, "GET", "/shared", html_page(""), 1).await;

    let first_reporter = CollectingReporter::new();
    let second_reporter = CollectingReporter::new();

    let mut first_run = Coordinator::new(&first.uri(), &test_config())
        .unwrap()
        .with_reporter(Box::new(first_reporter.clone()));
    let mut second_run = Coordinator::new(&second.uri(), &test_config())
        .unwrap()
        .with_reporter(Box::new(second_reporter.clone()));

    let (first_stats, second_stats) = tokio::join!(first_run.run(), second_run.run());

    assert_eq!(first_stats.unwrap().pages_fetched, 2);
    assert_eq!(second_stats.unwrap().pages_fetched, 2);
    assert_eq!(
        first_reporter.admitted(),
        vec![first.uri(), format!("{}/shared", first.uri())]
    );
    assert_eq!(
        second_reporter.admitted(),
        vec![second.uri(), format!("{}/shared", second.uri())]
    );
}
