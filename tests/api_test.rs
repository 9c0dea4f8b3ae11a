mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{MapFetcher, business_report};
use docnav::server::build_app;
use docnav::{Config, DocumentService};
use serde_json::Value;
use tower::ServiceExt;

const REPORT_URL: &str = "https://reports.test/annual.docx";
const SITE_URL: &str = "https://site.test/manual/index.html";

fn router() -> (Arc<MapFetcher>, axum::Router) {
    let fetcher = Arc::new(
        MapFetcher::new()
            .with(REPORT_URL, None, business_report())
            .with(
                SITE_URL,
                Some("text/html"),
                r##"<html><body><nav class="toc">
                     <a href="intro.html">Introduction</a>
                     <a href="#faq">Questions</a>
                   </nav>
                   <div id="faq"><p>Ask anything.</p></div></body></html>"##,
            )
            .with(
                "https://site.test/manual/intro.html",
                Some("text/html"),
                "<html><body><header>Menu</header><article>Read this first.</article></body></html>",
            ),
    );
    let service = DocumentService::new(fetcher.clone(), &Config::default());
    (fetcher, build_app(Arc::new(service)))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[cfg(test)]
mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (_, app) = router();
        let (status, body) = get(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["supported_formats"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_validation_errors_never_fetch() {
        let (fetcher, app) = router();

        let (status, body) = get(app.clone(), "/api/content?chapter=Outlook").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = get(app, "/api/chapters?url=%2Frelative%2Fpath").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_descend_package_to_leaf() {
        let (_, app) = router();

        let (_, body) = get(app.clone(), &format!("/api/chapters?url={REPORT_URL}")).await;
        assert_eq!(body["data"]["count"], 3);

        let (_, body) = get(
            app.clone(),
            &format!("/api/chapters?url={REPORT_URL}&chapter=Regional%20Results"),
        )
        .await;
        let data = &body["data"];
        assert_eq!(data["parent_chapter"], "Regional Results");
        assert_eq!(data["chapters"][0]["title"], "North");
        assert_eq!(data["chapters"][0]["content"], "North grew 12%.");

        let (_, body) = get(app, &format!("/api/chapters?url={REPORT_URL}&chapter=Outlook")).await;
        assert_eq!(body["data"]["type"], "content");
        assert_eq!(body["data"]["content"], "Cautious optimism.");
    }

    #[tokio::test]
    async fn test_markup_links_are_followed() {
        let (fetcher, app) = router();

        let (_, body) = get(app.clone(), &format!("/api/chapters?url={SITE_URL}")).await;
        let chapters = body["data"]["chapters"].as_array().unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0]["href"], "intro.html");

        let (_, body) = get(
            app.clone(),
            &format!("/api/content?url={SITE_URL}&chapter=Introduction"),
        )
        .await;
        assert_eq!(body["data"]["content"], "Read this first.");
        assert!(
            fetcher
                .requests()
                .contains(&"GET https://site.test/manual/intro.html".to_string())
        );

        let (_, body) = get(app, &format!("/api/content?url={SITE_URL}&chapter=Questions")).await;
        assert_eq!(body["data"]["content"], "Ask anything.");
    }

    #[tokio::test]
    async fn test_unreachable_document_is_server_error() {
        let (_, app) = router();
        let (status, body) = get(app, "/api/content?url=https://nowhere.test/a.docx").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }
}
