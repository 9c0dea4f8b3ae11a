mod common;

use std::sync::Arc;

use common::{DOCX_MIME, MapFetcher, business_report, docx};
use docnav::document::{MAX_CONTENT_CHARS, MAX_SECTIONS, SECTION_NOT_FOUND, TRUNCATION_MARKER};
use docnav::{Config, DocumentService, Format, Listing, MatchPolicy};

const REPORT_URL: &str = "https://reports.test/2024/annual.docx";

fn service_for(fetcher: MapFetcher, policy: MatchPolicy) -> (Arc<MapFetcher>, DocumentService) {
    let fetcher = Arc::new(fetcher);
    let mut config = Config::default();
    config.extract.match_policy = policy;
    let service = DocumentService::new(fetcher.clone(), &config);
    (fetcher, service)
}

fn report_service() -> DocumentService {
    let fetcher = MapFetcher::new().with(REPORT_URL, Some(DOCX_MIME), business_report());
    service_for(fetcher, MatchPolicy::Exact).1
}

fn titles(listing: &Listing) -> Vec<String> {
    listing.sections().iter().map(|s| s.title.clone()).collect()
}

#[cfg(test)]
mod package_outline_tests {
    use super::*;

    #[test]
    fn test_top_level_chapters() {
        let data = report_service().list(Some(REPORT_URL), None, None).unwrap();
        assert_eq!(data.document_type, Format::Package);
        assert_eq!(
            titles(&data.listing),
            vec!["Executive Summary", "Regional Results", "Outlook"]
        );
    }

    #[test]
    fn test_descend_collects_every_deeper_heading() {
        let data = report_service()
            .list(Some(REPORT_URL), Some("Regional Results"), Some(false))
            .unwrap();
        assert_eq!(titles(&data.listing), vec!["North", "South", "South Coast"]);
        let levels: Vec<u8> = data.listing.sections().iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![2, 2, 3]);
    }

    #[test]
    fn test_descend_stops_at_sibling() {
        let data = report_service()
            .list(Some(REPORT_URL), Some("South"), None)
            .unwrap();
        assert_eq!(titles(&data.listing), vec!["South Coast"]);
        assert_eq!(
            data.listing.sections()[0].content.as_deref(),
            Some("Tourism drove the coast.")
        );
    }

    #[test]
    fn test_leaf_section_returns_its_content() {
        let data = report_service()
            .list(Some(REPORT_URL), Some("North"), None)
            .unwrap();
        match data.listing {
            Listing::Content {
                is_leaf,
                content,
                content_length,
            } => {
                assert!(is_leaf);
                assert_eq!(content, "North grew 12%.");
                assert_eq!(content_length, content.chars().count());
            }
            other => panic!("expected a leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_section_content_ends_at_next_heading() {
        let service = report_service();
        let south = service.extract(Some(REPORT_URL), Some("South")).unwrap();
        assert_eq!(south.content, "South grew 4%.");

        let missing = service.extract(Some(REPORT_URL), Some("Appendix")).unwrap();
        assert_eq!(missing.content, SECTION_NOT_FOUND);
    }

    #[test]
    fn test_whole_document_content() {
        let data = report_service().extract(Some(REPORT_URL), None).unwrap();
        assert!(data.content.starts_with("Executive Summary Revenue grew"), "{}", data.content);
        assert!(data.content.ends_with("Cautious optimism."));
    }

    #[test]
    fn test_outline_is_capped() {
        let chapters: Vec<String> = (1..=30).map(|i| format!("Chapter {i}")).collect();
        let paragraphs: Vec<(Option<u8>, &str)> =
            chapters.iter().map(|t| (Some(1), t.as_str())).collect();
        let fetcher = MapFetcher::new().with(REPORT_URL, None, docx(&paragraphs));
        let (_, service) = service_for(fetcher, MatchPolicy::Contains);

        let data = service.list(Some(REPORT_URL), None, None).unwrap();
        assert_eq!(data.listing.sections().len(), MAX_SECTIONS);
        assert_eq!(data.listing.sections()[19].title, "Chapter 20");
    }

    #[test]
    fn test_long_content_is_truncated() {
        let long = "word ".repeat(4_000);
        let fetcher = MapFetcher::new().with(
            REPORT_URL,
            None,
            docx(&[(Some(1), "Big"), (None, long.as_str())]),
        );
        let (_, service) = service_for(fetcher, MatchPolicy::Exact);

        let data = service.extract(Some(REPORT_URL), Some("Big")).unwrap();
        assert_eq!(data.content_length, MAX_CONTENT_CHARS + TRUNCATION_MARKER.len());
        assert!(data.content.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_match_policy_changes_prefix_titles() {
        let bytes = docx(&[
            (Some(1), "Chapter 10"),
            (Some(2), "Tenth topic"),
            (Some(1), "Chapter 1"),
            (Some(2), "First topic"),
        ]);

        let (_, contains) = service_for(
            MapFetcher::new().with(REPORT_URL, None, bytes.clone()),
            MatchPolicy::Contains,
        );
        let data = contains.list(Some(REPORT_URL), Some("Chapter 1"), Some(false)).unwrap();
        assert_eq!(titles(&data.listing), vec!["Tenth topic"]);

        let (_, exact) = service_for(
            MapFetcher::new().with(REPORT_URL, None, bytes),
            MatchPolicy::Exact,
        );
        let data = exact.list(Some(REPORT_URL), Some("Chapter 1"), Some(false)).unwrap();
        assert_eq!(titles(&data.listing), vec!["First topic"]);
    }
}

#[cfg(test)]
mod detection_tests {
    use super::*;

    #[test]
    fn test_package_extension_skips_probe() {
        let fetcher = MapFetcher::new().with(REPORT_URL, Some("text/html"), business_report());
        let (fetcher, service) = service_for(fetcher, MatchPolicy::Contains);

        let data = service.list(Some(REPORT_URL), None, None).unwrap();
        assert_eq!(data.document_type, Format::Package);
        assert_eq!(fetcher.requests(), vec![format!("GET {REPORT_URL}")]);
    }

    #[test]
    fn test_octet_stream_is_sniffed() {
        let url = "https://cdn.test/blob/8812";
        let fetcher = MapFetcher::new().with(url, Some("application/octet-stream"), business_report());
        let (fetcher, service) = service_for(fetcher, MatchPolicy::Contains);

        let data = service.list(Some(url), None, None).unwrap();
        assert_eq!(data.document_type, Format::Package);
        assert_eq!(
            fetcher.requests(),
            vec![format!("HEAD {url}"), format!("PREFIX {url}"), format!("GET {url}")]
        );
    }

    #[test]
    fn test_markup_page() {
        let url = "https://wiki.test/handbook";
        let page = r#"<!DOCTYPE html><html><body><main>
            <h1>Onboarding</h1><p>Welcome aboard.</p>
            <h1>Policies</h1><p>Be kind.</p>
            </main></body></html>"#;
        let fetcher = MapFetcher::new().with(url, Some("text/html; charset=utf-8"), page);
        let (_, service) = service_for(fetcher, MatchPolicy::Contains);

        let data = service.list(Some(url), None, None).unwrap();
        assert_eq!(data.document_type, Format::Markup);
        assert_eq!(titles(&data.listing), vec!["Onboarding", "Policies"]);

        let content = service.extract(Some(url), Some("Policies")).unwrap();
        assert_eq!(content.content, "Be kind.");
    }
}
