//! Document format detection.
//!
//! Detection tries progressively more expensive signals: the URL extension,
//! a HEAD probe's MIME type, URL keywords, and finally a short body prefix.
//! It never fails; every failed probe degrades to the next fallback and the
//! final default is [`Format::Markup`].

use url::Url;

use super::io::parse_package;
use super::models::Format;
use crate::fetch::Fetcher;

/// Path extensions that identify a word-processor package without a request.
const PACKAGE_EXTENSIONS: [&str; 4] = [".docx", ".doc", ".docm", ".dotx"];

const PACKAGE_MIME_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "application/vnd.ms-word",
];

const MARKUP_MIME_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

const GENERIC_BINARY_MIME: &str = "application/octet-stream";

/// ZIP local file header, the container of .docx.
const ZIP_MAGIC: &[u8] = b"PK";
/// OLE compound file header, the container of legacy .doc.
const COMPOUND_FILE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

const MARKUP_TOKENS: [&str; 3] = ["<html", "<!doctype", "<head"];

/// What the MIME type of a probe says about the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MimeSignal {
    Known(Format),
    /// Absent or generic binary: look at the bytes.
    Ambiguous,
    /// Present but unrecognised: look at the URL.
    Unknown,
}

/// Detect the format of the resource at `url`.
pub fn detect_format(url: &Url, fetcher: &dyn Fetcher, sniff_bytes: usize) -> Format {
    if has_package_extension(url) {
        tracing::debug!(url = %url, "package extension");
        return Format::Package;
    }

    let probe = match fetcher.head(url) {
        Ok(probe) if probe.is_success() => probe,
        Ok(probe) => {
            tracing::warn!(url = %url, status = probe.status, "header probe failed, assuming markup");
            return Format::Markup;
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "header probe failed, assuming markup");
            return Format::Markup;
        }
    };

    match classify_mime(probe.content_type.as_deref()) {
        MimeSignal::Known(format) => format,
        MimeSignal::Ambiguous => detect_by_content(url, fetcher, sniff_bytes),
        MimeSignal::Unknown => {
            let format = classify_url_keywords(url);
            tracing::info!(
                url = %url,
                content_type = probe.content_type.as_deref().unwrap_or(""),
                format = %format,
                "format inferred from URL"
            );
            format
        }
    }
}

/// Detect the format from the first bytes of the body.
pub fn detect_by_content(url: &Url, fetcher: &dyn Fetcher, sniff_bytes: usize) -> Format {
    match fetcher.get_prefix(url, sniff_bytes) {
        Ok(prefix) => detect_format_from_bytes(&prefix),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "content probe failed, assuming markup");
            Format::Markup
        }
    }
}

/// Classify a byte prefix: package magic, then markup tokens, then a trial parse.
pub fn detect_format_from_bytes(prefix: &[u8]) -> Format {
    if prefix.starts_with(ZIP_MAGIC) || prefix.starts_with(COMPOUND_FILE_MAGIC) {
        return Format::Package;
    }

    let text = String::from_utf8_lossy(prefix).to_lowercase();
    if MARKUP_TOKENS.iter().any(|token| text.contains(token)) {
        return Format::Markup;
    }

    match parse_package(prefix) {
        Ok(_) => Format::Package,
        Err(_) => Format::Markup,
    }
}

pub fn has_package_extension(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    PACKAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

fn classify_mime(content_type: Option<&str>) -> MimeSignal {
    let mime = content_type.unwrap_or("").trim().to_ascii_lowercase();
    if PACKAGE_MIME_TYPES.iter().any(|m| mime.contains(m)) {
        MimeSignal::Known(Format::Package)
    } else if MARKUP_MIME_TYPES.iter().any(|m| mime.contains(m)) {
        MimeSignal::Known(Format::Markup)
    } else if mime.is_empty() || mime.contains(GENERIC_BINARY_MIME) {
        MimeSignal::Ambiguous
    } else {
        MimeSignal::Unknown
    }
}

fn classify_url_keywords(url: &Url) -> Format {
    let text = url.as_str().to_ascii_lowercase();
    if text.contains("word") || text.contains("doc") {
        Format::Package
    } else {
        // "html"/"htm" and everything else
        Format::Markup
    }
}
