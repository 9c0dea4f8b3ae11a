//! Package reading
//!
//! Turns the bytes of a word-processor package into the ordered paragraph
//! sequence the outline and content readers scan.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::models::Paragraph;
use super::parsing::formatting::extract_paragraph_text;
use super::parsing::heading::detect_heading_from_style;
use crate::error::Result;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const STYLES_PART: &str = "word/styles.xml";

/// Parse package bytes into paragraphs in document order.
///
/// Table cells and other non-paragraph body children are not part of the
/// sequence.
pub(crate) fn parse_package(bytes: &[u8]) -> Result<Vec<Paragraph>> {
    let docx = docx_rs::read_docx(bytes)?;
    let style_names = read_style_names(bytes);

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            let text = extract_paragraph_text(para);
            let heading_level = para
                .property
                .style
                .as_ref()
                .and_then(|style| detect_heading_from_style(&style.val, &style_names));
            paragraphs.push(Paragraph {
                text,
                heading_level,
            });
        }
    }

    Ok(paragraphs)
}

/// Map style ids to display names from `word/styles.xml`.
///
/// Best effort: a missing or unreadable styles part yields an empty map and
/// heading detection falls back to style ids.
pub(crate) fn read_style_names(bytes: &[u8]) -> HashMap<String, String> {
    let mut names = HashMap::new();

    let Ok(mut archive) = ZipArchive::new(Cursor::new(bytes)) else {
        return names;
    };
    let mut styles_xml = String::new();
    match archive.by_name(STYLES_PART) {
        Ok(mut file) => {
            if file.read_to_string(&mut styles_xml).is_err() {
                return names;
            }
        }
        Err(_) => return names,
    }

    let Ok(doc) = roxmltree::Document::parse(&styles_xml) else {
        tracing::debug!("styles part is not well-formed XML");
        return names;
    };
    for style_node in doc
        .root_element()
        .children()
        .filter(|n| n.tag_name().name() == "style")
    {
        let Some(style_id) = style_node.attribute((W_NS, "styleId")) else {
            continue;
        };
        if let Some(name) = style_node
            .children()
            .find(|n| n.tag_name().name() == "name")
            .and_then(|n| n.attribute((W_NS, "val")))
        {
            names.insert(style_id.to_string(), name.to_string());
        }
    }

    names
}
