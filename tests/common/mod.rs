#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use docnav::error::{Error, Result};
use docnav::fetch::{Fetched, Fetcher, Probe};
use url::Url;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Build an in-memory .docx from `(heading level, text)` pairs.
pub fn docx(paragraphs: &[(Option<u8>, &str)]) -> Vec<u8> {
    let mut doc = docx_rs::Docx::new();
    for (level, text) in paragraphs {
        let mut para = docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text));
        if let Some(level) = level {
            para = para.style(&format!("Heading{level}"));
        }
        doc = doc.add_paragraph(para);
    }
    let mut buf = Cursor::new(Vec::new());
    doc.build().pack(&mut buf).expect("pack docx");
    buf.into_inner()
}

/// A business report with two chapters, one of them nested.
pub fn business_report() -> Vec<u8> {
    docx(&[
        (Some(1), "Executive Summary"),
        (None, "Revenue grew in every region."),
        (Some(1), "Regional Results"),
        (None, "Each region is reported below."),
        (Some(2), "North"),
        (None, "North grew 12%."),
        (Some(2), "South"),
        (None, "South grew 4%."),
        (Some(3), "South Coast"),
        (None, "Tourism drove the coast."),
        (Some(1), "Outlook"),
        (None, "Cautious optimism."),
    ])
}

/// In-memory [`Fetcher`] keyed by URL that counts requests.
#[derive(Default)]
pub struct MapFetcher {
    resources: HashMap<String, (Option<String>, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        self.resources
            .insert(url.to_string(), (content_type.map(str::to_string), body.into()));
        self
    }

    /// Every request seen, as `"METHOD url"`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn find(&self, method: &str, url: &Url) -> Result<&(Option<String>, Vec<u8>)> {
        self.requests.lock().unwrap().push(format!("{method} {url}"));
        self.resources.get(url.as_str()).ok_or_else(|| Error::Fetch {
            url: url.to_string(),
            reason: "no such resource".to_string(),
        })
    }
}

impl Fetcher for MapFetcher {
    fn head(&self, url: &Url) -> Result<Probe> {
        let (content_type, _) = self.find("HEAD", url)?;
        Ok(Probe {
            status: 200,
            content_type: content_type.clone(),
        })
    }

    fn get_prefix(&self, url: &Url, limit: usize) -> Result<Vec<u8>> {
        let (_, body) = self.find("PREFIX", url)?;
        Ok(body[..body.len().min(limit)].to_vec())
    }

    fn get(&self, url: &Url) -> Result<Fetched> {
        let (_, body) = self.find("GET", url)?;
        Ok(Fetched {
            final_url: url.clone(),
            bytes: body.clone(),
        })
    }
}
