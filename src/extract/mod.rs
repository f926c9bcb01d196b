// src/extract/mod.rs
// =============================================================================
// This module turns fetched HTML into structured data.
//
// Five extraction modes:
// - text:   visible text, one segment per line
// - links:  absolute URLs of every <a href>
// - images: absolute URLs of every <img src>
// - tables: cell text of every <table>, row by row
// - all:    the four above in one result
//
// Extraction is a pure function of (page URL, HTML, mode): no I/O, no state,
// same input always gives the same output.
// =============================================================================

mod html;

use std::fmt;
use std::str::FromStr;

use scraper::Html;
use serde::Serialize;
use url::Url;

use crate::error::ExtractError;

pub use html::Table;

/// What to pull out of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Text,
    Links,
    Images,
    Tables,
    All,
}

impl Mode {
    pub const ALL: [Mode; 5] = [Mode::Text, Mode::Links, Mode::Images, Mode::Tables, Mode::All];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Text => "text",
            Mode::Links => "links",
            Mode::Images => "images",
            Mode::Tables => "tables",
            Mode::All => "all",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ExtractError::InvalidMode(s.to_string()))
    }
}

/// Everything mode "all" collects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllData {
    pub text: String,
    pub links: Vec<String>,
    pub images: Vec<String>,
    pub tables: Vec<Table>,
}

/// Data extracted from one page. Serialises as the bare payload
/// (a string, a list, or an object for mode "all").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractedData {
    Text(String),
    Links(Vec<String>),
    Images(Vec<String>),
    Tables(Vec<Table>),
    All(AllData),
}

impl ExtractedData {
    pub fn mode(&self) -> Mode {
        match self {
            ExtractedData::Text(_) => Mode::Text,
            ExtractedData::Links(_) => Mode::Links,
            ExtractedData::Images(_) => Mode::Images,
            ExtractedData::Tables(_) => Mode::Tables,
            ExtractedData::All(_) => Mode::All,
        }
    }
}

/// The outcome of fetching and extracting one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub url: String,
    #[serde(skip)]
    pub mode: Mode,
    pub data: ExtractedData,
}

impl PageResult {
    pub fn new(url: impl Into<String>, data: ExtractedData) -> Self {
        Self {
            url: url.into(),
            mode: data.mode(),
            data,
        }
    }
}

/// Extracts `mode` data from `html`, resolving URLs against `base_url`.
///
/// Fails only when `base_url` is not an absolute URL; broken markup yields
/// empty collections instead.
pub fn extract(base_url: &str, html: &str, mode: Mode) -> Result<ExtractedData, ExtractError> {
    let base = parse_base(base_url)?;
    let document = Html::parse_document(html);

    let data = match mode {
        Mode::Text => ExtractedData::Text(html::text(&document)),
        Mode::Links => ExtractedData::Links(html::links(&document, &base)),
        Mode::Images => ExtractedData::Images(html::images(&document, &base)),
        Mode::Tables => ExtractedData::Tables(html::tables(&document)),
        Mode::All => ExtractedData::All(AllData {
            text: html::text(&document),
            links: html::links(&document, &base),
            images: html::images(&document, &base),
            tables: html::tables(&document),
        }),
    };

    Ok(data)
}

/// The links a crawler should consider following, whatever the page's
/// extraction mode is.
pub fn discover_links(base_url: &str, html: &str) -> Result<Vec<String>, ExtractError> {
    let base = parse_base(base_url)?;
    let document = Html::parse_document(html);
    Ok(html::links(&document, &base))
}

fn parse_base(base_url: &str) -> Result<Url, ExtractError> {
    Url::parse(base_url).map_err(|source| ExtractError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_resolved_against_page_directory() {
        let html = r#"<a href="/b">x</a><a href="c">y</a>"#;
        let data = extract("http://site.test/a/", html, Mode::Links).unwrap();
        assert_eq!(
            data,
            ExtractedData::Links(vec![
                "http://site.test/b".to_string(),
                "http://site.test/a/c".to_string(),
            ])
        );
    }

    #[test]
    fn test_links_are_always_absolute() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="?q=1">Query</a>
            <a href="mailto:someone@site.test">Mail</a>
            <a href="javascript:void(0)">JS</a>
            <a href="">Self</a>
        "#;
        let ExtractedData::Links(links) = extract("https://example.com/page/", html, Mode::Links)
            .unwrap()
        else {
            panic!("expected links");
        };

        assert_eq!(links.len(), 5);
        for link in links {
            let parsed = Url::parse(&link).unwrap();
            assert!(!parsed.scheme().is_empty());
            assert!(parsed.host_str().is_some_and(|h| !h.is_empty()));
        }
    }

    #[test]
    fn test_extract_is_deterministic() {
        let html = r#"<p>Hello</p><a href="/x">x</a><img src="i.png">
                      <table><tr><td>1</td></tr></table>"#;
        let first = extract("http://site.test/", html, Mode::All).unwrap();
        let second = extract("http://site.test/", html, Mode::All).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_mode_collects_every_category() {
        let html = r#"<h1>Hi</h1><a href="/x">x</a><img src="/i.png">
                      <table><tr><td>cell</td></tr></table>"#;
        let ExtractedData::All(all) = extract("http://site.test/", html, Mode::All).unwrap() else {
            panic!("expected composite data");
        };

        assert_eq!(all.text, "Hi\nx\ncell");
        assert_eq!(all.links, vec!["http://site.test/x"]);
        assert_eq!(all.images, vec!["http://site.test/i.png"]);
        assert_eq!(all.tables, vec![vec![vec!["cell".to_string()]]]);
    }

    #[test]
    fn test_single_empty_row_table_yields_no_tables() {
        let html = "<table><tr><td></td><th>  </th></tr></table>";
        let data = extract("http://site.test/", html, Mode::Tables).unwrap();
        assert_eq!(data, ExtractedData::Tables(vec![]));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("tables".parse::<Mode>().unwrap(), Mode::Tables);
        assert!(matches!(
            "pdf".parse::<Mode>(),
            Err(ExtractError::InvalidMode(ref m)) if m == "pdf"
        ));
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let err = extract("not a url", "<p>x</p>", Mode::Text).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_discover_links_ignores_mode() {
        let html = r#"<table><tr><td><a href="next">n</a></td></tr></table>"#;
        let links = discover_links("http://site.test/a/", html).unwrap();
        assert_eq!(links, vec!["http://site.test/a/next"]);
    }

    #[test]
    fn test_page_result_json_omits_mode() {
        let page = PageResult::new(
            "http://site.test/",
            ExtractedData::Links(vec!["http://site.test/x".to_string()]),
        );
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "http://site.test/", "data": ["http://site.test/x"]})
        );
        assert_eq!(page.mode, Mode::Links);
    }
}
