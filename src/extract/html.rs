// src/extract/html.rs
// =============================================================================
// Low-level HTML readers.
//
// Every function here takes an already-parsed scraper::Html document so a
// caller that needs several categories (mode "all") parses the page once.
//
// Parsing is best-effort: html5ever repairs broken markup, so a page that is
// missing the elements we look for simply yields empty collections.
// =============================================================================

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

// Constant selectors are known to be valid; a failure here is a programmer
// error, not a runtime condition.
static ANCHORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector: a[href]"));
static IMAGES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid selector: img[src]"));
static TABLES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector: table"));
static ROWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid selector: tr"));
static CELLS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("valid selector: th, td"));

/// Elements whose text never shows up on screen.
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// One table: rows of cell strings, in document order.
pub type Table = Vec<Vec<String>>;

/// Visible text of the page, one trimmed segment per line.
pub fn text(document: &Html) -> String {
    let mut segments = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let segment = text.trim();
        if !segment.is_empty() {
            segments.push(segment);
        }
    }

    segments.join("\n")
}

/// Every anchor href, resolved against `base`.
///
/// Duplicates are kept; the crawl engine dedupes through its visited set.
pub fn links(document: &Html, base: &Url) -> Vec<String> {
    resolve_all(document.select(&ANCHORS), "href", base)
}

/// Every image src, resolved against `base`.
pub fn images(document: &Html, base: &Url) -> Vec<String> {
    resolve_all(document.select(&IMAGES), "src", base)
}

/// Cell text of every table. Empty rows and empty tables are dropped.
pub fn tables(document: &Html) -> Vec<Table> {
    document
        .select(&TABLES)
        .filter_map(|table| {
            let rows: Table = table.select(&ROWS).filter_map(row_cells).collect();
            (!rows.is_empty()).then_some(rows)
        })
        .collect()
}

// A row counts only if at least one of its cells has text.
fn row_cells(row: ElementRef<'_>) -> Option<Vec<String>> {
    let cells: Vec<String> = row.select(&CELLS).map(cell_text).collect();

    if cells.iter().all(String::is_empty) {
        None
    } else {
        Some(cells)
    }
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_all<'a>(
    elements: impl Iterator<Item = ElementRef<'a>>,
    attr: &str,
    base: &Url,
) -> Vec<String> {
    elements
        .filter_map(|el| el.value().attr(attr))
        .filter_map(|raw| resolve_url(base, raw))
        .collect()
}

// Resolves a possibly-relative reference to an absolute URL.
//
// Only results with a host are kept: `mailto:`, `javascript:` and `data:`
// references resolve to URLs with no host and are not pages we can visit.
//
// Examples (base = "https://example.com/page/"):
//   "/docs"             -> Some("https://example.com/docs")
//   "../other"          -> Some("https://example.com/other")
//   "https://other.com" -> Some("https://other.com/")
//   "mailto:a@b.c"      -> None
pub(crate) fn resolve_url(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    let url = base.join(raw).ok()?;

    if url.host_str().is_some_and(|host| !host.is_empty()) {
        Some(url.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = base("https://example.com/page");
        assert_eq!(
            resolve_url(&base, "/docs"),
            Some("https://example.com/docs".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_link() {
        let base = base("https://example.com/page");
        assert_eq!(
            resolve_url(&base, "https://other.com"),
            Some("https://other.com/".to_string())
        );
    }

    #[test]
    fn test_skip_hostless_schemes() {
        let base = base("https://example.com/page");
        assert_eq!(resolve_url(&base, "mailto:test@example.com"), None);
        assert_eq!(resolve_url(&base, "javascript:void(0)"), None);
        assert_eq!(resolve_url(&base, "data:text/plain,hi"), None);
    }

    #[test]
    fn test_fragment_resolves_to_page() {
        let base = base("https://example.com/page");
        assert_eq!(
            resolve_url(&base, "#section"),
            Some("https://example.com/page#section".to_string())
        );
    }

    #[test]
    fn test_links_keep_document_order_and_duplicates() {
        let doc = Html::parse_document(
            r#"<a href="/x">1</a><a>no href</a><a href="/y">2</a><a href="/x">3</a>"#,
        );
        let links = links(&doc, &base("http://site.test/"));
        assert_eq!(
            links,
            vec![
                "http://site.test/x",
                "http://site.test/y",
                "http://site.test/x"
            ]
        );
    }

    #[test]
    fn test_images_resolved() {
        let doc = Html::parse_document(
            r#"<img src="logo.png"><img alt="no src"><img src="//cdn.test/a.jpg">"#,
        );
        let images = images(&doc, &base("https://site.test/blog/"));
        assert_eq!(
            images,
            vec!["https://site.test/blog/logo.png", "https://cdn.test/a.jpg"]
        );
    }

    #[test]
    fn test_text_skips_scripts_and_blank_segments() {
        let doc = Html::parse_document(
            r#"<html><head><title> Title </title><style>p{}</style></head>
               <body><p>  First  </p>
               <script>var x = 1;</script>
               <div>Second</div></body></html>"#,
        );
        assert_eq!(text(&doc), "Title\nFirst\nSecond");
    }

    #[test]
    fn test_tables_header_and_data_cells() {
        let doc = Html::parse_document(
            r#"<table>
                 <tr><th> Name </th><th>Age</th></tr>
                 <tr><td>Ada</td><td> 36 </td></tr>
               </table>"#,
        );
        assert_eq!(
            tables(&doc),
            vec![vec![
                vec!["Name".to_string(), "Age".to_string()],
                vec!["Ada".to_string(), "36".to_string()],
            ]]
        );
    }

    #[test]
    fn test_tables_drop_empty_rows_and_tables() {
        let doc = Html::parse_document(
            r#"<table><tr><td> </td><td></td></tr></table>
               <table><tr></tr><tr><td>kept</td></tr></table>"#,
        );
        assert_eq!(tables(&doc), vec![vec![vec!["kept".to_string()]]]);
    }

    #[test]
    fn test_malformed_html_yields_empty_collections() {
        let doc = Html::parse_document("<div><p>unclosed <table><tr>");
        let base = base("http://site.test/");
        assert!(links(&doc, &base).is_empty());
        assert!(images(&doc, &base).is_empty());
        assert!(tables(&doc).is_empty());
    }
}
