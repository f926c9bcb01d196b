// src/output.rs
// =============================================================================
// Rendering of extracted data for the terminal or an output file.
//
// Three formats:
// - txt:  plain lines, tables as tab-separated rows
// - json: pretty-printed {"url", "data"} objects
// - md:   bullet lists, pipe tables, "###" section headings
//
// A crawl renders each page under a "--- Scraped: <url> ---" header
// (txt/md) or as one JSON array.
// =============================================================================

use anyhow::Result;
use clap::ValueEnum;
use webwarden::extract::{AllData, ExtractedData, Mode, PageResult, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Txt,
    Json,
    Md,
}

impl Format {
    /// JSON for the composite "all" mode, plain text otherwise.
    pub fn default_for(mode: Mode) -> Self {
        if mode == Mode::All {
            Format::Json
        } else {
            Format::Txt
        }
    }
}

pub fn render_page(page: &PageResult, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(page)?),
        Format::Txt | Format::Md => Ok(render_data(&page.data, format)),
    }
}

pub fn render_crawl(pages: &[PageResult], format: Format) -> Result<String> {
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(pages)?);
    }

    let mut parts = Vec::with_capacity(pages.len() * 2);
    for page in pages {
        parts.push(format!("--- Scraped: {} ---", page.url));
        parts.push(render_data(&page.data, format));
    }
    Ok(parts.join("\n\n"))
}

fn render_data(data: &ExtractedData, format: Format) -> String {
    match data {
        ExtractedData::Text(text) => text.clone(),
        ExtractedData::Links(items) | ExtractedData::Images(items) => list(items, format),
        ExtractedData::Tables(tables) => tables_block(tables, format),
        ExtractedData::All(all) => render_all(all, format),
    }
}

// Empty categories are left out entirely.
fn render_all(all: &AllData, format: Format) -> String {
    let heading = |title: &str| match format {
        Format::Md => format!("### {}", title),
        _ => format!("--- {} ---", title),
    };

    let mut sections = Vec::new();
    if !all.text.is_empty() {
        let body = match format {
            Format::Md => quote(&all.text),
            _ => all.text.clone(),
        };
        sections.push(format!("{}\n\n{}", heading("Text"), body));
    }
    if !all.links.is_empty() {
        sections.push(format!("{}\n\n{}", heading("Links"), list(&all.links, format)));
    }
    if !all.images.is_empty() {
        sections.push(format!("{}\n\n{}", heading("Images"), list(&all.images, format)));
    }
    if !all.tables.is_empty() {
        sections.push(format!(
            "{}\n\n{}",
            heading("Tables"),
            tables_block(&all.tables, format)
        ));
    }

    sections.join("\n\n")
}

fn list(items: &[String], format: Format) -> String {
    match format {
        Format::Md => items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => items.join("\n"),
    }
}

fn tables_block(tables: &[Table], format: Format) -> String {
    let render: fn(&Table) -> String = match format {
        Format::Md => table_md,
        _ => table_txt,
    };
    tables.iter().map(render).collect::<Vec<_>>().join("\n\n")
}

fn table_txt(table: &Table) -> String {
    table
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

// First row is the header.
fn table_md(table: &Table) -> String {
    let Some((header, rows)) = table.split_first() else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(md_row(header));
    lines.push(format!("|{}", " --- |".repeat(header.len())));
    lines.extend(rows.iter().map(|row| md_row(row)));
    lines.join("\n")
}

fn md_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |", cells.join(" | "))
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
