pub mod report;

use serde::Serialize;

use crate::grid::Grid;
use crate::session::Session;
use crate::tabs::Tab;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Xml,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".xml") {
        return Some(OutputFormat::Xml);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct TableRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub active: bool,
    pub row_labels: Vec<i64>,
    pub col_labels: Vec<i64>,
    pub cells: Vec<Vec<i64>>,
}

pub fn record_for_grid(title: &str, grid: &Grid) -> TableRecord {
    TableRecord {
        id: None,
        title: title.to_string(),
        active: true,
        row_labels: grid.row_labels().to_vec(),
        col_labels: grid.col_labels().to_vec(),
        cells: grid.cells().to_vec(),
    }
}

fn record_for_tab(tab: &Tab, grid: &Grid, active: bool) -> TableRecord {
    TableRecord {
        id: Some(tab.id.to_string()),
        active,
        ..record_for_grid(&tab.title, grid)
    }
}

/// One record per open table tab. A session without tabs yields its
/// displayed table, if any.
pub fn build_records(session: &Session) -> Vec<TableRecord> {
    let registry = session.registry();
    let records: Vec<TableRecord> = registry
        .table_tabs()
        .filter_map(|tab| {
            let grid = tab.grid.as_ref()?;
            Some(record_for_tab(tab, grid, registry.active_id() == &tab.id))
        })
        .collect();
    if !records.is_empty() || session.settings().tabbed {
        return records;
    }
    session
        .current()
        .map(|grid| vec![record_for_grid(&title_for(grid), grid)])
        .unwrap_or_default()
}

fn title_for(grid: &Grid) -> String {
    let (Some(h_low), Some(h_high)) = (grid.col_labels().first(), grid.col_labels().last()) else {
        return String::new();
    };
    let (Some(v_low), Some(v_high)) = (grid.row_labels().first(), grid.row_labels().last()) else {
        return String::new();
    };
    format!("[{h_low} to {h_high}] x [{v_low} to {v_high}]")
}

fn render_table_text(out: &mut String, r: &TableRecord) {
    let width = r
        .row_labels
        .iter()
        .chain(r.col_labels.iter())
        .chain(r.cells.iter().flatten())
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);

    out.push_str(&format!("{:>width$}", "x"));
    for c in &r.col_labels {
        out.push_str(&format!(" {c:>width$}"));
    }
    out.push('\n');
    for (label, row) in r.row_labels.iter().zip(r.cells.iter()) {
        out.push_str(&format!("{label:>width$}"));
        for v in row {
            out.push_str(&format!(" {v:>width$}"));
        }
        out.push('\n');
    }
}

pub fn render_text(records: &[TableRecord]) -> Vec<u8> {
    let mut out = String::new();
    for (i, r) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if records.len() > 1 || r.id.is_some() {
            match r.id.as_deref() {
                Some(id) => out.push_str(&format!("# {} ({id})\n", r.title)),
                None => out.push_str(&format!("# {}\n", r.title)),
            }
        }
        render_table_text(&mut out, r);
    }
    out.into_bytes()
}

pub fn render_json(records: &[TableRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn render_xml(records: &[TableRecord]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str("<tables>\n");
    for r in records {
        match r.id.as_deref() {
            Some(id) => out.push_str(&format!(
                "  <table id=\"{}\" title=\"{}\">\n",
                escape_xml(id),
                escape_xml(&r.title)
            )),
            None => out.push_str(&format!("  <table title=\"{}\">\n", escape_xml(&r.title))),
        }
        out.push_str("    <columns>");
        for c in &r.col_labels {
            out.push_str(&format!("<c>{c}</c>"));
        }
        out.push_str("</columns>\n");
        for (label, row) in r.row_labels.iter().zip(r.cells.iter()) {
            out.push_str(&format!("    <row label=\"{label}\">"));
            for v in row {
                out.push_str(&format!("<v>{v}</v>"));
            }
            out.push_str("</row>\n");
        }
        out.push_str("  </table>\n");
    }
    out.push_str("</tables>\n");
    out.into_bytes()
}

pub fn render_html(records: &[TableRecord]) -> Vec<u8> {
    report::render_html(records)
}

pub fn render(format: OutputFormat, records: &[TableRecord]) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(records),
        OutputFormat::Json => render_json(records),
        OutputFormat::Xml => render_xml(records),
        OutputFormat::Html => render_html(records),
    }
}
