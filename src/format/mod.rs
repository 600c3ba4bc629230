//! Output formatting for records and tables (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::table::{Record, Table};

/// Widest a cell may be in table output before it is truncated.
const MAX_CELL_WIDTH: usize = 50;

/// Formats provider results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &Record) -> String {
        match self.format {
            OutputFormat::Json => self.json_record(record),
            OutputFormat::Table => self.table_record(record),
            OutputFormat::Markdown => self.markdown_record(record),
            OutputFormat::Csv => self.csv_table(&Table::from(record.clone())),
        }
    }

    /// Formats a multi-row table.
    pub fn format_table(&self, table: &Table) -> String {
        if table.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_line(table.columns()),
                _ => "No results found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_table(table),
            OutputFormat::Table => self.table_rows(table),
            OutputFormat::Markdown => self.markdown_table(table),
            OutputFormat::Csv => self.csv_table(table),
        }
    }

    // JSON formatting

    fn json_record(&self, record: &Record) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_table(&self, table: &Table) -> String {
        serde_json::to_string_pretty(table).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_record(&self, record: &Record) -> String {
        let key_width = record.keys().map(|k| k.chars().count()).max().unwrap_or(0) + 1;

        record
            .iter()
            .map(|(k, v)| format!("{:<key_width$} {}", format!("{}:", k), v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn table_rows(&self, table: &Table) -> String {
        let widths: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cells = table.rows().iter().map(|r| r[i].chars().count());
                cells.chain(std::iter::once(col.chars().count())).max().unwrap_or(0).min(MAX_CELL_WIDTH)
            })
            .collect();

        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", truncate(cell, width)))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::new();

        // Header
        lines.push(render(table.columns()));
        lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));

        // Rows
        for row in table.rows() {
            lines.push(render(row.as_slice()));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} rows", table.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_record(&self, record: &Record) -> String {
        record
            .iter()
            .map(|(k, v)| format!("- **{}:** {}", k, Self::markdown_escape(v)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn markdown_table(&self, table: &Table) -> String {
        let mut lines = Vec::new();

        lines.push(format!("| {} |", table.columns().join(" | ")));
        lines.push(format!(
            "|{}|",
            table.columns().iter().map(|c| "-".repeat(c.len() + 2)).collect::<Vec<_>>().join("|")
        ));

        for row in table.rows() {
            let cells: Vec<String> = row.iter().map(|c| Self::markdown_escape(c)).collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }

        lines.push(String::new());
        lines.push(format!("*{} rows*", table.len()));

        lines.join("\n")
    }

    fn markdown_escape(s: &str) -> String {
        s.replace('|', "\\|")
    }

    // CSV formatting

    fn csv_table(&self, table: &Table) -> String {
        let mut lines = Vec::with_capacity(table.len() + 1);
        lines.push(Self::csv_line(table.columns()));

        for row in table.rows() {
            lines.push(Self::csv_line(row));
        }

        lines.join("\n")
    }

    fn csv_line(cells: &[String]) -> String {
        cells.iter().map(|c| Self::csv_escape(c)).collect::<Vec<_>>().join(",")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
