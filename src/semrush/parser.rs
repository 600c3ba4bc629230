//! Parser for SEMrush `;`-delimited text responses.
//!
//! SEMrush always answers 200 OK. A failure is signalled by a body such as
//! `ERROR 50 :: NOTHING FOUND`; anything else is a header line followed by
//! zero or more data lines.

use super::models::{ProviderError, SemrushResponse};
use crate::error::ParseError;
use crate::table::{Record, Table};
use tracing::{debug, trace};

/// Marker a provider-level error body starts with.
pub const ERROR_MARKER: &str = "ERROR";

/// Separates an error code from its message.
pub const ERROR_SEPARATOR: &str = " :: ";

/// Field separator within a line.
pub const FIELD_SEPARATOR: char = ';';

/// Returns the provider error if `body` is an error payload.
pub fn parse_error(body: &str) -> Option<ProviderError> {
    let body = body.trim_start_matches('\u{feff}');
    if !body.starts_with(ERROR_MARKER) {
        return None;
    }

    let error = match body.split_once(ERROR_SEPARATOR) {
        Some((code, message)) => ProviderError::new(code.trim(), message.trim_end()),
        None => ProviderError::new(body.trim(), ""),
    };
    debug!("SEMrush returned {}: {}", error.code, error.message);
    Some(error)
}

/// Parses a multi-row report into a table.
pub fn parse_table(body: &str) -> Result<SemrushResponse<Table>, ParseError> {
    if let Some(error) = parse_error(body) {
        return Ok(SemrushResponse::Error(error));
    }

    let body = body.trim_start_matches('\u{feff}');
    let mut lines = body.lines().map(|l| l.trim_end_matches('\r'));

    let header = lines.next().filter(|h| !h.trim().is_empty()).ok_or(ParseError::Empty)?;
    let mut table = Table::new(split_fields(header));

    for line in lines {
        if line.trim().is_empty() {
            trace!("Skipping blank line");
            continue;
        }
        table.push_row(split_fields(line))?;
    }

    debug!("Parsed {} rows x {} columns", table.len(), table.columns().len());
    Ok(SemrushResponse::Data(table))
}

/// Parses a single-row report into a record.
pub fn parse_record(body: &str) -> Result<SemrushResponse<Record>, ParseError> {
    match parse_table(body)? {
        SemrushResponse::Error(error) => Ok(SemrushResponse::Error(error)),
        SemrushResponse::Data(table) => {
            let record = table.record(0).ok_or(ParseError::MissingDataRow)?;
            Ok(SemrushResponse::Data(record))
        }
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_record() {
        let response = parse_record("Keyword;Search Volume\nfoo;1000").unwrap();
        let record = response.data().unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Keyword"), Some("foo"));
        assert_eq!(record.get("Search Volume"), Some("1000"));
    }

    #[test]
    fn test_parse_record_crlf() {
        let response = parse_record("Keyword;Search Volume;CPC\r\nfoo;1000;0.52\r\n").unwrap();
        let record = response.data().unwrap();
        assert_eq!(record.get("CPC"), Some("0.52"));
    }

    #[test]
    fn test_parse_record_uses_first_row() {
        let response = parse_record("Keyword;Search Volume\nfoo;1000\nbar;20").unwrap();
        assert_eq!(response.data().unwrap().get("Keyword"), Some("foo"));
    }

    #[test]
    fn test_parse_record_missing_row() {
        assert_eq!(parse_record("Keyword;Search Volume\n"), Err(ParseError::MissingDataRow));
    }

    #[test]
    fn test_parse_error_payload() {
        let response = parse_record("ERROR 50 :: NOTHING FOUND\n").unwrap();
        let error = response.error().unwrap();
        assert_eq!(error.code, "ERROR 50");
        assert_eq!(error.message, "NOTHING FOUND");
        assert!(response.is_error());
    }

    #[test]
    fn test_parse_error_bare_marker() {
        let response = parse_table("ERROR :: message").unwrap();
        let error = response.error().unwrap();
        assert_eq!(error.code, "ERROR");
        assert_eq!(error.message, "message");
    }

    #[test]
    fn test_parse_error_splits_on_first_separator() {
        let error = parse_error("ERROR 120 :: WRONG KEY :: ID NOT FOUND").unwrap();
        assert_eq!(error.code, "ERROR 120");
        assert_eq!(error.message, "WRONG KEY :: ID NOT FOUND");
    }

    #[test]
    fn test_parse_error_without_separator() {
        let error = parse_error("ERROR 132\r\n").unwrap();
        assert_eq!(error.code, "ERROR 132");
        assert_eq!(error.message, "");
    }

    #[test]
    fn test_parse_error_not_an_error() {
        assert!(parse_error("Keyword;ERROR\nfoo;bar").is_none());
        assert!(parse_error(" ERROR 50 :: leading space").is_none());
    }

    #[test]
    fn test_parse_table_rows_in_order() {
        let body = "Domain;Url;Position\na.com;https://a.com/;1\nb.com;https://b.com/x;2\nc.com;https://c.com/;3\n";
        let table = parse_table(body).unwrap().into_data().unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns(), &["Domain", "Url", "Position"]);
        assert_eq!(table.column("Position"), Some(vec!["1", "2", "3"]));
        assert_eq!(table.rows()[1], vec!["b.com", "https://b.com/x", "2"]);
    }

    #[test]
    fn test_parse_table_header_only() {
        let table = parse_table("Keyword;Search Volume\n").unwrap().into_data().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 2);
    }

    #[test]
    fn test_parse_table_skips_blank_lines() {
        let table = parse_table("a;b\n1;2\n\n3;4\n\n").unwrap().into_data().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_table_column_mismatch() {
        let err = parse_table("a;b;c\n1;2;3\n4;5\n").unwrap_err();
        assert_eq!(err, ParseError::ColumnMismatch { line: 3, expected: 3, found: 2 });

        let err = parse_table("a;b\n1;2;3\n").unwrap_err();
        assert_eq!(err, ParseError::ColumnMismatch { line: 2, expected: 2, found: 3 });
    }

    #[test]
    fn test_parse_table_empty_body() {
        assert_eq!(parse_table(""), Err(ParseError::Empty));
        assert_eq!(parse_table("\n\n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_table_keeps_empty_fields() {
        let table = parse_table("Keyword;Trends\nfoo;\n").unwrap().into_data().unwrap();
        assert_eq!(table.rows()[0], vec!["foo", ""]);
    }

    #[test]
    fn test_parse_table_strips_bom() {
        let table = parse_table("\u{feff}Keyword;Search Volume\nfoo;10").unwrap().into_data().unwrap();
        assert_eq!(table.columns()[0], "Keyword");
    }

    #[test]
    fn test_round_trip() {
        let body = "Keyword;Search Volume;CPC\nseo;1000;1.20\nseo tools;250;3.05";
        let table = parse_table(body).unwrap().into_data().unwrap();
        assert_eq!(table.to_delimited(FIELD_SEPARATOR), body);
    }
}
