// Table extraction from key/value/description input rows
// Author: Gabriel Demetrios Lafis

use std::io::Read;

use super::{DataError, InputRow, TableRow};

/// Reads structured rows out of tabular form input
pub struct TableExtractor;

impl TableExtractor {
    /// Extract key/value/description rows.
    ///
    /// Rows without cells are skipped, and so are rows whose trimmed key is
    /// empty. Missing value or description cells default to an empty string.
    pub fn extract(rows: &[InputRow]) -> Vec<TableRow> {
        rows.iter().filter_map(|cells| Self::extract_row(cells)).collect()
    }

    fn extract_row(cells: &[String]) -> Option<TableRow> {
        let key = cells.first()?.trim();
        if key.is_empty() {
            return None;
        }

        let cell = |index: usize| {
            cells.get(index)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        Some(TableRow {
            key: key.to_string(),
            value: cell(1),
            description: cell(2),
        })
    }

    /// Read input rows from CSV text, e.g. a pasted block of headers
    pub fn rows_from_csv<R: Read>(reader: R, has_header: bool) -> Result<Vec<InputRow>, DataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();

        for record in csv_reader.records() {
            let record = record.map_err(|e| DataError::ParseError(e.to_string()))?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(rows)
    }
}
