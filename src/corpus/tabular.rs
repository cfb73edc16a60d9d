// CSV and JSON codecs for record collections.
//
// Reading is lenient: rows may be shorter or longer than the header, empty
// cells become empty strings, and a row the CSV reader cannot decode is
// skipped with a warning. One bad article never costs the whole file.

use anyhow::{Context, Result};
use tracing::warn;

use super::record::Record;

/// Parse CSV bytes with a header row into records.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        match row {
            Ok(row) => {
                // Cells beyond the header have no name and are dropped
                let record = Record::from_pairs(
                    headers
                        .iter()
                        .zip(row.iter())
                        .map(|(h, v)| (h.clone(), v.to_string())),
                );
                records.push(record);
            }
            Err(e) => {
                warn!(row = line + 1, error = %e, "Skipping unreadable CSV row");
            }
        }
    }

    Ok(records)
}

/// Column order for a set of records: first-seen order across all records.
pub fn column_order(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

/// Serialize records to CSV with a header row. Missing cells are written empty.
pub fn to_csv(records: &[Record]) -> Result<Vec<u8>> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let columns = column_order(records);
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))
}

/// One JSON object per line.
pub fn to_json_lines(records: &[Record]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// A single JSON array of objects.
pub fn to_json_array(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parse JSON produced by either writer above.
pub fn parse_json(text: &str) -> Result<Vec<Record>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Failed to parse JSON record array");
    }

    let mut records = Vec::new();
    for (line, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(raw) {
            Ok(record) => records.push(record),
            Err(e) => warn!(line = line + 1, error = %e, "Skipping unreadable JSON line"),
        }
    }
    Ok(records)
}
