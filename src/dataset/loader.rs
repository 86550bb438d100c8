use std::{collections::BTreeMap, io::Read, path::Path};

use csv::StringRecord;
use serde_json::Value;

use super::models::{Record, Scored, TextRecord, format_score, infer_cell};
use crate::error::DatasetError;

/// Header-aware view over one CSV row.
struct Row<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    fn raw(&self, column: &'static str) -> Result<&'a str, DatasetError> {
        let index = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or(DatasetError::MissingColumn(column))?;
        Ok(self.record.get(index).unwrap_or(""))
    }

    fn cell(&self, column: &'static str) -> Result<Value, DatasetError> {
        self.raw(column).map(infer_cell)
    }

    fn line(&self) -> u64 {
        self.record.position().map(|p| p.line()).unwrap_or(0)
    }
}

fn require_columns(headers: &StringRecord, columns: &[&'static str]) -> Result<(), DatasetError> {
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(DatasetError::MissingColumn(*column));
        }
    }
    Ok(())
}

fn parse_record(row: &Row<'_>) -> Result<Record, DatasetError> {
    let raw_id = row.raw("id")?;
    let id = raw_id
        .trim()
        .parse::<i64>()
        .map_err(|_| DatasetError::InvalidId {
            value: raw_id.to_string(),
            line: row.line(),
        })?;

    let extra = row
        .headers
        .iter()
        .zip(row.record.iter())
        .filter(|(header, _)| !Record::COLUMNS.contains(header))
        .map(|(header, value)| (header.to_string(), infer_cell(value)))
        .collect::<BTreeMap<_, _>>();

    Ok(Record {
        id,
        actual_response: row.cell("actual_response")?,
        response_score: row.cell("response_score")?,
        rf_prediction: row.cell("rf_prediction")?,
        xgb_prediction: row.cell("xgb_prediction")?,
        nb_prediction: row.cell("nb_prediction")?,
        nb_isotonic_prediction: row.cell("nb_isotonic_prediction")?,
        nb_sigmoid_prediction: row.cell("nb_sigmoid_prediction")?,
        extra,
    })
}

fn parse_text_record(row: &Row<'_>) -> Result<TextRecord, DatasetError> {
    Ok(TextRecord {
        id: row.cell("ID")?,
        name: row.cell("Name")?,
        description: row.cell("Description")?,
        xgb_prediction: row.cell("xgb_prediction")?,
        rf_prediction: row.cell("rf_prediction")?,
        nb_prediction: row.cell("nb_prediction")?,
        nb_isotonic_prediction: row.cell("nb_isotonic_prediction")?,
        nb_sigmoid_prediction: row.cell("nb_sigmoid_prediction")?,
        response_score: row.cell("response_score")?,
        response_v05: row.cell("response_v05")?,
        response_v07: row.cell("response_v07")?,
        response_v09: row.cell("response_v09")?,
    })
}

fn read_rows<R, T>(
    reader: R,
    columns: &[&'static str],
    parse: fn(&Row<'_>) -> Result<T, DatasetError>,
) -> Result<Vec<T>, DatasetError>
where
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    require_columns(&headers, columns)?;

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        rows.push(parse(&Row {
            headers: &headers,
            record: &record,
        })?);
    }

    Ok(rows)
}

pub fn read_results<R: Read>(reader: R) -> Result<Vec<Record>, DatasetError> {
    read_rows(reader, &Record::COLUMNS, parse_record)
}

pub fn read_text<R: Read>(reader: R) -> Result<Vec<TextRecord>, DatasetError> {
    read_rows(reader, &TextRecord::COLUMNS, parse_text_record)
}

pub fn load_results(path: &Path) -> Result<Vec<Record>, DatasetError> {
    read_results(std::fs::File::open(path)?)
}

pub fn load_text(path: &Path) -> Result<Vec<TextRecord>, DatasetError> {
    read_text(std::fs::File::open(path)?)
}

/// Rewrites every `response_score` to a five decimal string.
///
/// All or nothing per table: if any score can't be formatted the table is
/// left untouched and `false` is returned.
pub fn format_response_scores<T: Scored>(table: &str, rows: &mut [T]) -> bool {
    let mut formatted = Vec::with_capacity(rows.len());
    for row in rows.iter() {
        match format_score(row.response_score()) {
            Some(score) => formatted.push(score),
            None => {
                tracing::error!(
                    "Error formatting response_score in {} table: unsupported value {}",
                    table,
                    row.response_score()
                );
                return false;
            }
        }
    }

    for (row, score) in rows.iter_mut().zip(formatted) {
        row.set_response_score(Value::String(score));
    }
    true
}
