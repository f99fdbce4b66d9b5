//! Reading raw recruitment exports into typed columns.

pub(crate) mod dates;
mod mapping;
mod normalizer;

use super::domain::CellValue;
use super::error::DataLoadError;
use std::io::Read;

/// Header names and untyped field values, as read from a source.
#[derive(Debug, Default)]
pub(crate) struct RawRecords {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

pub(crate) fn read_csv<R: Read>(reader: R) -> Result<RawRecords, DataLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = csv_reader
        .headers()?
        .iter()
        .map(mapping::canonical_header)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(normalizer::clean_field).collect());
    }

    Ok(RawRecords { columns, rows })
}

/// Cleans literal records the same way CSV headers and fields are cleaned.
pub(crate) fn literal_records(columns: Vec<String>, rows: Vec<Vec<String>>) -> RawRecords {
    RawRecords {
        columns: columns
            .iter()
            .map(|column| mapping::canonical_header(column))
            .collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|field| normalizer::clean_field(field)).collect())
            .collect(),
    }
}

/// Types every column independently: a column becomes a date column when
/// all of its non-blank fields parse as dates, otherwise it stays text.
/// Blank fields are null either way. Rows must already be rectangular.
pub(crate) fn type_rows(width: usize, rows: Vec<Vec<String>>) -> Vec<Vec<CellValue>> {
    let date_columns: Vec<bool> = (0..width)
        .map(|position| {
            let mut fields = rows
                .iter()
                .map(|row| row[position].as_str())
                .filter(|field| !field.trim().is_empty())
                .peekable();
            fields.peek().is_some() && fields.all(|field| dates::parse_date(field).is_some())
        })
        .collect();

    rows.into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&date_columns)
                .map(|(field, is_date)| type_field(field, *is_date))
                .collect()
        })
        .collect()
}

fn type_field(field: String, is_date: bool) -> CellValue {
    if field.trim().is_empty() {
        return CellValue::Null;
    }
    if is_date {
        if let Some(date) = dates::parse_date(&field) {
            return CellValue::Date(date);
        }
    }
    CellValue::Text(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn read_csv_canonicalises_headers_and_fields() {
        let raw = read_csv(Cursor::new(
            "\u{feff}Job Req ID,Department,Status\n101, IT ,In   Process\n",
        ))
        .expect("csv parses");

        assert_eq!(raw.columns, vec!["JobReqId", "Department", "Status"]);
        assert_eq!(raw.rows, vec![vec!["101", "IT", "In Process"]]);
    }

    #[test]
    fn literal_records_are_cleaned_like_csv_fields() {
        let raw = literal_records(
            vec![" Dept ".to_string(), "Status".to_string()],
            vec![vec!["IT".to_string(), " Joined\u{feff}".to_string()]],
        );
        assert_eq!(raw.columns, vec!["Department", "Status"]);
        assert_eq!(raw.rows, vec![vec!["IT", "Joined"]]);
    }

    #[test]
    fn read_csv_keeps_short_rows_for_validation() {
        let raw = read_csv(Cursor::new("Department,Status\nIT\n")).expect("csv parses");
        assert_eq!(raw.rows[0].len(), 1);
    }

    #[test]
    fn type_rows_detects_date_columns() {
        let rows = vec![
            vec!["101".to_string(), "2024-01-10".to_string()],
            vec!["102".to_string(), String::new()],
        ];
        let typed = type_rows(2, rows);

        assert_eq!(typed[0][0], CellValue::text("101"));
        assert_eq!(
            typed[0][1],
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date"))
        );
        assert_eq!(typed[1][1], CellValue::Null);
    }

    #[test]
    fn type_rows_keeps_mixed_columns_as_text() {
        let rows = vec![
            vec!["2024-01-10".to_string()],
            vec!["pending".to_string()],
        ];
        let typed = type_rows(1, rows);
        assert_eq!(typed[0][0], CellValue::text("2024-01-10"));
        assert_eq!(typed[1][0], CellValue::text("pending"));
    }
}
