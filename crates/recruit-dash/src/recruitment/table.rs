use super::domain::{columns, CellValue, ColumnKind, RecruitmentStatus};
use super::error::{DataLoadError, PipelineError};
use super::import::{self, RawRecords};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a record table is built from.
#[derive(Debug, Clone)]
pub enum RecordSource {
    /// CSV export of the recruitment spreadsheet.
    File(PathBuf),
    /// Records written inline, one string per field. Blank strings are nulls.
    Literal {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl RecordSource {
    pub fn literal(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::Literal {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|field| field.to_string()).collect())
                .collect(),
        }
    }
}

/// Switches applied while loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Fold case and map `Offer` onto `Offered` instead of rejecting
    /// statuses outside the canonical vocabulary.
    pub normalize_status: bool,
}

/// Immutable, in-memory recruitment records with a fixed column set.
#[derive(Debug, Clone)]
pub struct RecordTable {
    columns: Vec<String>,
    kinds: Vec<ColumnKind>,
    positions: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl RecordTable {
    pub fn load(source: RecordSource) -> Result<Self, DataLoadError> {
        Self::load_with(source, LoadOptions::default())
    }

    pub fn load_with(source: RecordSource, options: LoadOptions) -> Result<Self, DataLoadError> {
        match source {
            RecordSource::File(path) => Self::from_path(path, options),
            RecordSource::Literal { columns, rows } => {
                Self::from_raw(import::literal_records(columns, rows), options)
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, options)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.columns.len(),
            "recruitment dataset loaded"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, options: LoadOptions) -> Result<Self, DataLoadError> {
        Self::from_raw(import::read_csv(reader)?, options)
    }

    /// Built-in dataset served when no export is configured.
    pub fn sample() -> Result<Self, DataLoadError> {
        Self::load(RecordSource::literal(SAMPLE_COLUMNS, SAMPLE_ROWS))
    }

    fn from_raw(raw: RawRecords, options: LoadOptions) -> Result<Self, DataLoadError> {
        let RawRecords { columns, mut rows } = raw;

        let mut positions = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if positions.insert(column.clone(), position).is_some() {
                return Err(DataLoadError::DuplicateColumn(column.clone()));
            }
        }

        if rows.is_empty() {
            return Err(DataLoadError::Empty);
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DataLoadError::RowLength {
                    row: index + 1,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        if let Some(&status_position) = positions.get(columns::STATUS) {
            check_statuses(&mut rows, status_position, options)?;
        }

        let rows = import::type_rows(columns.len(), rows);
        let kinds = (0..columns.len())
            .map(|position| column_kind(&rows, position))
            .collect();

        Ok(Self {
            columns,
            kinds,
            positions,
            rows,
        })
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn column_kind(&self, column: &str) -> Option<ColumnKind> {
        self.positions
            .get(column)
            .map(|&position| self.kinds[position])
    }

    pub(crate) fn position(&self, column: &str) -> Result<usize, PipelineError> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| PipelineError::UnknownColumn(column.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let position = *self.positions.get(column)?;
        self.rows.get(row).map(|cells| &cells[position])
    }

    /// Distinct non-null values of `column` in first-seen order. Option lists
    /// add their own "All" entry on top of this.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<CellValue>, PipelineError> {
        let position = self.position(column)?;
        let mut seen = HashSet::new();
        Ok(self
            .rows
            .iter()
            .map(|row| &row[position])
            .filter(|value| !value.is_null() && seen.insert(*value))
            .cloned()
            .collect())
    }
}

fn check_statuses(
    rows: &mut [Vec<String>],
    position: usize,
    options: LoadOptions,
) -> Result<(), DataLoadError> {
    let mut normalized = 0usize;
    for (index, row) in rows.iter_mut().enumerate() {
        let value = &mut row[position];
        if value.trim().is_empty() || RecruitmentStatus::from_label(value).is_some() {
            continue;
        }

        match RecruitmentStatus::normalize(value).filter(|_| options.normalize_status) {
            Some(status) => {
                *value = status.label().to_string();
                normalized += 1;
            }
            None => {
                return Err(DataLoadError::UnknownStatus {
                    row: index + 1,
                    value: value.clone(),
                })
            }
        }
    }

    if normalized > 0 {
        debug!(normalized, "status values folded onto canonical vocabulary");
    }
    Ok(())
}

fn column_kind(rows: &[Vec<CellValue>], position: usize) -> ColumnKind {
    let mut cells = rows
        .iter()
        .map(|row| &row[position])
        .filter(|cell| !cell.is_null())
        .peekable();
    if cells.peek().is_some() && cells.all(|cell| cell.as_date().is_some()) {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    }
}

const SAMPLE_COLUMNS: &[&str] = &[
    "Job Req ID",
    "Candidate",
    "Department",
    "Function",
    "Status",
    "Source",
    "Recruiter",
    "Offer Date",
    "DOJ",
];

const SAMPLE_ROWS: &[&[&str]] = &[
    &["1001", "Anita Rao", "IT", "Engineering", "Joined", "Referral", "Meera", "2024-01-08", "2024-01-29"],
    &["1001", "Rahul Shah", "IT", "Engineering", "Offered", "Naukri", "Meera", "2024-02-12", ""],
    &["1002", "Kiran Das", "HR", "People Ops", "Selection", "LinkedIn", "Arjun", "", ""],
    &["1003", "Sneha Iyer", "Finance", "Accounts", "Joined", "Consultant", "Arjun", "2024-01-15", "2024-02-05"],
    &["1004", "Vikram Nair", "Sales", "Field Sales", "In Process", "Naukri", "Priya", "", ""],
    &["1005", "Pooja Menon", "IT", "Infrastructure", "Reserve for IJP", "Internal", "Meera", "", ""],
    &["1006", "Amit Kulkarni", "Sales", "Key Accounts", "Cancelled", "Consultant", "Priya", "2024-02-20", ""],
    &["1007", "Divya Pillai", "Finance", "Treasury", "Joined", "Referral", "Arjun", "2024-02-26", "2024-03-18"],
    &["1008", "Suresh Babu", "Manufacturing", "Plant Ops", "Offered", "Campus", "Priya", "2024-03-04", ""],
    &["1009", "Neha Joshi", "Manufacturing", "Quality", "Joined", "Campus", "Priya", "2024-02-28", "2024-03-25"],
    &["1010", "Farhan Ali", "HR", "Talent", "In Process", "LinkedIn", "Arjun", "", ""],
    &["1011", "Lakshmi Reddy", "IT", "Engineering", "Joined", "LinkedIn", "Meera", "2024-03-11", "2024-04-01"],
];
