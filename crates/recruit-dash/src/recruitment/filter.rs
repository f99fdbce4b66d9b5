use super::domain::CellValue;
use super::error::PipelineError;
use super::table::RecordTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Single-choice value meaning "no constraint".
pub const ALL_SENTINEL: &str = "All";

/// Accepted values for one column.
///
/// An empty multi-select is treated as no constraint rather than as
/// "reject everything", matching how the dashboards behave when a user
/// clears a multi-choice control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelection", into = "RawSelection")]
pub enum Selection {
    All,
    One(String),
    AnyOf(BTreeSet<String>),
}

impl Selection {
    /// Value from a single-choice control; the `All` sentinel is unconstrained.
    pub fn single(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL_SENTINEL {
            Self::All
        } else {
            Self::One(value)
        }
    }

    /// Values from a multi-choice control; an empty selection is unconstrained.
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Self::All
        } else {
            Self::AnyOf(values)
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn accepts(&self, cell: &CellValue) -> bool {
        match self {
            Self::All => true,
            Self::One(value) => cell.matches(value),
            Self::AnyOf(values) => values.iter().any(|value| cell.matches(value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSelection {
    One(String),
    Many(Vec<String>),
}

impl From<RawSelection> for Selection {
    fn from(raw: RawSelection) -> Self {
        match raw {
            RawSelection::One(value) => Self::single(value),
            RawSelection::Many(values) => Self::multi(values),
        }
    }
}

impl From<Selection> for RawSelection {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => Self::One(ALL_SENTINEL.to_string()),
            Selection::One(value) => Self::One(value),
            Selection::AnyOf(values) => Self::Many(values.into_iter().collect()),
        }
    }
}

/// Column → accepted values. Columns left out are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSpec {
    constraints: BTreeMap<String, Selection>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, selection: Selection) -> Self {
        self.insert(column, selection);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, selection: Selection) {
        self.constraints.insert(column.into(), selection);
    }

    pub fn get(&self, column: &str) -> Option<&Selection> {
        self.constraints.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.constraints
            .iter()
            .map(|(column, selection)| (column.as_str(), selection))
    }
}

/// Records of a table that passed a filter, in original order.
///
/// Holds row positions into the shared table rather than copies.
#[derive(Debug, Clone)]
pub struct FilteredTable<'a> {
    table: &'a RecordTable,
    rows: Vec<usize>,
}

impl PartialEq for FilteredTable<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.rows == other.rows
    }
}

impl Eq for FilteredTable<'_> {}

impl RecordTable {
    /// Unfiltered view over every record.
    pub fn view(&self) -> FilteredTable<'_> {
        FilteredTable {
            table: self,
            rows: (0..self.row_count()).collect(),
        }
    }
}

impl<'a> FilteredTable<'a> {
    pub fn table(&self) -> &'a RecordTable {
        self.table
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [CellValue]> + '_ {
        let table = self.table;
        self.rows.iter().filter_map(move |&index| table.row(index))
    }

    /// Cells of one column across the filtered records.
    pub fn values(
        &self,
        column: &str,
    ) -> Result<impl Iterator<Item = &'a CellValue> + '_, PipelineError> {
        let position = self.table.position(column)?;
        Ok(self.rows().map(move |row| &row[position]))
    }

    /// Keeps the records that satisfy every constraint of `spec`.
    pub fn filter(&self, spec: &FilterSpec) -> Result<FilteredTable<'a>, PipelineError> {
        let mut constraints = Vec::new();
        for (column, selection) in spec.iter() {
            let position = self
                .table
                .position(column)
                .map_err(|_| PipelineError::InvalidFilterColumn(column.to_string()))?;
            if !selection.is_unconstrained() {
                constraints.push((position, selection));
            }
        }
        Ok(self.retain(&constraints))
    }

    /// Like [`FilteredTable::filter`] but ignores constraints on unknown
    /// columns instead of failing.
    pub fn filter_lenient(&self, spec: &FilterSpec) -> FilteredTable<'a> {
        let mut constraints = Vec::new();
        for (column, selection) in spec.iter() {
            match self.table.position(column) {
                Ok(position) if !selection.is_unconstrained() => {
                    constraints.push((position, selection))
                }
                Ok(_) => {}
                Err(_) => warn!(column, "ignoring filter on unknown column"),
            }
        }
        self.retain(&constraints)
    }

    fn retain(&self, constraints: &[(usize, &Selection)]) -> FilteredTable<'a> {
        if constraints.is_empty() {
            return self.clone();
        }

        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&index| {
                self.table.row(index).is_some_and(|row| {
                    constraints
                        .iter()
                        .all(|(position, selection)| selection.accepts(&row[*position]))
                })
            })
            .collect();

        FilteredTable {
            table: self.table,
            rows,
        }
    }
}

/// Applies `spec` to the whole table. Unknown columns are an error.
pub fn apply_filters<'a>(
    table: &'a RecordTable,
    spec: &FilterSpec,
) -> Result<FilteredTable<'a>, PipelineError> {
    table.view().filter(spec)
}

/// Applies `spec` to the whole table, ignoring unknown columns.
pub fn apply_filters_lenient<'a>(table: &'a RecordTable, spec: &FilterSpec) -> FilteredTable<'a> {
    table.view().filter_lenient(spec)
}
