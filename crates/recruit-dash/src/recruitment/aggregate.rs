use super::domain::{month_label, CellValue, BLANK_LABEL};
use super::error::PipelineError;
use super::filter::FilteredTable;
use super::import::dates;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One (category, count) pair of an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateEntry {
    pub key: String,
    pub count: usize,
    /// Marks the group of null cells, which is keyed by the `(blank)` label.
    #[serde(skip_serializing_if = "is_false")]
    pub blank: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AggregateEntry {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
            blank: false,
        }
    }

    pub fn blank(count: usize) -> Self {
        Self {
            key: BLANK_LABEL.to_string(),
            count,
            blank: true,
        }
    }
}

/// Ordered (category, count) pairs grouped by one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub column: String,
    pub entries: Vec<AggregateEntry>,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count recorded for the value `key`, or 0 when the group is absent.
    /// Null cells are not a value; see [`AggregateResult::blank_count`].
    pub fn count_for(&self, key: &str) -> usize {
        self.entries
            .iter()
            .find(|entry| !entry.blank && entry.key == key)
            .map_or(0, |entry| entry.count)
    }

    /// Number of null cells in the grouped column.
    pub fn blank_count(&self) -> usize {
        self.entries
            .iter()
            .find(|entry| entry.blank)
            .map_or(0, |entry| entry.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.key.as_str()).collect()
    }
}

/// Number of distinct non-null values in `column`.
pub fn count_distinct(view: &FilteredTable<'_>, column: &str) -> Result<usize, PipelineError> {
    let distinct: HashSet<&CellValue> = view.values(column)?.filter(|v| !v.is_null()).collect();
    Ok(distinct.len())
}

/// Number of records whose `column` equals `value` exactly.
pub fn count_where_equals(
    view: &FilteredTable<'_>,
    column: &str,
    value: &str,
) -> Result<usize, PipelineError> {
    Ok(view.values(column)?.filter(|cell| cell.matches(value)).count())
}

/// Records per distinct value of `column`, largest group first and ties
/// broken by ascending key. Null cells form their own blank group, kept
/// apart from any text that reads `(blank)`, so the counts always add up to
/// the number of records.
pub fn group_count(view: &FilteredTable<'_>, column: &str) -> Result<AggregateResult, PipelineError> {
    let mut counts: HashMap<&CellValue, usize> = HashMap::new();
    for cell in view.values(column)? {
        *counts.entry(cell).or_default() += 1;
    }

    let mut entries: Vec<AggregateEntry> = counts
        .into_iter()
        .map(|(cell, count)| match cell {
            CellValue::Null => AggregateEntry::blank(count),
            value => AggregateEntry::new(value.label(), count),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.key.cmp(&b.key))
            .then_with(|| a.blank.cmp(&b.blank))
    });

    Ok(AggregateResult {
        column: column.to_string(),
        entries,
    })
}

/// Records per calendar month of `column`, in January..December order.
///
/// Date cells use their month; text cells may hold a date or a month name.
/// Months of different years share a bucket and null cells are skipped.
pub fn monthly_trend(
    view: &FilteredTable<'_>,
    column: &str,
) -> Result<AggregateResult, PipelineError> {
    let mut counts = [0usize; 12];
    for cell in view.values(column)? {
        let month = match cell {
            CellValue::Null => continue,
            CellValue::Date(date) => date.month(),
            CellValue::Text(text) => dates::parse_date(text)
                .map(|date| date.month())
                .or_else(|| dates::month_index(text))
                .ok_or_else(|| PipelineError::UnparseableDate {
                    column: column.to_string(),
                    value: text.clone(),
                })?,
        };
        counts[(month - 1) as usize] += 1;
    }

    let entries = (1u32..=12)
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .filter_map(|(month, count)| {
            month_label(month).map(|label| AggregateEntry::new(label, count))
        })
        .collect();

    Ok(AggregateResult {
        column: column.to_string(),
        entries,
    })
}
