use crate::recruitment::aggregate::AggregateResult;
use crate::recruitment::domain::CellValue;
use crate::recruitment::filter::FilteredTable;
use crate::recruitment::kpi::KpiSet;
use serde::Serialize;

use super::charts::ChartKind;

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub data: AggregateResult,
}

/// Filtered records for verbatim tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableSnapshot {
    pub fn from_view(view: &FilteredTable<'_>) -> Self {
        Self {
            columns: view.table().column_names().to_vec(),
            rows: view.rows().map(<[CellValue]>::to_vec).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub total_records: usize,
    pub row_count: usize,
    pub kpis: KpiSet,
    pub charts: Vec<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<TableSnapshot>,
}

/// Option lists for one filterable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub column: String,
    /// `All` followed by the distinct values, for single-choice controls.
    pub single_choice: Vec<String>,
    /// Distinct values, all pre-selected in multi-choice controls.
    pub multi_choice: Vec<String>,
}
