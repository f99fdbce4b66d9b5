use super::charts::{standard_charts, ChartDefinition, ChartGrouping};
use super::views::{ChartSeries, DashboardSnapshot, FilterOptions, TableSnapshot};
use crate::recruitment::aggregate::{group_count, monthly_trend};
use crate::recruitment::domain::columns;
use crate::recruitment::error::PipelineError;
use crate::recruitment::filter::{FilterSpec, FilteredTable, ALL_SENTINEL};
use crate::recruitment::kpi::{evaluate_kpis, standard_kpis, KpiDefinition};
use crate::recruitment::table::RecordTable;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const FILTERABLE_COLUMNS: [&str; 6] = [
    columns::DEPARTMENT,
    columns::STATUS,
    columns::SOURCE,
    columns::RECRUITER,
    columns::FUNCTION,
    columns::MONTH,
];

/// Filter selections from the presentation layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub filters: FilterSpec,
    #[serde(default)]
    pub include_rows: bool,
}

/// Recomputes KPI cards and chart series for each filter change over one
/// shared, read-only table.
#[derive(Debug, Clone)]
pub struct DashboardService {
    table: Arc<RecordTable>,
    kpis: Vec<KpiDefinition>,
    charts: Vec<ChartDefinition>,
    strict_filters: bool,
}

impl DashboardService {
    /// Standard cards and charts; definitions the table cannot feed are dropped.
    pub fn new(table: Arc<RecordTable>, strict_filters: bool) -> Self {
        let kpis = standard_kpis()
            .into_iter()
            .filter(|definition| definition.applies_to(&table))
            .collect();
        let charts = standard_charts(&table);
        Self {
            table,
            kpis,
            charts,
            strict_filters,
        }
    }

    pub fn with_kpis(mut self, kpis: Vec<KpiDefinition>) -> Self {
        self.kpis = kpis;
        self
    }

    pub fn with_charts(mut self, charts: Vec<ChartDefinition>) -> Self {
        self.charts = charts;
        self
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn kpi_definitions(&self) -> &[KpiDefinition] {
        &self.kpis
    }

    pub fn chart_definitions(&self) -> &[ChartDefinition] {
        &self.charts
    }

    pub fn filter(&self, spec: &FilterSpec) -> Result<FilteredTable<'_>, PipelineError> {
        if self.strict_filters {
            self.table.view().filter(spec)
        } else {
            Ok(self.table.view().filter_lenient(spec))
        }
    }

    pub fn snapshot(&self, request: &DashboardRequest) -> Result<DashboardSnapshot, PipelineError> {
        let filtered = self.filter(&request.filters)?;
        let kpis = evaluate_kpis(&self.kpis, &filtered)?;

        let mut charts = Vec::with_capacity(self.charts.len());
        for chart in &self.charts {
            let data = match &chart.grouping {
                ChartGrouping::Column(column) => group_count(&filtered, column)?,
                ChartGrouping::MonthlyTrend(column) => monthly_trend(&filtered, column)?,
            };
            charts.push(ChartSeries {
                title: chart.title.clone(),
                kind: chart.kind,
                data,
            });
        }

        debug!(
            total = self.table.row_count(),
            matched = filtered.row_count(),
            charts = charts.len(),
            "dashboard snapshot computed"
        );

        Ok(DashboardSnapshot {
            total_records: self.table.row_count(),
            row_count: filtered.row_count(),
            kpis,
            charts,
            rows: request
                .include_rows
                .then(|| TableSnapshot::from_view(&filtered)),
        })
    }

    /// Option lists for the given columns, or for every standard filterable
    /// column the table has when `columns` is `None`.
    pub fn filter_options(
        &self,
        columns: Option<&[String]>,
    ) -> Result<Vec<FilterOptions>, PipelineError> {
        let selected: Vec<&str> = match columns {
            Some(columns) => columns.iter().map(String::as_str).collect(),
            None => FILTERABLE_COLUMNS
                .into_iter()
                .filter(|column| self.table.has_column(column))
                .collect(),
        };

        selected
            .into_iter()
            .map(|column| {
                let multi_choice: Vec<String> = self
                    .table
                    .distinct_values(column)?
                    .iter()
                    .map(|value| value.label().into_owned())
                    .collect();
                let single_choice = std::iter::once(ALL_SENTINEL.to_string())
                    .chain(multi_choice.iter().cloned())
                    .collect();
                Ok(FilterOptions {
                    column: column.to_string(),
                    single_choice,
                    multi_choice,
                })
            })
            .collect()
    }
}
