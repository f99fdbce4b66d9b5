//! Recruitment records and the filter-and-aggregate pipeline behind the
//! KPI cards and charts.

pub mod aggregate;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod filter;
mod import;
pub mod kpi;
pub mod table;

pub use aggregate::{
    count_distinct, count_where_equals, group_count, monthly_trend, AggregateEntry,
    AggregateResult,
};
pub use domain::{columns, CellValue, ColumnKind, RecruitmentStatus, BLANK_LABEL};
pub use error::{DataLoadError, PipelineError};
pub use filter::{
    apply_filters, apply_filters_lenient, FilterSpec, FilteredTable, Selection, ALL_SENTINEL,
};
pub use kpi::{evaluate_kpis, standard_kpis, KpiCard, KpiDefinition, KpiMeasure, KpiSet};
pub use table::{LoadOptions, RecordSource, RecordTable};
