mod charts;
pub mod router;
mod service;
pub mod views;

pub use charts::{standard_charts, ChartDefinition, ChartGrouping, ChartKind};
pub use router::dashboard_router;
pub use service::{DashboardRequest, DashboardService};
pub use views::{ChartSeries, DashboardSnapshot, FilterOptions, TableSnapshot};
