use crate::recruitment::domain::columns;
use crate::recruitment::table::RecordTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Donut,
    Bar,
    Funnel,
    Line,
}

impl ChartKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Bar => "bar",
            Self::Funnel => "funnel",
            Self::Line => "line",
        }
    }
}

/// Which aggregate feeds a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "column", rename_all = "snake_case")]
pub enum ChartGrouping {
    Column(String),
    MonthlyTrend(String),
}

impl ChartGrouping {
    pub fn column(&self) -> &str {
        match self {
            Self::Column(column) | Self::MonthlyTrend(column) => column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDefinition {
    pub title: String,
    pub kind: ChartKind,
    pub grouping: ChartGrouping,
}

impl ChartDefinition {
    pub fn by_column(title: impl Into<String>, kind: ChartKind, column: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            grouping: ChartGrouping::Column(column.into()),
        }
    }

    pub fn monthly(title: impl Into<String>, kind: ChartKind, column: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            grouping: ChartGrouping::MonthlyTrend(column.into()),
        }
    }
}

const TREND_COLUMNS: [&str; 3] = [columns::DOJ, columns::JOINING_DATE, columns::MONTH];

/// Charts the recruitment dashboards show, restricted to what `table` can feed.
pub fn standard_charts(table: &RecordTable) -> Vec<ChartDefinition> {
    let mut charts = vec![
        ChartDefinition::by_column("Hires by Department", ChartKind::Pie, columns::DEPARTMENT),
        ChartDefinition::by_column("Source Mix", ChartKind::Donut, columns::SOURCE),
        ChartDefinition::by_column("Status Funnel", ChartKind::Funnel, columns::STATUS),
        ChartDefinition::by_column("Recruiter Load", ChartKind::Bar, columns::RECRUITER),
    ];
    if let Some(column) = TREND_COLUMNS.into_iter().find(|c| table.has_column(c)) {
        charts.push(ChartDefinition::monthly(
            "Monthly Joining Trend",
            ChartKind::Line,
            column,
        ));
    }
    charts.retain(|chart| table.has_column(chart.grouping.column()));
    charts
}
