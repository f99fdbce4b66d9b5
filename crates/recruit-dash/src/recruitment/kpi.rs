use super::aggregate::{count_distinct, count_where_equals};
use super::domain::{columns, RecruitmentStatus};
use super::error::PipelineError;
use super::filter::FilteredTable;
use super::table::RecordTable;
use serde::{Deserialize, Serialize};

/// How a KPI reduces the filtered records to one integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KpiMeasure {
    DistinctCount { column: String },
    CountWhere { column: String, value: String },
}

impl KpiMeasure {
    pub fn column(&self) -> &str {
        match self {
            Self::DistinctCount { column } | Self::CountWhere { column, .. } => column,
        }
    }
}

/// A labelled card definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiDefinition {
    pub label: String,
    pub measure: KpiMeasure,
}

impl KpiDefinition {
    pub fn distinct(label: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            measure: KpiMeasure::DistinctCount {
                column: column.into(),
            },
        }
    }

    pub fn count_where(
        label: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            measure: KpiMeasure::CountWhere {
                column: column.into(),
                value: value.into(),
            },
        }
    }

    pub fn applies_to(&self, table: &RecordTable) -> bool {
        table.has_column(self.measure.column())
    }

    pub fn evaluate(&self, view: &FilteredTable<'_>) -> Result<usize, PipelineError> {
        match &self.measure {
            KpiMeasure::DistinctCount { column } => count_distinct(view, column),
            KpiMeasure::CountWhere { column, value } => count_where_equals(view, column, value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: usize,
}

/// KPI cards in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KpiSet {
    cards: Vec<KpiCard>,
}

impl KpiSet {
    pub fn get(&self, label: &str) -> Option<usize> {
        self.cards
            .iter()
            .find(|card| card.label == label)
            .map(|card| card.value)
    }

    pub fn cards(&self) -> &[KpiCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub fn evaluate_kpis(
    definitions: &[KpiDefinition],
    view: &FilteredTable<'_>,
) -> Result<KpiSet, PipelineError> {
    let cards = definitions
        .iter()
        .map(|definition| {
            definition.evaluate(view).map(|value| KpiCard {
                label: definition.label.clone(),
                value,
            })
        })
        .collect::<Result<_, _>>()?;
    Ok(KpiSet { cards })
}

/// Total positions plus one card per pipeline stage, offers first.
pub fn standard_kpis() -> Vec<KpiDefinition> {
    const STAGE_CARDS: [(&str, RecruitmentStatus); 6] = [
        ("Total Offers", RecruitmentStatus::Offered),
        ("Joined", RecruitmentStatus::Joined),
        ("Selection", RecruitmentStatus::Selection),
        ("In Process", RecruitmentStatus::InProcess),
        ("Reserve for IJP", RecruitmentStatus::ReserveForIjp),
        ("Cancelled", RecruitmentStatus::Cancelled),
    ];

    std::iter::once(KpiDefinition::distinct("Total Positions", columns::JOB_REQ_ID))
        .chain(STAGE_CARDS.into_iter().map(|(label, status)| {
            KpiDefinition::count_where(label, columns::STATUS, status.label())
        }))
        .collect()
}
