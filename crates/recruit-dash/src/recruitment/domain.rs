use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Canonical column names recognised across recruitment datasets.
pub mod columns {
    pub const JOB_REQ_ID: &str = "JobReqId";
    pub const DEPARTMENT: &str = "Department";
    pub const STATUS: &str = "Status";
    pub const SOURCE: &str = "Source";
    pub const RECRUITER: &str = "Recruiter";
    pub const CANDIDATE: &str = "Candidate";
    pub const FUNCTION: &str = "Function";
    pub const MONTH: &str = "Month";
    pub const OFFER_DATE: &str = "OfferDate";
    pub const JOINING_DATE: &str = "JoiningDate";
    pub const DOJ: &str = "DOJ";
}

/// Label used for null cells wherever a value has to be shown as a category.
pub const BLANK_LABEL: &str = "(blank)";

pub(crate) const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";

/// A single typed cell of the record table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Category label used for grouping and display.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(BLANK_LABEL),
            Self::Text(value) => Cow::Borrowed(value),
            Self::Date(date) => Cow::Owned(date.format(DATE_DISPLAY_FORMAT).to_string()),
        }
    }

    /// Exact, case-sensitive comparison against a user-supplied filter value.
    /// Null cells never match.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Text(text) => text == value,
            Self::Date(date) => date.format(DATE_DISPLAY_FORMAT).to_string() == value,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Date,
}

/// Recruitment pipeline stages a record's `Status` may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitmentStatus {
    Joined,
    Offered,
    Selection,
    InProcess,
    ReserveForIjp,
    Cancelled,
}

impl RecruitmentStatus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Joined,
            Self::Offered,
            Self::Selection,
            Self::InProcess,
            Self::ReserveForIjp,
            Self::Cancelled,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Joined => "Joined",
            Self::Offered => "Offered",
            Self::Selection => "Selection",
            Self::InProcess => "In Process",
            Self::ReserveForIjp => "Reserve for IJP",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Exact match against the canonical vocabulary.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == value)
    }

    /// Folds case and whitespace and maps the legacy `Offer` spelling onto
    /// `Offered`. Only used when normalisation was requested explicitly.
    pub fn normalize(value: &str) -> Option<Self> {
        let folded = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_lowercase();
        if folded == "offer" {
            return Some(Self::Offered);
        }
        Self::ordered()
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(&folded))
    }
}

impl fmt::Display for RecruitmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month label for a 1-based month index.
pub fn month_label(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_LABELS.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip_exactly() {
        for status in RecruitmentStatus::ordered() {
            assert_eq!(RecruitmentStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(RecruitmentStatus::from_label("joined"), None);
        assert_eq!(RecruitmentStatus::from_label("Offer"), None);
    }

    #[test]
    fn normalize_folds_case_and_legacy_offer() {
        assert_eq!(
            RecruitmentStatus::normalize("  in   process "),
            Some(RecruitmentStatus::InProcess)
        );
        assert_eq!(
            RecruitmentStatus::normalize("Offer"),
            Some(RecruitmentStatus::Offered)
        );
        assert_eq!(
            RecruitmentStatus::normalize("RESERVE FOR IJP"),
            Some(RecruitmentStatus::ReserveForIjp)
        );
        assert_eq!(RecruitmentStatus::normalize("Withdrawn"), None);
    }

    #[test]
    fn cell_matching_is_case_sensitive_and_skips_nulls() {
        assert!(CellValue::text("IT").matches("IT"));
        assert!(!CellValue::text("IT").matches("it"));
        assert!(!CellValue::Null.matches(BLANK_LABEL));

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert!(CellValue::Date(date).matches("2024-03-09"));
        assert_eq!(CellValue::Date(date).label(), "2024-03-09");
    }

    #[test]
    fn month_labels_cover_calendar() {
        assert_eq!(month_label(1), Some("Jan"));
        assert_eq!(month_label(12), Some("Dec"));
        assert_eq!(month_label(0), None);
        assert_eq!(month_label(13), None);
    }
}
