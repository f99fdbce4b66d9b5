use chrono::NaiveDate;
use recruit_dash::recruitment::dashboard::{DashboardRequest, DashboardService};
use recruit_dash::recruitment::{
    columns, CellValue, ColumnKind, DataLoadError, FilterSpec, LoadOptions, RecordSource,
    RecordTable, Selection,
};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recruitment_data.csv")
}

#[test]
fn spreadsheet_export_loads_with_canonical_columns() {
    let table = RecordTable::load(RecordSource::File(fixture_path())).expect("fixture loads");

    assert_eq!(table.row_count(), 10);
    assert_eq!(
        table.column_names(),
        &[
            columns::JOB_REQ_ID,
            columns::CANDIDATE,
            columns::DEPARTMENT,
            columns::FUNCTION,
            columns::STATUS,
            columns::SOURCE,
            columns::RECRUITER,
            columns::OFFER_DATE,
            columns::JOINING_DATE,
        ]
    );
    assert_eq!(table.column_kind(columns::JOINING_DATE), Some(ColumnKind::Date));
    assert_eq!(
        table.value(0, columns::JOINING_DATE),
        Some(&CellValue::Date(
            NaiveDate::from_ymd_opt(2024, 1, 29).expect("valid date")
        ))
    );
    assert_eq!(table.value(8, columns::JOB_REQ_ID), Some(&CellValue::Null));
}

#[test]
fn dashboard_over_spreadsheet_export() {
    let table = RecordTable::load(RecordSource::File(fixture_path())).expect("fixture loads");
    let service = DashboardService::new(Arc::new(table), true);

    let snapshot = service
        .snapshot(&DashboardRequest::default())
        .expect("snapshot computes");
    assert_eq!(snapshot.row_count, 10);
    assert_eq!(snapshot.kpis.get("Total Positions"), Some(8));
    assert_eq!(snapshot.kpis.get("Joined"), Some(4));
    assert_eq!(snapshot.kpis.get("Total Offers"), Some(2));

    let trend = snapshot
        .charts
        .iter()
        .find(|chart| chart.title == "Monthly Joining Trend")
        .expect("trend chart present");
    assert_eq!(trend.data.column, columns::JOINING_DATE);
    assert_eq!(trend.data.keys(), vec!["Jan", "Feb", "Mar"]);
    assert_eq!(trend.data.count_for("Mar"), 2);

    let filtered = service
        .snapshot(&DashboardRequest {
            filters: FilterSpec::new()
                .with(columns::RECRUITER, Selection::multi(["Arjun", "Priya"]))
                .with(columns::STATUS, Selection::single("Joined")),
            include_rows: true,
        })
        .expect("filtered snapshot computes");
    assert_eq!(filtered.row_count, 3);
    let rows = filtered.rows.expect("rows included");
    assert!(rows
        .rows
        .iter()
        .all(|row| row[4] == CellValue::text("Joined")));
}

#[test]
fn legacy_offer_vocabulary_needs_opt_in() {
    let csv = "Job Req ID,Department,Status\n1,IT,Offer\n2,HR,Joined\n";

    let error = RecordTable::from_reader(csv.as_bytes(), LoadOptions::default())
        .expect_err("strict vocabulary");
    assert!(matches!(error, DataLoadError::UnknownStatus { row: 1, .. }));

    let table = RecordTable::from_reader(
        csv.as_bytes(),
        LoadOptions {
            normalize_status: true,
        },
    )
    .expect("normalised load");
    assert_eq!(
        table.distinct_values(columns::STATUS).expect("status column"),
        vec![CellValue::text("Offered"), CellValue::text("Joined")]
    );
}

#[test]
fn header_only_export_is_rejected() {
    let error = RecordTable::from_reader("Job Req ID,Status\n".as_bytes(), LoadOptions::default())
        .expect_err("no records");
    assert!(matches!(error, DataLoadError::Empty));
}
