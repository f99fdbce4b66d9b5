use recruit_dash::recruitment::{
    apply_filters, count_distinct, count_where_equals, group_count, monthly_trend, AggregateEntry,
    FilterSpec, RecordSource, RecordTable, Selection,
};

fn recruitment_table() -> RecordTable {
    RecordTable::load(RecordSource::literal(
        &["JobReqId", "Department", "Status", "Source", "DOJ"],
        &[
            &["101", "IT", "Joined", "Referral", "2024-03-04"],
            &["101", "HR", "Offered", "Naukri", "2024-01-15"],
            &["102", "IT", "Cancelled", "Naukri", ""],
            &["103", "Sales", "Joined", "Campus", "2024-02-19"],
            &["104", "IT", "In Process", "Referral", ""],
            &["105", "HR", "Joined", "Campus", "2024-01-29"],
            &["106", "Sales", "Selection", "", ""],
        ],
    ))
    .expect("literal table loads")
}

fn entry(key: &str, count: usize) -> AggregateEntry {
    AggregateEntry::new(key, count)
}

fn specs() -> Vec<FilterSpec> {
    vec![
        FilterSpec::new(),
        FilterSpec::new().with("Department", Selection::single("IT")),
        FilterSpec::new().with("Status", Selection::multi(["Joined", "Offered"])),
        FilterSpec::new()
            .with("Department", Selection::multi(["IT", "Sales"]))
            .with("Source", Selection::single("Referral")),
        FilterSpec::new().with("Department", Selection::single("Legal")),
    ]
}

#[test]
fn filtering_twice_changes_nothing() {
    let table = recruitment_table();
    for spec in specs() {
        let once = apply_filters(&table, &spec).expect("first pass");
        let twice = once.filter(&spec).expect("second pass");
        assert_eq!(once, twice, "spec {spec:?} is not idempotent");
    }
}

#[test]
fn adding_constraints_never_grows_the_result() {
    let table = recruitment_table();
    let broad = FilterSpec::new().with("Department", Selection::multi(["IT", "HR"]));
    let narrower = FilterSpec::new().with("Department", Selection::single("IT"));
    let narrowest = narrower
        .clone()
        .with("Status", Selection::multi(["Joined", "Cancelled"]));

    let broad_rows = apply_filters(&table, &broad).expect("broad").row_count();
    let narrower_rows = apply_filters(&table, &narrower).expect("narrower").row_count();
    let narrowest_rows = apply_filters(&table, &narrowest)
        .expect("narrowest")
        .row_count();

    assert_eq!(broad_rows, 5);
    assert!(narrower_rows <= broad_rows);
    assert!(narrowest_rows <= narrower_rows);
    assert_eq!(narrowest_rows, 2);
}

#[test]
fn empty_spec_returns_every_record_in_order() {
    let table = recruitment_table();
    let filtered = apply_filters(&table, &FilterSpec::new()).expect("filter applies");
    assert_eq!(filtered.row_indices(), &[0, 1, 2, 3, 4, 5, 6]);
    assert!(filtered
        .rows()
        .zip(table.rows())
        .all(|(filtered_row, original_row)| filtered_row == original_row));
}

#[test]
fn group_counts_add_up_to_row_count() {
    let table = recruitment_table();
    for spec in specs() {
        let filtered = apply_filters(&table, &spec).expect("filter applies");
        for column in ["JobReqId", "Department", "Status", "Source", "DOJ"] {
            let result = group_count(&filtered, column).expect("groups");
            assert_eq!(result.total(), filtered.row_count(), "column {column}");
        }
    }
}

#[test]
fn status_kpi_matches_status_chart() {
    let table = recruitment_table();
    for spec in specs() {
        let filtered = apply_filters(&table, &spec).expect("filter applies");
        let chart = group_count(&filtered, "Status").expect("groups");
        for status in ["Joined", "Offered", "Cancelled", "Reserve for IJP"] {
            let kpi = count_where_equals(&filtered, "Status", status).expect("counts");
            assert_eq!(kpi, chart.count_for(status), "status {status}");
        }
    }
}

/// Declared convention: clearing a multi-select removes the constraint.
#[test]
fn empty_multiselect_means_no_constraint() {
    let table = recruitment_table();
    let cleared = FilterSpec::new()
        .with("Department", Selection::multi(Vec::<String>::new()))
        .with("Status", Selection::single("Joined"));
    let unconstrained = FilterSpec::new().with("Status", Selection::single("Joined"));

    let with_cleared = apply_filters(&table, &cleared).expect("cleared");
    let without = apply_filters(&table, &unconstrained).expect("unconstrained");
    assert_eq!(with_cleared, without);
    assert_eq!(with_cleared.row_count(), 3);
}

#[test]
fn department_filter_then_status_breakdown() {
    let table = RecordTable::load(RecordSource::literal(
        &["Dept", "Status"],
        &[&["IT", "Joined"], &["HR", "Offered"], &["IT", "Cancelled"]],
    ))
    .expect("literal table loads");

    // `Dept` is canonicalised to `Department`.
    let spec = FilterSpec::new().with("Department", Selection::single("IT"));
    let filtered = apply_filters(&table, &spec).expect("filter applies");
    assert_eq!(filtered.row_count(), 2);

    let result = group_count(&filtered, "Status").expect("groups");
    assert_eq!(result.entries, vec![entry("Cancelled", 1), entry("Joined", 1)]);
}

#[test]
fn distinct_requisitions_ignore_repeats() {
    let table = RecordTable::load(RecordSource::literal(
        &["JobReqId"],
        &[&["101"], &["101"], &["102"]],
    ))
    .expect("literal table loads");
    assert_eq!(count_distinct(&table.view(), "JobReqId").expect("counts"), 2);
}

#[test]
fn monthly_trend_is_chronological_not_by_count() {
    let table = RecordTable::load(RecordSource::literal(
        &["DOJ"],
        &[
            &["2024-01-08"],
            &["2024-03-04"],
            &["2024-03-11"],
            &["2024-03-18"],
            &["2024-02-05"],
            &["2024-02-12"],
        ],
    ))
    .expect("literal table loads");

    let result = monthly_trend(&table.view(), "DOJ").expect("trend");
    assert_eq!(
        result.entries,
        vec![entry("Jan", 1), entry("Feb", 2), entry("Mar", 3)]
    );
}
