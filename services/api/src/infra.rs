use metrics_exporter_prometheus::PrometheusHandle;
use recruit_dash::error::AppError;
use recruit_dash::recruitment::{FilterSpec, LoadOptions, RecordTable, Selection};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) strict_filters: bool,
}

/// One `--filter COLUMN=VALUE[,VALUE...]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilterArg {
    pub(crate) column: String,
    pub(crate) selection: Selection,
}

pub(crate) fn parse_filter(raw: &str) -> Result<FilterArg, String> {
    let (column, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE[,VALUE...], got '{raw}'"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{raw}'"));
    }

    let values: Vec<&str> = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    let selection = match values.as_slice() {
        [single] => Selection::single(*single),
        many => Selection::multi(many.iter().copied()),
    };

    Ok(FilterArg {
        column: column.to_string(),
        selection,
    })
}

pub(crate) fn filter_spec(filters: Vec<FilterArg>) -> FilterSpec {
    filters
        .into_iter()
        .fold(FilterSpec::new(), |spec, filter| {
            spec.with(filter.column, filter.selection)
        })
}

/// Loads the configured CSV export, `-` for stdin, or the built-in sample.
pub(crate) fn load_table(
    dataset: Option<&Path>,
    options: LoadOptions,
) -> Result<RecordTable, AppError> {
    let table = match dataset {
        Some(path) if path == Path::new("-") => {
            RecordTable::from_reader(std::io::stdin().lock(), options)?
        }
        Some(path) => RecordTable::from_path(path, options)?,
        None => {
            info!("no dataset configured, serving built-in sample records");
            RecordTable::sample()?
        }
    };
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filter_reads_single_and_multi_values() {
        let single = parse_filter("Department=IT").expect("single parses");
        assert_eq!(single.column, "Department");
        assert_eq!(single.selection, Selection::One("IT".to_string()));

        let multi = parse_filter("Status = Joined, Offered").expect("multi parses");
        assert_eq!(multi.column, "Status");
        assert_eq!(multi.selection, Selection::multi(["Joined", "Offered"]));
    }

    #[test]
    fn parse_filter_maps_all_and_empty_to_no_constraint() {
        assert_eq!(
            parse_filter("Source=All").expect("parses").selection,
            Selection::All
        );
        assert_eq!(
            parse_filter("Source=").expect("parses").selection,
            Selection::All
        );
    }

    #[test]
    fn parse_filter_rejects_missing_parts() {
        assert!(parse_filter("Department").is_err());
        assert!(parse_filter("=IT").is_err());
    }

    #[test]
    fn load_table_falls_back_to_sample() {
        let table = load_table(None, LoadOptions::default()).expect("sample loads");
        assert!(table.row_count() > 0);
    }
}
