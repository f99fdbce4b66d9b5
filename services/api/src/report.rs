use crate::infra::{filter_spec, load_table, parse_filter, FilterArg};
use clap::Args;
use recruit_dash::config::AppConfig;
use recruit_dash::error::AppError;
use recruit_dash::recruitment::dashboard::{DashboardRequest, DashboardService, DashboardSnapshot};
use recruit_dash::recruitment::{LoadOptions, RecordTable};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DatasetArgs {
    /// CSV export to read (`-` for stdin). Defaults to APP_DATASET, then the built-in sample.
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Fold status spelling variants (e.g. `Offer`) onto the canonical vocabulary
    #[arg(long)]
    pub(crate) normalize_status: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Filter as COLUMN=VALUE[,VALUE...]; repeat for more columns
    #[arg(long = "filter", value_parser = parse_filter)]
    pub(crate) filters: Vec<FilterArg>,
    /// Include the filtered records in the output
    #[arg(long)]
    pub(crate) list_rows: bool,
    /// Emit the snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OptionsArgs {
    #[command(flatten)]
    pub(crate) dataset: DatasetArgs,
    /// Columns to list; defaults to the standard filter columns present
    #[arg(long = "column")]
    pub(crate) columns: Vec<String>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        dataset,
        filters,
        list_rows,
        json,
    } = args;

    let service = build_service(dataset)?;
    let request = DashboardRequest {
        filters: filter_spec(filters),
        include_rows: list_rows,
    };
    let snapshot = service.snapshot(&request)?;

    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Snapshot unavailable: {err}"),
        }
    } else {
        render_snapshot(&snapshot);
    }
    Ok(())
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let OptionsArgs { dataset, columns } = args;
    let service = build_service(dataset)?;
    let columns = (!columns.is_empty()).then_some(columns.as_slice());

    for option in service.filter_options(columns)? {
        println!("{}", option.column);
        for value in &option.single_choice {
            println!("- {value}");
        }
    }
    Ok(())
}

fn build_service(args: DatasetArgs) -> Result<DashboardService, AppError> {
    let config = AppConfig::load()?;
    let dataset = args.dataset.or(config.dataset.path);
    let options = LoadOptions {
        normalize_status: args.normalize_status || config.dataset.normalize_status,
    };
    let table: RecordTable = load_table(dataset.as_deref(), options)?;
    Ok(DashboardService::new(
        Arc::new(table),
        config.environment.strict_filters(),
    ))
}

pub(crate) fn render_snapshot(snapshot: &DashboardSnapshot) {
    println!("Recruitment dashboard");
    println!(
        "Records: {} of {} match the current filters",
        snapshot.row_count, snapshot.total_records
    );

    println!("\nKPIs");
    for card in snapshot.kpis.cards() {
        println!("- {}: {}", card.label, card.value);
    }

    for chart in &snapshot.charts {
        println!("\n{} ({})", chart.title, chart.kind.label());
        if chart.data.is_empty() {
            println!("- no records");
            continue;
        }
        for entry in &chart.data.entries {
            println!("- {}: {}", entry.key, entry.count);
        }
    }

    if let Some(rows) = &snapshot.rows {
        println!("\nRecords");
        println!("{}", rows.columns.join(" | "));
        for row in &rows.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            println!("{}", cells.join(" | "));
        }
    }
}
