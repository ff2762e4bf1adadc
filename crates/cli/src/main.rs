//! facetkit CLI — run the dropdown and filter-panel logic over JSON record files.
//!
//! Calls `facetkit-core` directly; a record file is a JSON array of objects.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use facetkit_core::dismiss::DismissListeners;
use facetkit_core::dropdown::Dropdown;
use facetkit_core::matcher::filter_records;
use facetkit_core::options::unique_values;
use facetkit_core::panel::{Column, FilterPanel};
use facetkit_core::position::{Rect, ScrollOffset};
use facetkit_core::record::option_value;
use facetkit_core::shell::{DropdownView, PanelView};
use facetkit_core::sort::{sort_records, SortDirection};
use facetkit_core::{
    load_config_file, load_facet_config, load_records, FacetConfig, FieldPath, FilterCriteria,
};

/// facetkit — filter options, criteria and searchable dropdowns from the terminal.
#[derive(Parser)]
#[command(name = "facetkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: .facetkit.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct filter options for a field
    Options {
        /// JSON file holding an array of records
        file: PathBuf,

        /// Dotted field path, e.g. location.name
        #[arg(long)]
        field: String,
    },
    /// Print the records matching every criterion
    Filter {
        file: PathBuf,

        /// Criterion as PATH=VALUE (repeatable); VALUE "all" means unconstrained
        #[arg(long = "where", value_name = "PATH=VALUE")]
        criteria: Vec<String>,
    },
    /// Filter records the way the searchable dropdown does
    Search {
        file: PathBuf,

        /// Text typed into the dropdown
        query: String,

        /// Field used as the option label
        #[arg(long, default_value = "name")]
        label: String,

        /// Field used as the option key
        #[arg(long, default_value = "id")]
        key: String,

        /// Field label shown in the empty-state message
        #[arg(long, default_value = "")]
        field_label: String,

        /// Choose this key after typing and print the change
        #[arg(long)]
        pick: Option<String>,
    },
    /// Sort records by a field
    Sort {
        file: PathBuf,

        #[arg(long)]
        field: String,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Open the filter panel and show its fields and options
    Panel {
        file: PathBuf,

        /// Filterable column as PATH or PATH:LABEL (repeatable)
        #[arg(long = "column", value_name = "PATH[:LABEL]")]
        columns: Vec<String>,

        /// Committed criterion as PATH=VALUE (repeatable)
        #[arg(long = "where", value_name = "PATH=VALUE")]
        criteria: Vec<String>,
    },
}

fn parse_criteria(assignments: &[String]) -> facetkit_core::Result<FilterCriteria> {
    let mut criteria = FilterCriteria::new();
    for assignment in assignments {
        let (path, value) = FilterCriteria::parse_assignment(assignment)?;
        criteria.set(path, value);
    }
    Ok(criteria)
}

fn parse_column(spec: &str) -> Column {
    match spec.split_once(':') {
        Some((path, label)) => Column::filterable(path, label),
        None => Column::filterable(spec, spec),
    }
}

/// Records that carry a key at `key_path`. Keyless records cannot be chosen
/// and would collapse onto one empty key, so they are dropped with a warning.
fn keyed_records(records: Vec<Value>, key_path: &FieldPath) -> Vec<Value> {
    let total = records.len();
    let keyed: Vec<Value> = records
        .into_iter()
        .filter(|r| option_value(r, key_path).is_some_and(|k| !k.is_empty()))
        .collect();
    if keyed.len() < total {
        tracing::warn!(
            skipped = total - keyed.len(),
            key = key_path.as_str(),
            "records without a key are not offered"
        );
    }
    keyed
}

fn load_config(explicit: Option<&Path>) -> facetkit_core::Result<FacetConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Ok(load_facet_config(&cwd))
        }
    }
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Could not encode output: {e}"),
    }
}

fn print_records(records: &[&Value], json: bool) {
    if json {
        print_json(&records);
    } else {
        for record in records {
            println!("{record}");
        }
        eprintln!("\n{} records", records.len());
    }
}

fn run(cli: Cli) -> facetkit_core::Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Options { file, field } => {
            let records = load_records(&file)?;
            let values = unique_values(&records, &FieldPath::parse(&field));
            if cli.json {
                print_json(&values);
            } else {
                if values.is_empty() {
                    eprintln!("No options for '{field}'");
                    return Ok(ExitCode::FAILURE);
                }
                for value in &values {
                    println!("{value}");
                }
            }
        }
        Commands::Filter { file, criteria } => {
            let records = load_records(&file)?;
            let criteria = parse_criteria(&criteria)?;
            let matched = filter_records(&records, &criteria);
            if matched.is_empty() && !cli.json {
                eprintln!("No records match");
                return Ok(ExitCode::FAILURE);
            }
            print_records(&matched, cli.json);
        }
        Commands::Search { file, query, label, key, field_label, pick } => {
            let label_path = FieldPath::parse(&label);
            let key_path = FieldPath::parse(&key);
            let records = keyed_records(load_records(&file)?, &key_path);
            let listeners = DismissListeners::new();
            let json = cli.json;

            let mut dropdown = Dropdown::new(
                &records,
                |r| option_value(r, &label_path).unwrap_or_default(),
                |r| option_value(r, &key_path).unwrap_or_default(),
                &listeners,
            )
            .field_label(field_label)
            .empty_state(config.empty_state())
            .on_change(move |key| {
                if json {
                    println!("{}", serde_json::json!({ "selected": key }));
                } else {
                    println!("selected: {key}");
                }
            });

            dropdown.input(query);
            let view = DropdownView::build(&dropdown);
            if json {
                print_json(&view);
            } else {
                print!("{view}");
            }

            if let Some(pick) = pick {
                dropdown.choose(pick.as_str());
                if dropdown.state().selected_key.as_deref() != Some(pick.as_str()) {
                    eprintln!("'{pick}' is not one of the options");
                    return Ok(ExitCode::FAILURE);
                }
            } else if view.rows.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Sort { file, field, desc } => {
            let records = load_records(&file)?;
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let sorted = sort_records(&records, &FieldPath::parse(&field), direction);
            print_records(&sorted, cli.json);
        }
        Commands::Panel { file, columns, criteria } => {
            let records = load_records(&file)?;
            let committed = parse_criteria(&criteria)?;
            let listeners = DismissListeners::new();
            let columns: Vec<Column> = columns.iter().map(|c| parse_column(c)).collect();

            let mut panel = FilterPanel::new(columns, &records, committed, &listeners)
                .panel_width(config.panel_width);
            // Zero-size trigger at x = panel width, so the panel anchors at the origin.
            panel.toggle(Rect::new(config.panel_width, 0.0, 0.0, 0.0), ScrollOffset::default());

            let view = PanelView::build(&panel);
            if cli.json {
                print_json(&view);
            } else {
                print!("{view}");
                eprintln!(
                    "\n{} of {} records pass the committed filters",
                    panel.filtered_data().len(),
                    records.len()
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("facetkit=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
