//! examgrid CLI - render a JSON row file as a sortable, paginated grid.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use examgrid::prelude::*;
use examgrid::{GridError, Result};
use log::{debug, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

/// Render a JSON array of objects as a text grid.
#[derive(Parser, Debug)]
#[command(name = "examgrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of row objects
    rows: PathBuf,

    /// Grid config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated column keys (default: every key of the first row)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Column to sort by
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Rows per page, overriding the config
    #[arg(long)]
    page_size: Option<usize>,

    /// Show all rows on one page
    #[arg(long)]
    no_paginate: bool,

    /// Comma-separated keys of selected rows; enables selection
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Show checkboxes even with nothing selected
    #[arg(long)]
    selectable: bool,

    /// Render the loading placeholder instead of the rows
    #[arg(long)]
    loading: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let result = match &cli.log_file {
        Some(path) => WriteLogger::init(cli.log_level, Config::default(), File::create(path)?),
        None => TermLogger::init(
            cli.log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
    };
    // A logger already installed is not fatal.
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {}", e);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<String> {
    let text = std::fs::read_to_string(&cli.rows)?;
    let rows = Record::parse_rows(&text)?;
    info!("Loaded {} rows from {}", rows.len(), cli.rows.display());

    let mut config = match &cli.config {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::default(),
    };
    if let Some(size) = cli.page_size {
        config = config.page_size(size);
    }
    if cli.no_paginate {
        config = config.paginated(false);
    }
    if cli.selectable || !cli.select.is_empty() {
        config = config.selectable(true);
    }
    config.validate()?;

    let keys = column_keys(cli, &rows)?;
    let columns = keys.iter().map(|key| column_for(key, &rows)).collect();
    let mut grid = Grid::new(columns, config);

    if let Some(sort) = &cli.sort {
        if !keys.contains(sort) {
            return Err(GridError::UnknownColumn(sort.clone()));
        }
        let state = if cli.desc {
            SortState::desc(sort.as_str())
        } else {
            SortState::asc(sort.as_str())
        };
        grid.sync_sort(state);
    }

    if !cli.select.is_empty() {
        grid.sync_selection(cli.select.iter().map(|k| RowKey::parse(k.trim())));
    }

    let page = grid.go_to_page(cli.page, &rows);
    debug!("Showing page {}", page);

    Ok(render_text(&grid.view(&rows, cli.loading)))
}

/// Requested column keys, checked against the rows, or every key of the
/// first row.
fn column_keys(cli: &Cli, rows: &[Record]) -> Result<Vec<String>> {
    if cli.columns.is_empty() {
        return Ok(rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default());
    }

    let keys: Vec<String> = cli.columns.iter().map(|k| k.trim().to_string()).collect();
    if rows.is_empty() {
        return Ok(keys);
    }
    if let Some(unknown) = keys
        .iter()
        .find(|key| rows.iter().all(|row| row.get(key.as_str()).is_none()))
    {
        return Err(GridError::UnknownColumn(unknown.clone()));
    }
    Ok(keys)
}

/// Numeric columns are end-aligned.
fn column_for(key: &str, rows: &[Record]) -> Column<Record> {
    let numeric = rows
        .iter()
        .filter_map(|row| row.get(key))
        .find(|value| !value.is_null())
        .is_some_and(|value| value.as_f64().is_some());

    let column = Column::new(key, key);
    if numeric {
        column.align(Alignment::End)
    } else {
        column
    }
}
