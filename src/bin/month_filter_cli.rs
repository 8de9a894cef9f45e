//! Command-line front end: filter one sheet by month and write the CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use month_filter::data::export::{csv_file_name, save_csv};
use month_filter::data::loader::sheet_names;
use month_filter::data::model::Month;
use month_filter::pipeline::{run, FilterOutcome, FilterRequest};

#[derive(Parser)]
#[command(name = "month-filter-cli")]
#[command(about = "Keep spreadsheet rows whose Birth, Death or Other date falls in a month")]
#[command(version)]
struct Cli {
    /// Spreadsheet to read (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv)
    file: PathBuf,

    /// Sheet to filter. Defaults to the first sheet.
    #[arg(short, long)]
    sheet: Option<String>,

    /// Month to keep (1-12)
    #[arg(
        short,
        long,
        required_unless_present = "list_sheets",
        value_parser = clap::value_parser!(u32).range(1..=12)
    )]
    month: Option<u32>,

    /// Output file. Defaults to filtered_data_<month>.csv in --output-dir.
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory for the default output file name.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Print the sheet names and exit
    #[arg(long)]
    list_sheets: bool,

    /// Log verbosity (off, error, warn, info, debug, trace); RUST_LOG wins
    #[arg(long, default_value = "warn")]
    log_level: log::LevelFilter,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.to_string()),
    )
    .init();

    let sheets = sheet_names(&cli.file)?;
    if cli.list_sheets {
        for name in &sheets {
            println!("{name}");
        }
        return Ok(());
    }

    let sheet = match cli.sheet {
        Some(s) => s,
        None => sheets
            .first()
            .cloned()
            .with_context(|| format!("{} contains no sheets", cli.file.display()))?,
    };
    let month = Month::try_from(cli.month.context("--month is required")?)?;

    let request = FilterRequest {
        path: cli.file,
        sheet,
        month,
    };

    match run(&request)? {
        FilterOutcome::Found(table) => {
            let out = cli
                .output
                .unwrap_or_else(|| cli.output_dir.join(csv_file_name(month)));
            save_csv(&table, &out)?;
            println!(
                "Found {} records for month {month}; wrote {}",
                table.len(),
                out.display()
            );
        }
        FilterOutcome::NoRecords => {
            println!("No records found for month {month}.");
        }
    }
    Ok(())
}
