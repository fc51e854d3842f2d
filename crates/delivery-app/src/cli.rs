//! Command-line front end for the dashboard core.
//!
//! The CLI stands in for the interactive shell during development and in
//! scripts: it takes a CSV export of the schedule grid (the binary workbook
//! decoder is a desktop-only collaborator), builds the canonical record set
//! and prints the per-day dashboard. Lives in the library crate so the
//! binary stays a thin wrapper.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use delivery_model::{DeliveryStatus, FilterState};
use delivery_import::{build_records, Cell, SheetGrid};
use delivery_engine::dashboard;

use crate::export;

#[derive(Parser)]
#[command(
    name = "delivery-board",
    about = "Summarize a container delivery schedule grouped by delivery day and carrier."
)]
pub struct Args {
    /// Schedule grid as CSV (one row per spreadsheet row, headers included).
    schedule: PathBuf,

    /// Sheet name to record as the data source (defaults to the file stem).
    #[arg(long)]
    sheet_name: Option<String>,

    /// Only show records in this status (e.g. "ENTREGUE", "A CAMINHO").
    #[arg(long)]
    status: Option<String>,

    /// Only show records containing this text in any field.
    #[arg(long)]
    search: Option<String>,

    /// Write the (unfiltered) record set to this CSV file.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

pub fn run(args: Args) -> Result<()> {
    let sheet_name = args
        .sheet_name
        .clone()
        .or_else(|| {
            args.schedule
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "schedule".to_string());

    let grid = read_grid(&args.schedule, &sheet_name)
        .with_context(|| format!("failed to read {}", args.schedule.display()))?;
    let records = build_records(&grid)
        .with_context(|| format!("failed to load schedule from {:?}", sheet_name))?;

    let mut filter = FilterState::default();
    if let Some(raw) = &args.status {
        match DeliveryStatus::recognize(raw) {
            Some(status) => filter.status = Some(status),
            None => bail!(
                "unknown status {raw:?}; expected one of: {}",
                DeliveryStatus::ALL.map(|s| s.token()).join(", ")
            ),
        }
    }
    if let Some(query) = &args.search {
        filter.query = query.clone();
    }

    let view = dashboard(&records, &filter);
    print_dashboard(&sheet_name, &view);

    if let Some(path) = &args.export {
        let out = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let rows = export::write_csv(&records, out)?;
        println!("\nwrote {rows} records to {}", path.display());
    }

    Ok(())
}

/// Read a CSV file as a raw sheet grid. Every cell arrives as text; serial
/// dates survive as digit strings and normalize downstream.
fn read_grid(path: &PathBuf, sheet_name: &str) -> Result<SheetGrid> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(SheetGrid::new(sheet_name, rows))
}

fn print_dashboard(sheet_name: &str, view: &delivery_engine::DashboardView<'_>) {
    let totals = view.totals;
    println!("{sheet_name}: {} scheduled", totals.total);
    println!(
        "  delivered {} | in transit {} | postponed {} | pending {} | canceled {}",
        totals.delivered,
        totals.in_transit,
        totals.postponed,
        totals.pending(),
        totals.canceled
    );

    for group in &view.groups {
        println!(
            "\n{} - {} of {} delivered",
            group.key, group.counts.delivered, group.counts.total
        );
        for carrier in &group.carriers {
            println!(
                "  {:<28} {:>3}/{:<3} ({:.0}%)",
                carrier.carrier,
                carrier.delivered,
                carrier.total,
                carrier.delivered_ratio() * 100.0
            );
        }
        for record in &group.records {
            println!(
                "    {:<14} {:<14} {:<20} {}",
                record.container_id,
                record.bill_of_lading,
                record.carrier,
                record.status.token()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCHEDULE: &str = "\
DELIVERY AT BYD,CONTAINER,BL,STATUS,TRANSPORTATION COMPANY
13/05/2024,MSKU1,BL1,ENTREGUE,Maersk
13/05/2024,TCLU2,BL2,,MSC
,,,,
";

    fn args(schedule: std::path::PathBuf) -> Args {
        Args {
            schedule,
            sheet_name: None,
            status: None,
            search: None,
            export: None,
        }
    }

    #[test]
    fn csv_input_round_trips_through_the_exporter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("monday.csv");
        std::fs::write(&input, SCHEDULE).unwrap();
        let output = dir.path().join("out.csv");

        let mut args = args(input);
        args.export = Some(output.clone());
        run(args).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("DELIVERY AT BYD,CONTAINER,BL"));
        // The all-empty trailer row was dropped on import.
        assert_eq!(lines.count(), 2);
        assert!(text.contains("MSKU1"));
    }

    #[test]
    fn unknown_status_names_the_accepted_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("monday.csv");
        std::fs::write(&input, SCHEDULE).unwrap();

        let mut args = args(input);
        args.status = Some("SHIPPED".into());
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("PENDENTE"));
    }

    #[test]
    fn missing_input_reports_the_path() {
        let err = run(args("/no/such/schedule.csv".into())).unwrap_err();
        assert!(err.to_string().contains("schedule.csv"));
    }
}
