//! Subcommand bodies: fetch, derive, print, export

use anyhow::{Context, Result};
use hydro_api::{normalize_records, HydroClient, TimeseriesQuery};
use hydro_core::{
    aggregate, summarize, AggregatedPoint, FdcPoint, Granularity, Parameter, Summary,
};
use hydro_session::SeriesView;
use std::sync::Arc;
use tracing::info;

pub async fn run_stations(client: &HydroClient) -> Result<()> {
    let stations = client.stations().await.context("Failed to list stations")?;

    println!("{:<6} {:<10} NAME", "ID", "CODE");
    for s in &stations {
        println!("{:<6} {:<10} {}", s.station_id, s.station_code, s.station_name);
    }
    info!(count = stations.len(), "stations listed");
    Ok(())
}

pub async fn run_catalog(client: &HydroClient, station_id: i64) -> Result<()> {
    let catalog = client
        .series_catalog(station_id)
        .await
        .context("Failed to fetch series catalog")?;

    println!(
        "{:<8} {:<10} {:<10} {:<12} {:<12} SCENARIO",
        "TS_ID", "SOURCE", "STEP", "FROM", "TO"
    );
    for row in &catalog {
        println!(
            "{:<8} {:<10} {:<10} {:<12} {:<12} {}",
            row.ts_id,
            row.source_type,
            row.time_step,
            fmt_date(row.dt_min),
            fmt_date(row.dt_max),
            row.scenario_name
        );
    }
    Ok(())
}

pub async fn run_series(
    client: HydroClient,
    query: &TimeseriesQuery,
    csv_path: Option<&str>,
) -> Result<()> {
    let view = SeriesView::new(Arc::new(client));
    let load = view
        .load(query)
        .await
        .context("Failed to load series")?
        .expect("single CLI load cannot be superseded");

    println!("{:<12} VALUE", "PERIOD");
    for point in &load.points {
        println!(
            "{:<12} {:.3}",
            point.period_start.format("%Y-%m-%d").to_string(),
            point.value
        );
    }
    print_summary(load.kpis.as_ref());

    if let Some(path) = csv_path {
        write_points_csv(path, &load.points)?;
        info!(path, rows = load.points.len(), "aggregated points exported");
    }
    Ok(())
}

pub async fn run_fdc(
    client: HydroClient,
    query: &TimeseriesQuery,
    csv_path: Option<&str>,
) -> Result<()> {
    let view = SeriesView::new(Arc::new(client));
    let load = view
        .load(query)
        .await
        .context("Failed to load series")?
        .expect("single CLI load cannot be superseded");

    println!("{:<14} VALUE", "EXCEEDANCE_%");
    for point in &load.fdc {
        println!("{:<14.2} {:.3}", point.exceedance, point.value);
    }

    let flows = load.flows;
    println!();
    println!("Q5  = {}", fmt_flow(flows.q5));
    println!("Q50 = {}", fmt_flow(flows.q50));
    println!("Q95 = {}", fmt_flow(flows.q95));

    if let Some(path) = csv_path {
        write_fdc_csv(path, &load.fdc)?;
        info!(path, rows = load.fdc.len(), "flow-duration curve exported");
    }
    Ok(())
}

pub async fn run_quality(
    client: &HydroClient,
    station_code: &str,
    parameter: Parameter,
    granularity: Granularity,
) -> Result<()> {
    let rows = client
        .quality_records(station_code)
        .await
        .context("Failed to fetch quality rows")?;
    let series = normalize_records(&rows, parameter);
    let points = aggregate(&series, granularity);

    println!("{:<12} VALUE", "PERIOD");
    for point in &points {
        println!(
            "{:<12} {:.3}",
            point.period_start.format("%Y-%m-%d").to_string(),
            point.value
        );
    }
    print_summary(summarize(&series).as_ref());
    Ok(())
}

fn print_summary(kpis: Option<&Summary>) {
    println!();
    match kpis {
        Some(s) => println!(
            "min={:.3} max={:.3} mean={:.3} (n={})",
            s.min, s.max, s.mean, s.count
        ),
        None => println!("no data for this period"),
    }
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

fn fmt_flow(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.3}"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn write_points_csv(path: &str, points: &[AggregatedPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {path}"))?;

    writer.write_record(["period_start", "value"])?;
    for point in points {
        writer.write_record([
            point.period_start.format("%Y-%m-%d").to_string(),
            format!("{}", point.value),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_fdc_csv(path: &str, fdc: &[FdcPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {path}"))?;

    writer.write_record(["exceedance_pct", "value"])?;
    for point in fdc {
        writer.write_record([format!("{}", point.exceedance), format!("{}", point.value)])?;
    }
    writer.flush()?;
    Ok(())
}
