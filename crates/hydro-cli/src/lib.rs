//! Command implementations for the hydro CLI.
//!
//! Provides subcommands for browsing stations and series catalogs and for
//! deriving aggregates, flow-duration curves, and KPI summaries from the
//! backend's timeseries endpoints.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use hydro_api::{HydroClient, TimeseriesQuery};
use hydro_config::AppConfig;
use hydro_core::{Granularity, Parameter};
use std::time::Duration;

pub mod commands;

#[derive(Subcommand)]
pub enum Command {
    /// List the basin's monitoring stations
    Stations,

    /// List the scenario/series catalog of one station
    Catalog {
        /// Station id as listed by `stations`
        #[arg(short, long)]
        station_id: i64,
    },

    /// Fetch a series and print its aggregated points with a KPI summary
    Series {
        #[command(flatten)]
        selection: SeriesSelection,

        /// Aggregation granularity: daily or monthly
        #[arg(short, long, default_value = "daily")]
        granularity: String,

        /// Write the aggregated points to a CSV file
        #[arg(long)]
        csv: Option<String>,
    },

    /// Derive the flow-duration curve of a series with Q5/Q50/Q95 readout
    Fdc {
        #[command(flatten)]
        selection: SeriesSelection,

        /// Write the curve to a CSV file
        #[arg(long)]
        csv: Option<String>,
    },

    /// Print a station's water-quality series for one chemistry parameter
    Quality {
        /// Station code as listed by `stations`
        #[arg(short, long)]
        station_code: String,

        /// Chemistry parameter: nitrate or phosphate
        #[arg(short, long, default_value = "nitrate")]
        parameter: String,

        /// Aggregation granularity: daily or monthly
        #[arg(short, long, default_value = "monthly")]
        granularity: String,
    },
}

#[derive(clap::Args)]
pub struct SeriesSelection {
    /// Time series id as listed by `catalog`
    #[arg(short, long)]
    ts_id: i64,

    /// Measured parameter: discharge, temperature, precipitation,
    /// nitrate, or phosphate
    #[arg(short, long, default_value = "discharge")]
    parameter: String,

    /// Range start (YYYY-MM-DD)
    #[arg(long)]
    from: NaiveDate,

    /// Range end (YYYY-MM-DD)
    #[arg(long)]
    to: NaiveDate,
}

impl SeriesSelection {
    fn query(&self, granularity: Granularity) -> Result<TimeseriesQuery> {
        Ok(TimeseriesQuery {
            ts_id: self.ts_id,
            parameter: parse_parameter(&self.parameter)?,
            granularity,
            date_start: self.from,
            date_end: self.to,
        })
    }
}

fn parse_parameter(s: &str) -> Result<Parameter> {
    Ok(match s {
        "discharge" => Parameter::Discharge,
        "temperature" => Parameter::Temperature,
        "precipitation" => Parameter::Precipitation,
        "nitrate" => Parameter::Nitrate,
        "phosphate" => Parameter::Phosphate,
        other => bail!("unknown parameter: {other}"),
    })
}

fn parse_granularity(s: &str) -> Result<Granularity> {
    Ok(match s {
        "daily" => Granularity::Daily,
        "monthly" => Granularity::Monthly,
        other => bail!("unknown granularity: {other} (expected daily or monthly)"),
    })
}

pub async fn run(command: Command, cfg: &AppConfig) -> Result<()> {
    let client = HydroClient::new(
        &cfg.api_base_url(),
        Duration::from_secs(cfg.request_timeout_secs()),
    )
    .context("Failed to create API client")?;

    match command {
        Command::Stations => commands::run_stations(&client).await,
        Command::Catalog { station_id } => commands::run_catalog(&client, station_id).await,
        Command::Series {
            selection,
            granularity,
            csv,
        } => {
            let query = selection.query(parse_granularity(&granularity)?)?;
            commands::run_series(client, &query, csv.as_deref()).await
        }
        Command::Fdc { selection, csv } => {
            let query = selection.query(Granularity::Daily)?;
            commands::run_fdc(client, &query, csv.as_deref()).await
        }
        Command::Quality {
            station_code,
            parameter,
            granularity,
        } => {
            commands::run_quality(
                &client,
                &station_code,
                parse_parameter(&parameter)?,
                parse_granularity(&granularity)?,
            )
            .await
        }
    }
}
