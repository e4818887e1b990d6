use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

use crate::models::SimConfig;
use crate::state::{RunMetadata, SimulationResult, StageSummary};

pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> String;
}

/// Full report: metadata, then every station and the registers with their
/// timing statistics.
pub struct HumanFormatter;

/// Served counts only. Stable for a given seed.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_metadata(&mut out, &result.metadata);
        let _ = writeln!(out, "elapsed: {}", human(result.metadata.elapsed));
        out.push_str("Stations:\n");
        for station in &result.stations {
            let _ = writeln!(out, "{}:", station.name);
            write_stage(&mut out, station);
        }
        out.push_str("Registers:\n");
        write_stage(&mut out, &result.register);
        out
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_metadata(&mut out, &result.metadata);
        out.push_str("Summary:\n");
        for summary in result.stations.iter().chain(std::iter::once(&result.register)) {
            let _ = writeln!(out, "{}: {} cars", summary.name, summary.stats.served);
        }
        out
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let report = JsonReport {
            seed: result.metadata.seed,
            routing: result.metadata.routing.to_string(),
            cars: result.metadata.cars,
            elapsed_ms: millis(result.metadata.elapsed),
            stations: result.stations.iter().map(JsonStage::from).collect(),
            registers: JsonStage::from(&result.register),
        };
        // Plain data with string keys; serialization cannot fail.
        let mut out = serde_json::to_string_pretty(&report).unwrap_or_default();
        out.push('\n');
        out
    }
}

pub fn write_config(config: &SimConfig) -> String {
    let mut out = String::new();
    let seed = config
        .seed
        .map(|seed| seed.to_string())
        .unwrap_or_else(|| "random".to_string());
    let _ = writeln!(out, "Seed: {}", seed);
    let _ = writeln!(out, "Routing: {}", config.routing);
    let _ = writeln!(
        out,
        "Cars: {} (arrival: {}..{})",
        config.cars.count,
        human(config.cars.arrival_time_min),
        human(config.cars.arrival_time_max)
    );
    out.push_str("Stations:\n");
    for station in &config.stations {
        let _ = writeln!(
            out,
            "- {} (servers: {}, serve: {}..{})",
            station.name,
            station.count,
            human(station.serve_time_min),
            human(station.serve_time_max)
        );
    }
    let _ = writeln!(
        out,
        "Registers: {} (handle: {}..{})",
        config.registers.count,
        human(config.registers.handle_time_min),
        human(config.registers.handle_time_max)
    );
    out
}

fn write_metadata(out: &mut String, metadata: &RunMetadata) {
    out.push_str("Metadata:\n");
    let _ = writeln!(out, "seed: {}", metadata.seed);
    let _ = writeln!(out, "routing: {}", metadata.routing);
    let _ = writeln!(out, "cars: {}", metadata.cars);
}

fn write_stage(out: &mut String, summary: &StageSummary) {
    let stats = &summary.stats;
    let _ = writeln!(out, "  servers: {}", summary.servers);
    let _ = writeln!(out, "  total_cars: {}", stats.served);
    let _ = writeln!(out, "  total_time: {}", human(stats.total_time));
    let _ = writeln!(out, "  avg_queue_time: {}", human(stats.average_wait()));
    let _ = writeln!(out, "  max_queue_time: {}", human(stats.max_wait));
    let _ = writeln!(out, "  avg_queue_delay: {}", human(stats.average_queue_delay()));
    let _ = writeln!(out, "  max_queue_delay: {}", human(stats.max_queue_delay));
}

fn human(value: Duration) -> String {
    humantime::format_duration(value).to_string()
}

fn millis(value: Duration) -> f64 {
    value.as_nanos() as f64 / 1_000_000.0
}

#[derive(Serialize)]
struct JsonReport {
    seed: u64,
    routing: String,
    cars: usize,
    elapsed_ms: f64,
    stations: Vec<JsonStage>,
    registers: JsonStage,
}

#[derive(Serialize)]
struct JsonStage {
    name: String,
    servers: usize,
    total_cars: u64,
    total_time_ms: f64,
    avg_queue_time_ms: f64,
    max_queue_time_ms: f64,
    avg_queue_delay_ms: f64,
    max_queue_delay_ms: f64,
}

impl From<&StageSummary> for JsonStage {
    fn from(summary: &StageSummary) -> Self {
        let stats = &summary.stats;
        Self {
            name: summary.name.clone(),
            servers: summary.servers,
            total_cars: stats.served,
            total_time_ms: millis(stats.total_time),
            avg_queue_time_ms: millis(stats.average_wait()),
            max_queue_time_ms: millis(stats.max_wait),
            avg_queue_delay_ms: millis(stats.average_queue_delay()),
            max_queue_delay_ms: millis(stats.max_queue_delay),
        }
    }
}
