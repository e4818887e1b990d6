use predicates::str::contains;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(label: &str, contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("fuel-errors-{}-{}.{}", label, nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

fn config_with(stations: &str, registers: &str) -> String {
    format!(
        "[cars]\ncount = 2\narrival_time_min = \"0ms\"\narrival_time_max = \"0ms\"\n{}\n{}\n",
        stations, registers
    )
}

const GAS: &str =
    "[[stations]]\nname = \"gas\"\ncount = 1\nserve_time_min = \"1ms\"\nserve_time_max = \"1ms\"\n";
const REGISTERS: &str =
    "[registers]\ncount = 1\nhandle_time_min = \"0ms\"\nhandle_time_max = \"0ms\"\n";

fn run_config(path: &std::path::Path) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args(["run", "--config", "/nonexistent/fuel.toml"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to read config '/nonexistent/fuel.toml'"));
}

#[test]
fn unsupported_extension_fails() {
    let path = write_temp_config("yaml", "cars: {}", "yaml");
    run_config(&path)
        .failure()
        .stderr(contains("Error: unsupported config format 'yaml'"));
}

#[test]
fn inverted_range_fails() {
    let stations =
        "[[stations]]\nname = \"lpg\"\ncount = 1\nserve_time_min = \"5ms\"\nserve_time_max = \"1ms\"\n";
    let path = write_temp_config("range", &config_with(stations, REGISTERS), "toml");
    run_config(&path).failure().stderr(contains(
        "Error: invalid station 'lpg' serve time range: min 5ms is greater than max 1ms",
    ));
}

#[test]
fn zero_registers_fail() {
    let registers =
        "[registers]\ncount = 0\nhandle_time_min = \"0ms\"\nhandle_time_max = \"0ms\"\n";
    let path = write_temp_config("registers", &config_with(GAS, registers), "toml");
    run_config(&path)
        .failure()
        .stderr(contains("Error: registers must have at least one server"));
}

#[test]
fn duplicate_station_names_fail() {
    let stations = format!("{}\n{}", GAS, GAS);
    let path = write_temp_config("duplicate", &config_with(&stations, REGISTERS), "toml");
    run_config(&path)
        .failure()
        .stderr(contains("Error: duplicate station name 'gas'"));
}

#[test]
fn malformed_duration_fails() {
    let stations =
        "[[stations]]\nname = \"gas\"\ncount = 1\nserve_time_min = \"quick\"\nserve_time_max = \"1ms\"\n";
    let path = write_temp_config("duration", &config_with(stations, REGISTERS), "toml");
    run_config(&path)
        .failure()
        .stderr(contains("Error: failed to parse TOML"))
        .stderr(contains("invalid duration 'quick'"));
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.arg("simulate");
    cmd.assert().failure().stderr(contains("Error:"));
}

#[test]
fn oversized_cars_override_fails() {
    let path = write_temp_config("cars", &config_with(GAS, REGISTERS), "toml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args([
        "run",
        "--config",
        path.to_str().unwrap(),
        "--cars",
        "500000000",
    ]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: cars must be at most 1000000 (got 500000000)"));
}

#[test]
fn station_named_like_registers_fails() {
    let stations =
        "[[stations]]\nname = \"registers\"\ncount = 1\nserve_time_min = \"0ms\"\nserve_time_max = \"0ms\"\n";
    let path = write_temp_config("reserved", &config_with(stations, REGISTERS), "toml");
    run_config(&path).failure().stderr(contains(
        "Error: station name 'registers' is reserved for the register stage",
    ));
}
