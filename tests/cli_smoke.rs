use predicates::str::{contains, diff};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

const STATIONS: &str = r#"
[cars]
count = 6
arrival_time_min = "0ms"
arrival_time_max = "1ms"

[[stations]]
name = "gas"
count = 2
serve_time_min = "0ms"
serve_time_max = "1ms"

[[stations]]
name = "diesel"
count = 1
serve_time_min = "1ms"
serve_time_max = "1ms"

[[stations]]
name = "lpg"
count = 1
serve_time_min = "0ms"
serve_time_max = "2ms"

[[stations]]
name = "electric"
count = 1
serve_time_min = "0ms"
serve_time_max = "0ms"

[registers]
count = 2
handle_time_min = "0ms"
handle_time_max = "1ms"
"#;

fn write_temp_config(label: &str, contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("fuel-sim-{}-{}.toml", label, nanos));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

#[test]
fn summary_round_robin_is_stable() {
    let path = write_temp_config("summary-rr", STATIONS);
    let expected = concat!(
        "Metadata:\n",
        "seed: 42\n",
        "routing: round-robin\n",
        "cars: 6\n",
        "Summary:\n",
        "gas: 2 cars\n",
        "diesel: 2 cars\n",
        "lpg: 1 cars\n",
        "electric: 1 cars\n",
        "registers: 6 cars\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args([
        "run",
        "--config",
        path.to_str().unwrap(),
        "--routing",
        "round-robin",
        "--seed",
        "42",
        "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn summary_with_no_cars_reports_zeroes() {
    let path = write_temp_config("summary-empty", STATIONS);
    let expected = concat!(
        "Metadata:\n",
        "seed: 1\n",
        "routing: uniform\n",
        "cars: 0\n",
        "Summary:\n",
        "gas: 0 cars\n",
        "diesel: 0 cars\n",
        "lpg: 0 cars\n",
        "electric: 0 cars\n",
        "registers: 0 cars\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args([
        "run",
        "--config",
        path.to_str().unwrap(),
        "--cars",
        "0",
        "--seed",
        "1",
        "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn uniform_summary_repeats_for_a_seed() {
    let path = write_temp_config("summary-uniform", STATIONS);
    let run = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
        cmd.args([
            "run",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "7",
            "--format",
            "summary",
        ]);
        let output = cmd.output().expect("binary should run");
        assert!(output.status.success());
        String::from_utf8(output.stdout).expect("utf-8 output")
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first.ends_with("registers: 6 cars\n"), "{}", first);
}

#[test]
fn human_report_lists_every_stage() {
    let path = write_temp_config("human", STATIONS);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args(["run", "--config", path.to_str().unwrap(), "--routing", "round-robin"]);
    cmd.assert()
        .success()
        .stdout(contains("Stations:\ngas:\n  servers: 2\n  total_cars: 2\n"))
        .stdout(contains("electric:\n  servers: 1\n  total_cars: 1\n  total_time: 0s\n"))
        .stdout(contains("Registers:\n  servers: 2\n  total_cars: 6\n"));
}

#[test]
fn json_report_parses() {
    let path = write_temp_config("json", STATIONS);
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("fuel-sim");
    cmd.args([
        "run",
        "--config",
        path.to_str().unwrap(),
        "--routing",
        "round-robin",
        "--seed",
        "5",
        "--format",
        "json",
    ]);
    let output = cmd.output().expect("binary should run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["seed"], 5);
    assert_eq!(value["stations"][1]["name"], "diesel");
    assert_eq!(value["stations"][1]["total_cars"], 2);
    assert_eq!(value["stations"][1]["avg_queue_time_ms"], 1.0);
    assert_eq!(value["registers"]["total_cars"], 6);
}
