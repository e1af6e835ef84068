mod common;

use common::dataset_dir;
use regex::Regex;
use rstest::rstest;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_liftforge"))
        .arg("--data")
        .arg(dataset_dir())
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    if !output.status.success() {
        println!("STDERR:\n{}", String::from_utf8_lossy(&output.stderr));
        panic!("command failed");
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[rstest]
#[case(1, 0)]
#[case(2, 0)]
#[case(3, 0)]
#[case(4, 0)]
#[case(5, 0)]
#[case(6, 0)]
#[case(7, 1)]
fn test_cli_plan_for_every_day_count(#[case] days: u8, #[case] rest_days: usize) {
    let out = stdout(&run(&["plan", "--days", &days.to_string(), "--json"]));
    let plan: serde_json::Value = serde_json::from_str(&out).unwrap();

    let day_list = plan["days"].as_array().unwrap();
    assert_eq!(day_list.len(), days as usize);
    let rests = day_list
        .iter()
        .filter(|d| d["exercises"].as_array().unwrap().is_empty())
        .count();
    assert_eq!(rests, rest_days);
    assert_eq!(plan["training_days"], days);
}

#[test]
fn test_cli_summary_table_lists_every_day() {
    let out = stdout(&run(&["plan", "--days", "3"]));

    assert!(out.contains("WEEKLY PLAN (Push/Pull/Legs)"));
    let day_row = Regex::new(r"Day [123]").unwrap();
    assert_eq!(day_row.find_iter(&out).count(), 3);
    let total = Regex::new(r"Total: -?\d+\.\d{2} over 15 exercises").unwrap();
    assert!(total.is_match(&out), "missing total line in:\n{}", out);
}

#[test]
fn test_cli_detailed_plan_with_breakdown() {
    let out = stdout(&run(&["plan", "--days", "1", "--detailed", "--debug"]));

    assert!(out.contains("Day 1:"));
    assert!(out.contains("Daily Total Score:"));
    assert!(out.contains("Week"));
}

#[test]
fn test_cli_preferences_and_exclusions() {
    let out = stdout(&run(&[
        "plan",
        "--days",
        "5",
        "--prefer",
        "chest=2.5",
        "--exclude",
        "1,2",
        "--json",
    ]));
    let plan: serde_json::Value = serde_json::from_str(&out).unwrap();

    for day in plan["days"].as_array().unwrap() {
        for ex in day["exercises"].as_array().unwrap() {
            let id = ex["id"].as_u64().unwrap();
            assert!(id != 1 && id != 2);
        }
    }
}

#[test]
fn test_cli_scoring_flags_override_dataset() {
    let out = stdout(&run(&[
        "plan",
        "--days",
        "1",
        "--exercises-per-day",
        "3",
        "--json",
    ]));
    let plan: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(plan["days"][0]["exercises"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_rejects_out_of_range_days() {
    let output = run(&["plan", "--days", "8"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_rejects_malformed_preference() {
    let output = run(&["plan", "--prefer", "chest"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("KEY=VALUE"));
}

#[test]
fn test_cli_show_exercise() {
    let out = stdout(&run(&["show", "--id", "1"]));
    assert!(out.contains("Barbell Bench Press"));
    assert!(out.contains("horizontal_press"));

    let json = stdout(&run(&["show", "--id", "27", "--json"]));
    let ex: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(ex["pk"], 27);
}

#[test]
fn test_cli_show_unknown_exercise_fails() {
    let output = run(&["show", "--id", "999"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("999"));
}

#[test]
fn test_cli_catalog_summary() {
    let out = stdout(&run(&["show"]));
    let header = Regex::new(r"Catalog: 27 exercises, \d+ muscle groups, 13 movement families").unwrap();
    assert!(header.is_match(&out), "unexpected summary:\n{}", out);
}

#[test]
fn test_cli_compare_strategies() {
    let out = stdout(&run(&["compare", "--days", "3", "--sample-sizes", "5,7"]));

    assert!(out.contains("STRATEGY COMPARISON"));
    assert!(out.contains("Greedy + 2-opt"));
    assert!(out.contains("GREEDY vs EXHAUSTIVE"));
}

#[test]
fn test_cli_missing_dataset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_liftforge"))
        .args(["--data", "/nonexistent/liftforge-data", "show"])
        .output()
        .expect("Failed to execute binary");
    assert!(!output.status.success());
}

#[test]
fn test_cli_request_file_drives_the_plan() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("request.json");
    std::fs::write(
        &path,
        r#"{"training_days": 7, "muscle_tiers": {"leg": 5}, "excluded_exercises": [15]}"#,
    )
    .unwrap();

    let out = stdout(&run(&["plan", "--request", path.to_str().unwrap(), "--json"]));
    let plan: serde_json::Value = serde_json::from_str(&out).unwrap();
    let days = plan["days"].as_array().unwrap();

    assert_eq!(days.len(), 7);
    // push / legs / pull rotation, closing on rest
    assert_eq!(days[1]["muscle_groups"], serde_json::json!(["legs"]));
    assert_eq!(days[2]["muscle_groups"], serde_json::json!(["back", "bicep"]));
    assert!(days[6]["exercises"].as_array().unwrap().is_empty());
    assert!(!out.contains("\"id\": 15,"));
}

#[test]
fn test_cli_malformed_request_file_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("request.json");
    std::fs::write(&path, "{ training_days: seven").unwrap();

    let output = run(&["plan", "--request", path.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[rstest]
#[case(r#"{"training_days": 7}"#, "WEEKLY PLAN (Push/Legs/Pull x2 + Rest)")]
#[case(r#"{"training_days": 3}"#, "WEEKLY PLAN (Push/Pull/Legs)")]
fn test_cli_report_names_the_split_it_ran(#[case] request: &str, #[case] header: &str) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("request.json");
    std::fs::write(&path, request).unwrap();

    let out = stdout(&run(&["plan", "--request", path.to_str().unwrap()]));
    assert!(out.contains(header), "missing '{}' in:\n{}", header, out);
}

#[test]
fn test_cli_seven_day_flag_keeps_dataset_template() {
    let out = stdout(&run(&["plan", "--days", "7"]));
    assert!(out.contains("WEEKLY PLAN (Push/Pull/Legs x2 + Rest)"));
}
