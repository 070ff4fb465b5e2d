//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

struct Cli {
    home: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_routinely"))
            .args(args)
            .env("ROUTINELY_HOME", self.home.path())
            .env_remove("ROUTINELY_LOG")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }

    fn ok(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "{args:?} failed: {stderr}");
        stdout
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.ok(args)).expect("Failed to parse JSON output")
    }
}

#[test]
fn test_step_add_and_list() {
    let cli = Cli::new();
    let id = cli.ok(&["step", "add", "Drink water", "--duration", "5", "--icon", "💧"]);
    cli.ok(&["step", "add", "Stretch"]);

    let steps = cli.json(&["step", "list", "--json"]);
    let steps = steps.as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["id"].to_string(), id.trim());
    assert_eq!(steps[0]["duration"], 5);
    assert_eq!(steps[1]["duration"], 15);
    assert_eq!(steps[1]["icon"], "⏰");
}

#[test]
fn test_step_add_rejects_blank_name() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["step", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("must not be empty"));
}

#[test]
fn test_step_add_negative_duration_uses_default() {
    let cli = Cli::new();
    cli.ok(&["step", "add", "Tea", "--duration", "-5"]);
    let steps = cli.json(&["step", "list", "--json"]);
    assert_eq!(steps[0]["duration"], 15);
}

#[test]
fn test_step_toggle_swap_remove() {
    let cli = Cli::new();
    let a = cli.ok(&["step", "add", "A"]).trim().to_string();
    let b = cli.ok(&["step", "add", "B"]).trim().to_string();

    cli.ok(&["step", "toggle", &a]);
    cli.ok(&["step", "swap", &a, &b]);
    let steps = cli.json(&["step", "list", "--json"]);
    assert_eq!(steps[0]["name"], "B");
    assert_eq!(steps[1]["completed"], true);

    cli.ok(&["step", "remove", &a]);
    let steps = cli.json(&["step", "list", "--json"]);
    assert_eq!(steps.as_array().unwrap().len(), 1);
}

#[test]
fn test_template_apply_and_progress() {
    let cli = Cli::new();
    cli.ok(&["template", "apply", "health"]);
    let progress = cli.json(&["progress"]);
    assert_eq!(progress["total"], 5);
    assert_eq!(progress["completed"], 0);
    assert_eq!(progress["percent"], 0);
}

#[test]
fn test_template_unknown_fails() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["template", "apply", "yoga"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("template not found"));
}

#[test]
fn test_calendar_mark_and_streak() {
    let cli = Cli::new();
    cli.ok(&["calendar", "mark"]);
    assert_eq!(cli.ok(&["calendar", "streak"]).trim(), "1");

    let week = cli.json(&["calendar", "week", "--json"]);
    assert_eq!(week["completed_days"], 1);
    assert_eq!(week["days"].as_array().unwrap().len(), 7);

    cli.ok(&["calendar", "unmark"]);
    assert_eq!(cli.ok(&["calendar", "streak"]).trim(), "0");
}

#[test]
fn test_calendar_rejects_bad_date() {
    let cli = Cli::new();
    let (_, _, code) = cli.run(&["calendar", "mark", "2024-02-30"]);
    assert_eq!(code, 1);
}

#[test]
fn test_wakeup_set_and_share() {
    let cli = Cli::new();
    assert_eq!(cli.ok(&["wakeup", "show"]).trim(), "06:00");
    cli.ok(&["wakeup", "set", "05:30"]);
    cli.ok(&["step", "add", "Run", "-d", "30", "-i", "🏃"]);

    let text = cli.ok(&["data", "share"]);
    assert!(text.contains("🏃 Run (30min)"));
    assert!(text.contains("Wake-up: 05:30"));
}

#[test]
fn test_data_export_and_clear() {
    let cli = Cli::new();
    cli.ok(&["step", "add", "Tea"]);

    let export = cli.json(&["data", "export", "--stdout"]);
    assert_eq!(export["routines"][0]["name"], "Tea");
    assert!(export["exportedAt"].is_string());

    let (_, _, code) = cli.run(&["data", "clear"]);
    assert_eq!(code, 1);
    cli.ok(&["data", "clear", "--yes"]);
    let steps = cli.json(&["step", "list", "--json"]);
    assert!(steps.as_array().unwrap().is_empty());
}

#[test]
fn test_data_clear_restores_configured_wakeup() {
    let cli = Cli::new();
    cli.ok(&["config", "set", "planner.default_wakeup", "05:00"]);
    assert_eq!(cli.ok(&["wakeup", "show"]).trim(), "05:00");

    cli.ok(&["wakeup", "set", "07:30"]);
    cli.ok(&["data", "clear", "--yes"]);
    assert_eq!(cli.ok(&["wakeup", "show"]).trim(), "05:00");
}

#[test]
fn test_config_get_set() {
    let cli = Cli::new();
    assert_eq!(cli.ok(&["config", "get", "planner.default_duration_min"]).trim(), "15");
    cli.ok(&["config", "set", "planner.default_duration_min", "25"]);
    assert_eq!(cli.ok(&["config", "get", "planner.default_duration_min"]).trim(), "25");

    cli.ok(&["step", "add", "Read"]);
    let steps = cli.json(&["step", "list", "--json"]);
    assert_eq!(steps[0]["duration"], 25);

    let (_, _, code) = cli.run(&["config", "set", "planner.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_timer_run_completes_routine() {
    let cli = Cli::new();
    cli.ok(&["step", "add", "Water", "--duration", "1"]);
    cli.ok(&["step", "add", "Stretch", "--duration", "1"]);

    let stdout = cli.ok(&["timer", "run", "--tick-ms", "1"]);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("event line is JSON"))
        .collect();
    let kinds: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(kinds.iter().filter(|k| **k == "step_completed").count(), 2);
    assert_eq!(kinds.last(), Some(&"all_routines_complete"));

    let progress = cli.json(&["progress"]);
    assert_eq!(progress["percent"], 100);
}

#[test]
fn test_timer_run_once_stops_after_first_step() {
    let cli = Cli::new();
    cli.ok(&["step", "add", "Water", "--duration", "1"]);
    cli.ok(&["step", "add", "Stretch", "--duration", "1"]);

    cli.ok(&["timer", "run", "--once", "--tick-ms", "1"]);
    let progress = cli.json(&["progress"]);
    assert_eq!(progress["completed"], 1);
}

#[test]
fn test_timer_run_unknown_step_fails() {
    let cli = Cli::new();
    cli.ok(&["step", "add", "Water"]);
    let (_, stderr, code) = cli.run(&["timer", "run", "--step", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no step with id 1"));
}
