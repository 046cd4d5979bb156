//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temp
//! directory, so config and database files never touch the real profile.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_claritycoach"))
        .args(args)
        .env("HOME", home)
        .env_remove("CLARITYCOACH_ENV")
        .env_remove("CLARITYCOACH_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

#[test]
fn test_chat_offer_persists_between_invocations() {
    let home = tempfile::tempdir().unwrap();
    let first = run_ok(home.path(), &["chat", "I", "feel", "anxious"]);
    assert!(first.contains("10-minute focus timer"), "{first}");
    assert!(first.contains("[Let's start a streak]"), "{first}");

    let second = run_ok(home.path(), &["chat", "--json", "20", "min"]);
    let reply: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert_eq!(reply["actions"][0]["action"], "start_timer");
    assert_eq!(reply["actions"][0]["minutes"], 20);

    let status = run_ok(home.path(), &["timer", "status"]);
    assert!(status.contains("\"phase\": \"running\""), "{status}");
}

#[test]
fn test_chat_crisis_reply() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["chat", "--json", "I want to end my life"]);
    let reply: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(reply["escalated"], true);
    assert!(reply["text"].as_str().unwrap().contains("988"));
}

#[test]
fn test_classify_batch_json() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["classify", "can't sleep", "hello there"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["labels"][0], "sleep_issue");
    assert_eq!(parsed[1]["labels"][0], "small_talk");
}

#[test]
fn test_timer_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    let started = run_ok(home.path(), &["timer", "start", "15"]);
    assert!(started.contains("TimerStarted"), "{started}");
    assert!(started.contains("900"), "{started}");

    let paused = run_ok(home.path(), &["timer", "pause"]);
    assert!(paused.contains("TimerPaused"), "{paused}");

    // Second pause is a no-op and reports the snapshot instead.
    let again = run_ok(home.path(), &["timer", "pause"]);
    assert!(again.contains("\"phase\": \"paused\""), "{again}");

    let resumed = run_ok(home.path(), &["timer", "resume"]);
    assert!(resumed.contains("TimerResumed"), "{resumed}");

    let stopped = run_ok(home.path(), &["timer", "stop"]);
    assert!(stopped.contains("TimerStopped"), "{stopped}");
}

#[test]
fn test_journal_add_list_streak() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["journal", "add", "Studied", "for", "the", "exam"]);

    let list = run_ok(home.path(), &["journal", "list"]);
    assert!(list.contains("Studied for the exam"), "{list}");
    assert!(list.contains("[exams]"), "{list}");

    let streak = run_ok(home.path(), &["journal", "streak"]);
    assert_eq!(streak.trim(), "1-day streak");

    let summary = run_ok(home.path(), &["journal", "summary"]);
    assert!(summary.contains("1 entries across 1 day(s)"), "{summary}");
}

#[test]
fn test_journal_add_trims_text() {
    let home = tempfile::tempdir().unwrap();
    run_ok(home.path(), &["journal", "add", "  Walked", "by the lake \n"]);

    let out = run_ok(home.path(), &["journal", "list", "--json"]);
    let entries: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(entries[0]["text"], "Walked by the lake");

    let (_, stderr, code) = run_cli(home.path(), &["journal", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("journal text is empty"), "{stderr}");
}

#[test]
fn test_config_get_set_reset() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(home.path(), &["config", "get", "timer.offer_minutes"]).trim(), "10");
    run_ok(home.path(), &["config", "set", "timer.offer_minutes", "5"]);
    assert_eq!(run_ok(home.path(), &["config", "get", "timer.offer_minutes"]).trim(), "5");

    let list = run_ok(home.path(), &["config", "list"]);
    assert!(list.contains("timer.offer_minutes = 5"), "{list}");

    run_ok(home.path(), &["config", "reset"]);
    assert_eq!(run_ok(home.path(), &["config", "get", "timer.offer_minutes"]).trim(), "10");
}

#[test]
fn test_config_unknown_key_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(home.path(), &["completions", "bash"]);
    assert!(out.contains("claritycoach"));
}
