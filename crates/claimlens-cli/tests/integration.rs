#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn claimlens() -> Command {
    let mut cmd = Command::cargo_bin("claimlens").unwrap();
    cmd.env_remove("CLAIMLENS_CONFIG")
        .env_remove("CLAIMLENS_BACKEND_URL")
        .env_remove("CLAIMLENS_PORT")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a fixture file with one claim that has a policy and one that does not.
fn write_fixtures(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("fixtures.json");
    let fixtures = serde_json::json!({
        "claims": {
            "claim_1": {
                "claim_id": "claim_1",
                "policy_id": "policy_1",
                "loss_date": "2024-05-01",
                "accident_details": {"location": {"city": "Austin"}}
            },
            "claim_2": {"claim_id": "claim_2"}
        },
        "policies": {
            "policy_1": {
                "policy_id": "policy_1",
                "premium": 1500.0,
                "effective_date": "2024-01-01",
                "expiration_date": "2025-01-01"
            }
        },
        "coverages": {
            "policy_1": [{"coverage_id": "cov_1", "coverage_type": "Collision"}]
        }
    });
    std::fs::write(&path, serde_json::to_string_pretty(&fixtures).unwrap()).unwrap();
    path
}

// ---------------------------------------------------------------------------
// claimlens plan
// ---------------------------------------------------------------------------

#[test]
fn plan_prints_action_table() {
    claimlens()
        .args(["plan", "What are the coverages on this claim?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACTION"))
        .stdout(predicate::str::contains("get_claim"))
        .stdout(predicate::str::contains("get_policy_coverages"));
}

#[test]
fn plan_json_lists_actions_in_order() {
    let output = claimlens()
        .args(["plan", "premium and documents", "--claim-id", "claim_1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["claim_id"], "claim_1");
    assert_eq!(
        value["actions"],
        serde_json::json!(["get_documents", "get_claim", "get_policy", "get_policy_premium"])
    );
}

#[test]
fn plan_unsupported_prompt() {
    claimlens()
        .args(["plan", "banana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unsupported"));
}

// ---------------------------------------------------------------------------
// claimlens ask
// ---------------------------------------------------------------------------

#[test]
fn ask_with_fixtures_prints_steps() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    claimlens()
        .args(["ask", "what is the premium", "--claim-id", "claim_1", "--fixtures"])
        .arg(&fixtures)
        .assert()
        .success()
        .stdout(predicate::str::contains("Claim retrieved"))
        .stdout(predicate::str::contains("Policy Premium"))
        .stdout(predicate::str::contains("$1,500.00"));
}

#[test]
fn ask_json_returns_envelope() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    let output = claimlens()
        .args(["-j", "ask", "policy period", "--claim-id", "claim_1", "--fixtures"])
        .arg(&fixtures)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["prompt"], "policy period");
    assert_eq!(
        value["steps_executed"],
        serde_json::json!(["Claim retrieved", "Policy details fetched", "Policy Period"])
    );
    assert_eq!(value["results"][2]["data"]["effective_date"], "2024-01-01");
    assert_eq!(value["results"][2]["data"]["expiration_date"], "2025-01-01");
}

#[test]
fn ask_reports_recoverable_failures_inline() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    claimlens()
        .args(["ask", "coverages", "--claim-id", "claim_2", "--fixtures"])
        .arg(&fixtures)
        .assert()
        .success()
        .stdout(predicate::str::contains("Coverage lookup failed"))
        .stdout(predicate::str::contains("No policy_id found."));
}

#[test]
fn ask_unsupported_prompt() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    claimlens()
        .args(["ask", "banana", "--claim-id", "claim_1", "--fixtures"])
        .arg(&fixtures)
        .assert()
        .success()
        .stdout(predicate::str::contains("Unsupported prompt"))
        .stdout(predicate::str::contains("I don't understand that yet."));
}

#[test]
fn ask_requires_claim_id() {
    claimlens()
        .args(["ask", "premium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--claim-id"));
}

#[test]
fn ask_rejects_empty_claim_id() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    claimlens()
        .args(["ask", "premium", "--claim-id", "", "--fixtures"])
        .arg(&fixtures)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing prompt or claim_id"));
}

#[test]
fn ask_unknown_claim_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    claimlens()
        .args(["ask", "claim info", "--claim-id", "claim_404", "--fixtures"])
        .arg(&fixtures)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Claim not found"));
}

#[test]
fn ask_logs_aborted_run_with_run_id() {
    let dir = TempDir::new().unwrap();
    let fixtures = write_fixtures(&dir);

    claimlens()
        .args(["ask", "claim info", "--claim-id", "claim_404", "--fixtures"])
        .arg(&fixtures)
        .assert()
        .failure()
        .stderr(predicate::str::contains("run aborted"))
        .stderr(predicate::str::contains("orchestrate"))
        .stderr(predicate::str::contains("run_id"))
        .stderr(predicate::str::contains("error: claim 'claim_404': Claim not found"));
}

#[test]
fn ask_unreachable_backend_fails() {
    claimlens()
        .args([
            "--backend-url",
            "http://127.0.0.1:9",
            "ask",
            "claim info",
            "--claim-id",
            "claim_1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// claimlens config check
// ---------------------------------------------------------------------------

#[test]
fn config_check_defaults_are_valid() {
    claimlens()
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://claimcenter-api:8080"))
        .stdout(predicate::str::contains("No warnings"));
}

#[test]
fn config_check_rejects_bad_backend_url() {
    claimlens()
        .args(["--backend-url", "ftp://claims", "config", "check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"))
        .stderr(predicate::str::contains("config validation found errors"));
}

#[test]
fn config_check_reads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("claimlens.yaml");
    std::fs::write(&path, "backend:\n  timeout_secs: 600\nserver:\n  port: 9100\n").unwrap();

    claimlens()
        .args(["config", "check", "--json", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"port\": 9100"))
        .stdout(predicate::str::contains("\"level\": \"warning\""));
}

#[test]
fn config_check_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    claimlens()
        .args(["config", "check", "--config"])
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

// ---------------------------------------------------------------------------
// claimlens serve
// ---------------------------------------------------------------------------

#[test]
fn serve_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("claimlens.yaml");
    std::fs::write(&path, "backend:\n  timeout_secs: 0\nserver:\n  port: 0\n").unwrap();

    claimlens()
        .args(["serve", "--config"])
        .arg(&path)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs must be greater than 0"))
        .stderr(predicate::str::contains("config validation found errors"));
}
