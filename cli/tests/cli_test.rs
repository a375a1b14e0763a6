//! End-to-end tests for the `textvec` and `textvec-compare` binaries.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: [&str; 6] = [
    "RUST_LOG",
    "API_KEY",
    "GEMINI_API_KEY",
    "EMBEDDING_MODEL",
    "EMBEDDING_BASE_URL",
    "EMBEDDING_TIMEOUT_SECS",
];

/// A command with the embedding variables cleared, run from `dir` so no
/// stray `.env` file is picked up.
fn command(bin: &str, dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    cmd.current_dir(dir.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_usage_on_missing_arguments() {
    let dir = TempDir::new().unwrap();

    command("textvec", &dir)
        .arg("only-input.txt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"))
        .stderr(predicate::str::contains("RETRIEVAL_DOCUMENT (default)"))
        .stderr(predicate::str::contains("CLUSTERING"));
}

#[test]
fn test_help_exits_zero() {
    let dir = TempDir::new().unwrap();

    command("textvec", &dir).arg("--help").assert().success();
}

#[test]
fn test_missing_input_reports_error() {
    let dir = TempDir::new().unwrap();

    command("textvec", &dir)
        .args(["missing.txt", "out.json"])
        .env("API_KEY", "test-key")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: input file not found: missing.txt"));

    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_missing_api_key_reports_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("in.txt"), "hello world").unwrap();

    command("textvec", &dir)
        .args(["in.txt", "out.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: API_KEY environment variable not set"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_embeds_file_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "embedding": { "values": [0.1, 0.2, 0.3] } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("in.txt"), "hello world").unwrap();

    command("textvec", &dir)
        .args(["in.txt", "vectors/out.json", "RETRIEVAL_QUERY"])
        .env("API_KEY", "test-key")
        .env("EMBEDDING_BASE_URL", server.uri())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generating embedding for in.txt..."))
        .stderr(predicate::str::contains("Embedding dimension: 3"));

    let saved: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("vectors/out.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        saved,
        json!({
            "embedding": [0.1, 0.2, 0.3],
            "dimension": 3,
            "model": "models/text-embedding-004",
            "metadata": {
                "source_file": "in.txt",
                "text_length": 11,
                "text_preview": "hello world"
            }
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_provider_error_exits_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string(r#"{"error": "rate limited"}"#))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("in.txt"), "hello world").unwrap();

    command("textvec", &dir)
        .args(["in.txt", "out.json"])
        .env("API_KEY", "test-key")
        .env("EMBEDDING_BASE_URL", server.uri())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 429"))
        .stderr(predicate::str::contains("rate limited"));

    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn test_compare_prints_similarity() {
    let dir = TempDir::new().unwrap();
    let record = |values: serde_json::Value| {
        json!({ "embedding": values, "dimension": 2, "model": "m", "metadata": {} }).to_string()
    };
    std::fs::write(dir.path().join("a.json"), record(json!([1.0, 0.0]))).unwrap();
    std::fs::write(dir.path().join("b.json"), record(json!([0.0, 1.0]))).unwrap();

    command("textvec-compare", &dir)
        .args(["a.json", "a.json"])
        .assert()
        .success()
        .stdout("1.000000\n");

    command("textvec-compare", &dir)
        .args(["a.json", "b.json"])
        .assert()
        .success()
        .stdout("0.000000\n");
}

#[test]
fn test_compare_dimension_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("a.json"),
        json!({ "embedding": [1.0, 0.0] }).to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b.json"),
        json!({ "embedding": [1.0, 0.0, 0.0] }).to_string(),
    )
    .unwrap();

    command("textvec-compare", &dir)
        .args(["a.json", "b.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dimension mismatch"));
}

#[test]
fn test_compare_ignores_embedding_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("a.json"),
        json!({ "embedding": [3.0, 4.0] }).to_string(),
    )
    .unwrap();

    command("textvec-compare", &dir)
        .args(["a.json", "a.json"])
        .env("EMBEDDING_TIMEOUT_SECS", "soon")
        .assert()
        .success()
        .stdout("1.000000\n");
}
