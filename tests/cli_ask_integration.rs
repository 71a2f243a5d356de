//! CLI integration tests for `askdocs ask`.
//!
//! These run the compiled binary against a mocked endpoint and check what it
//! prints and how it exits.

use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn askdocs() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_askdocs"));
    cmd.env_remove("ASKDOCS_ENDPOINT").env("RUST_LOG", "off");
    cmd
}

/// Runs `askdocs ask <query> --endpoint <endpoint>` off the async runtime.
async fn run_ask(query: &'static str, endpoint: String) -> Output {
    tokio::task::spawn_blocking(move || {
        askdocs()
            .args(["ask", query, "--endpoint", &endpoint])
            .output()
            .expect("failed to run askdocs")
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn ask_prints_answer_and_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": "Paris is the capital." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = run_ask("What is the capital?", format!("{}/query", server.uri())).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Paris is the capital."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn ask_prints_error_message_and_exits_one_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let output = run_ask("anything", format!("{}/query", server.uri())).await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        askdocs::ERROR_MESSAGE
    );
}

#[test]
fn invalid_endpoint_is_an_internal_error() {
    let output = askdocs()
        .args(["ask", "anything", "--endpoint", "not a url"])
        .output()
        .expect("failed to run askdocs");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid URL"));
}
