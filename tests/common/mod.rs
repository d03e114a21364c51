#![allow(dead_code)]

use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Runs the ticketdeck binary in an isolated temp directory against `api_url`
pub struct DeckTest {
    pub temp_dir: TempDir,
    api_url: String,
}

impl DeckTest {
    pub fn new(api_url: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        DeckTest {
            temp_dir,
            api_url: api_url.to_string(),
        }
    }

    /// Run the binary off the async runtime so the mock server keeps serving
    pub async fn run(&self, args: &[&str]) -> Output {
        self.run_with_stdin(args, "").await
    }

    pub async fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let dir = self.temp_dir.path().to_path_buf();
        let api_url = self.api_url.clone();
        let stdin = stdin.to_string();

        tokio::task::spawn_blocking(move || {
            use std::io::Write;
            use std::process::Stdio;

            let mut child = Command::new(env!("CARGO_BIN_EXE_ticketdeck"))
                .args(&args)
                .current_dir(dir)
                .env("TICKETDECK_API_URL", api_url)
                .env_remove("RUST_LOG")
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .expect("Failed to execute ticketdeck command");

            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(stdin.as_bytes())
                    .expect("Failed to write stdin");
            }
            child.wait_with_output().expect("Failed to wait for ticketdeck")
        })
        .await
        .expect("Command task panicked")
    }

    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join(".ticketdeck").join("config.yaml")
    }
}

// JSON fixtures matching the backend's wire format

pub fn issue_json(key: &str, status: &str) -> Value {
    json!({
        "key": key,
        "summary": format!("Summary of {key}"),
        "description": null,
        "status": status,
        "assignee": null,
        "priority": null,
        "created": "2024-01-15T10:30:00.000+0000",
        "updated": null,
    })
}

pub fn issues_json(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|n| issue_json(&format!("PROJ-{n}"), "To Do"))
        .collect()
}

pub fn page_json(issues: Vec<Value>, total: u64, token: Option<&str>) -> Value {
    json!({
        "issues": issues,
        "total": total,
        "next_page_token": token,
    })
}

pub fn analysis_json(key: &str) -> Value {
    json!({
        "issue_key": key,
        "summary": format!("Summary of {key}"),
        "suggestions": [
            "Add reproduction steps",
            "Link the failing build",
            "Assign an owner"
        ],
        "priority_recommendation": "High",
        "confidence_score": 0.82,
    })
}
