use std::path::PathBuf;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;
use tokio::process::Command;

/// Isolated home and token file for one test.
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    pub fn store(&self) -> PathBuf {
        self.home.path().join("tokens.json")
    }

    /// Write a token file as the CLI would have left it.
    pub fn seed_tokens(&self, access: &str, refresh: &str) {
        let doc = serde_json::json!({
            "ingeniia.access_token": access,
            "ingeniia.refresh_token": refresh,
        });
        std::fs::write(self.store(), doc.to_string()).unwrap();
    }

    /// Parsed token file, or an empty object if none was written.
    pub fn tokens(&self) -> Value {
        match std::fs::read_to_string(self.store()) {
            Ok(json) => serde_json::from_str(&json).unwrap(),
            Err(_) => serde_json::json!({}),
        }
    }

    /// Run the CLI with every service pointed at the mock server.
    pub async fn run(&self, args: &[&str], server_uri: &str) -> Output {
        let mut cmd = self.command(args);
        cmd.env("INGENIIA_AUTH_URL", format!("{}/auth", server_uri));
        cmd.env("INGENIIA_CONTENT_URL", format!("{}/content", server_uri));
        cmd.env("INGENIIA_SCORING_URL", format!("{}/scoring", server_uri));
        cmd.output().await.expect("Failed to execute CLI")
    }

    /// Run the CLI with no service URLs configured.
    pub async fn run_unconfigured(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ingeniia"));
        cmd.args(args);
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_DATA_HOME", self.home.path().join("data"));
        cmd.env("INGENIIA_STORE", self.store());
        cmd.env("NO_COLOR", "1");
        for var in [
            "INGENIIA_AUTH_URL",
            "INGENIIA_GATEWAY_URL",
            "INGENIIA_CONTENT_URL",
            "INGENIIA_SCORING_URL",
            "INGENIIA_CAPTCHA_TOKEN",
            "INGENIIA_TIMEOUT",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert success and return stdout.
pub fn success(output: &Output, what: &str) -> String {
    assert!(
        output.status.success(),
        "{} failed: {}",
        what,
        stderr(output)
    );
    stdout(output)
}

