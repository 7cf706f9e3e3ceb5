use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Closed port so no test ever leaves the machine; connection is refused
// immediately and the fetch failure path is exercised deterministically.
pub const DEAD_ENDPOINT: &str = "http://127.0.0.1:9";

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create working dir");
        Self {
            _tmp: tmp,
            home,
            work,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("pkgwatch").expect("binary under test");
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .args(["--registry", DEAD_ENDPOINT, "--downloads-api", DEAD_ENDPOINT]);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn config_path(&self) -> PathBuf {
        self.work.join("config.json")
    }

    pub fn write_config(&self, doc: &Value) {
        fs::write(
            self.config_path(),
            serde_json::to_string_pretty(doc).expect("serialize config"),
        )
        .expect("write config");
    }

    pub fn read_config_bytes(&self) -> Vec<u8> {
        fs::read(self.config_path()).expect("read config")
    }

    pub fn stats_dir(&self) -> PathBuf {
        self.work.join("stats")
    }

    pub fn current_period_key(&self) -> String {
        use chrono::Datelike;
        let now = chrono::Local::now();
        format!("{:02}.{}", now.month(), now.year())
    }

    pub fn stats_file(&self) -> PathBuf {
        self.stats_dir()
            .join(format!("{}.json", self.current_period_key()))
    }
}
