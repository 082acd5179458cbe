//! Shared helpers for the CLI integration tests.
//!
//! - `CliRunner` calls `flopbot_cli::run` in-process with a temporary
//!   working area and captures stdout, stderr and the exit code.
//! - Environment changes made through `run_with_env` are undone afterwards;
//!   tests touching the environment must be `#[serial]`.

use std::path::{Path, PathBuf};

const ENV_KEYS: &[&str] = &[
    "FLOPBOT_CONFIG",
    "FLOPBOT_SEED",
    "FLOPBOT_EPSILON",
    "FLOPBOT_LEARNING_RATE",
    "FLOPBOT_EPISODES_PER_BATCH",
    "FLOPBOT_MODEL_DIR",
];

#[derive(Debug, Clone)]
pub struct CliResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug)]
pub struct CliRunner {
    dir: tempfile::TempDir,
}

struct EnvGuard {
    restores: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    /// Clears every FLOPBOT_* variable, then applies `pairs`.
    fn apply(pairs: &[(&str, &str)]) -> Self {
        let mut restores = Vec::new();
        for key in ENV_KEYS {
            restores.push((key.to_string(), std::env::var(key).ok()));
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in pairs {
            if !ENV_KEYS.contains(key) {
                restores.push((key.to_string(), std::env::var(key).ok()));
            }
            unsafe { std::env::set_var(key, value) };
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.restores.iter().rev() {
            match previous {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

impl CliRunner {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn model_dir(&self) -> PathBuf {
        self.dir.path().join("obj")
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write file");
        path
    }

    pub fn run(&self, args: &[&str]) -> CliResult {
        self.run_with_env(args, &[])
    }

    /// Runs with FLOPBOT_MODEL_DIR pointing inside the temporary area unless
    /// `env` sets it.
    pub fn run_with_env(&self, args: &[&str], env: &[(&str, &str)]) -> CliResult {
        let model_dir = self.model_dir().to_string_lossy().into_owned();
        let mut pairs: Vec<(&str, &str)> = vec![("FLOPBOT_MODEL_DIR", model_dir.as_str())];
        pairs.extend_from_slice(env);
        let _guard = EnvGuard::apply(&pairs);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let argv: Vec<String> = std::iter::once("flopbot".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let code = flopbot_cli::run(argv, &mut out, &mut err);
        CliResult {
            exit_code: code,
            stdout: String::from_utf8_lossy(&out).to_string(),
            stderr: String::from_utf8_lossy(&err).to_string(),
        }
    }

    /// Arguments for a short, seeded training run inside the temp area.
    pub fn train_args(&self, batches: u64, episodes: u64, seed: u64) -> Vec<String> {
        vec![
            "train".into(),
            "--batches".into(),
            batches.to_string(),
            "--episodes-per-batch".into(),
            episodes.to_string(),
            "--seed".into(),
            seed.to_string(),
            "--stop-file".into(),
            self.dir.path().join("quit").to_string_lossy().into_owned(),
        ]
    }
}

pub fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}
