#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

pub fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_arrchk"));
    cmd.env("CLICOLOR", "0");
    cmd.env("CLICOLOR_FORCE", "0");
    cmd.env_remove("ARRCHK_LOG");
    cmd
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/ir")
        .join(name)
}

/// Copies an IR fixture into a fresh directory, optionally next to an
/// `arrchk.toml`, and returns the directory and the copied IR path.
pub fn staged_fixture(name: &str, config: Option<&str>) -> (TempDir, PathBuf) {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let ir = temp.path().join(name);
    fs::copy(fixture_path(name), &ir).expect("fixture should be copied");
    if let Some(config) = config {
        fs::write(temp.path().join("arrchk.toml"), config).expect("config should be written");
    }
    (temp, ir)
}

pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).replace("\r\n", "\n")
}

pub fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).replace("\r\n", "\n")
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("file should be written");
    path
}
