use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway directory to run `shelf` in.
pub struct ShelfWorkspace {
    _temp: TempDir,
    pub root: PathBuf,
}

impl ShelfWorkspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Default catalog location after `shelf init`.
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(".shelf").join("catalog.json")
    }

    pub fn read_catalog(&self) -> String {
        fs::read_to_string(self.catalog_path()).expect("read catalog")
    }

    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write file");
    }
}

/// Captured result of one `shelf` invocation.
pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Build a `shelf` command isolated from the caller's environment.
pub fn shelf_command(workspace: &ShelfWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("shelf").expect("shelf binary");
    cmd.current_dir(&workspace.root);
    cmd.env_remove("SHELF_DATA");
    cmd.env_remove("SHELF_LOG");
    cmd
}

/// Run `shelf` with `args` in the workspace; `label` names the step in failures.
pub fn run_shelf<I, S>(workspace: &ShelfWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = shelf_command(workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("{label}: failed to run shelf: {e}"));
    RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run and assert exit code 0.
pub fn run_ok<I, S>(workspace: &ShelfWorkspace, args: I, label: &str) -> RunOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = run_shelf(workspace, args, label);
    assert!(
        output.status.success(),
        "{label} failed ({:?})\nstdout: {}\nstderr: {}",
        output.code(),
        output.stdout,
        output.stderr
    );
    output
}

/// A workspace that has already run `shelf init`.
pub fn initialized_workspace() -> ShelfWorkspace {
    let workspace = ShelfWorkspace::new();
    run_ok(&workspace, ["init"], "init");
    workspace
}
