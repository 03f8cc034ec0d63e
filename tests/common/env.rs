//! Isolated environment for running the texfast binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::sync::OnceLock;

use tempfile::TempDir;

use super::fixtures::FAKE_TEX;

/// Result of running the texfast binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// The fake compiler is written once per test binary; executing a file that
/// another thread still holds open for writing fails with ETXTBSY.
pub fn fake_compiler() -> PathBuf {
    static DIR: OnceLock<TempDir> = OnceLock::new();
    let dir = DIR.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faketex");
        fs::write(&path, FAKE_TEX).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        dir
    });
    dir.path().join("faketex")
}

/// Project and home directories isolated from the user's configuration
pub struct TestEnv {
    pub project: TempDir,
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    /// File where the fake compiler records its calls
    pub fn calls_file(&self) -> PathBuf {
        self.home.path().join("calls.log")
    }

    /// One line of arguments per compiler pass
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_file())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_texfast"));
        cmd.current_dir(self.project.path())
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("FAKE_TEX_CALLS", self.calls_file())
            .env_remove("TEXFAST_ENGINE")
            .env_remove("TEXFAST_INFO")
            .env_remove("TEXFAST_TEMP_FOLDER")
            .env_remove("FAKE_TEX_FAIL");
        cmd
    }

    /// Run with the fake compiler
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let compiler = fake_compiler();
        let mut cmd = self.command(args);
        cmd.arg("--compiler").arg(&compiler);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        TestResult::from_output(cmd.output().expect("Failed to execute texfast"))
    }

    /// Start in watch mode; the caller kills the child.
    pub fn spawn_watch(&self, source: &str) -> Child {
        self.spawn_watch_with(source, Stdio::null())
    }

    /// Start in watch mode with the console output written to `output`.
    pub fn spawn_watch_logged(&self, source: &str, output: &Path) -> Child {
        let file = fs::File::create(output).unwrap();
        self.spawn_watch_with(source, Stdio::from(file))
    }

    fn spawn_watch_with(&self, source: &str, stdout: Stdio) -> Child {
        let mut cmd = self.command(&[source]);
        cmd.arg("--compiler")
            .arg(fake_compiler())
            .stdout(stdout)
            .stderr(Stdio::null());
        cmd.spawn().expect("Failed to start texfast")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll `check` every 50 ms for up to ten seconds.
pub fn wait_for(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if check() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    false
}
