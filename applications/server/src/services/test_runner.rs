/// Test runner service - cargo wrapper for the `test` and `cov` commands
use crate::error::Result;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Source files left out of coverage reports
pub const COVERAGE_IGNORE_REGEX: &str = r"(/tests/|config\.rs$)";

/// Directory the HTML coverage report is written to
pub const COVERAGE_HTML_DIR: &str = "target/llvm-cov/html";

#[derive(Debug, Clone)]
pub struct TestRunner {
    cargo: OsString,
    workspace_root: PathBuf,
}

impl TestRunner {
    pub fn new(cargo: impl Into<OsString>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            cargo: cargo.into(),
            workspace_root: workspace_root.into(),
        }
    }

    /// Use the cargo that launched us, falling back to `cargo` on `PATH`
    pub fn from_env() -> Result<Self> {
        let cargo = std::env::var_os("CARGO").unwrap_or_else(|| OsString::from("cargo"));
        Ok(Self::new(cargo, std::env::current_dir()?))
    }

    /// Run the whole test suite. Returns the process exit code: 0 or 1.
    pub async fn run_tests(&self) -> Result<u8> {
        let passed = self.run(&Self::test_args()).await?;
        Ok(exit_code(passed))
    }

    /// Run the suite under coverage, then print a summary and write an HTML
    /// report when it passes. Coverage data is cleaned afterwards either way.
    pub async fn run_coverage(&self) -> Result<u8> {
        let passed = self.run(&Self::coverage_args()).await?;

        if passed {
            println!("Coverage summary:");
            self.run(&Self::report_args(false)).await?;
            self.run(&Self::report_args(true)).await?;
            println!("HTML report: {}", self.workspace_root.join(COVERAGE_HTML_DIR).display());
        }

        self.run(&Self::clean_args()).await?;

        Ok(exit_code(passed))
    }

    pub fn test_args() -> Vec<&'static str> {
        vec!["test", "--workspace"]
    }

    pub fn coverage_args() -> Vec<&'static str> {
        vec!["llvm-cov", "--workspace", "--branch", "--no-report"]
    }

    pub fn report_args(html: bool) -> Vec<&'static str> {
        let mut args = vec!["llvm-cov", "report", "--ignore-filename-regex", COVERAGE_IGNORE_REGEX];
        if html {
            args.push("--html");
        }
        args
    }

    pub fn clean_args() -> Vec<&'static str> {
        vec!["llvm-cov", "clean", "--workspace"]
    }

    async fn run(&self, args: &[&str]) -> Result<bool> {
        tracing::debug!("Running {:?} {}", self.cargo, args.join(" "));

        let status = Command::new(&self.cargo)
            .args(args)
            .current_dir(&self.workspace_root)
            .stdin(Stdio::null())
            .status()
            .await?;

        Ok(status.success())
    }
}

fn exit_code(passed: bool) -> u8 {
    u8::from(!passed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(true), 0);
        assert_eq!(exit_code(false), 1);
    }

    #[test]
    fn test_coverage_measures_branches_without_report() {
        let args = TestRunner::coverage_args();
        assert!(args.contains(&"--branch"));
        assert!(args.contains(&"--no-report"));
    }

    #[test]
    fn test_reports_exclude_tests_and_config() {
        let text = TestRunner::report_args(false);
        let html = TestRunner::report_args(true);

        assert!(text.contains(&COVERAGE_IGNORE_REGEX));
        assert!(!text.contains(&"--html"));
        assert!(html.contains(&"--html"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_command_maps_to_exit_code_one() {
        let runner = TestRunner::new("false", std::env::temp_dir());
        assert_eq!(runner.run_tests().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_cargo_is_an_error() {
        let runner = TestRunner::new("/nonexistent/cargo", std::env::temp_dir());
        assert!(runner.run_tests().await.is_err());
    }
}
