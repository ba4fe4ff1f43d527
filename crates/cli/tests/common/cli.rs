//! CLI command execution helpers with automatic timing
//!
//! This module provides a wrapper around the `lull` CLI binary that
//! measures execution time and provides convenient assertion methods.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct LullCommand {
    working_dir: PathBuf,
    args: Vec<String>,
    stdin_data: String,
}

impl LullCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            stdin_data: String::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Provide stdin data (the command always gets a closed stdin)
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = data.to_string();
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut child = Command::new(env!("CARGO_BIN_EXE_lull"))
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn command")?;

        // Dropping stdin after writing signals end of input
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(self.stdin_data.as_bytes())?;
        }

        let output = child
            .wait_with_output()
            .context("Failed to wait for command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Terms of every result set printed, in order
    pub fn result_terms(&self) -> Vec<String> {
        self.stdout.lines().filter_map(extract_result_term).collect()
    }
}

/// Extract the term from a `Search results for "<term>"` header line
pub fn extract_result_term(line: &str) -> Option<String> {
    const HEADER: &str = "Search results for \"";

    let start = line.find(HEADER)? + HEADER.len();
    let len = line[start..].find('"')?;
    Some(line[start..start + len].to_string())
}

/// Macro for convenient command construction
///
/// Usage:
/// ```
/// lull!(dir, "config", "get", "debounce.delay_ms").assert_success()?;
/// ```
#[macro_export]
macro_rules! lull {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::LullCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_term_extraction() {
        let line = "\u{1b}[1mSearch results for \"funny cat\"\u{1b}[0m \u{1b}[2m(3)\u{1b}[0m";
        assert_eq!(extract_result_term(line), Some("funny cat".to_string()));
        assert_eq!(extract_result_term("  Cat typing"), None);
    }

    #[test]
    fn test_result_terms_in_order() {
        let result = CommandResult {
            stdout: "Search results for \"a\" (1)\n  A\nSearch results for \"ab\" (0)\n  No results\n"
                .to_string(),
            stderr: String::new(),
            exit_code: 0,
            duration: Duration::from_millis(10),
        };

        assert_eq!(result.result_terms(), vec!["a".to_string(), "ab".to_string()]);
    }
}
