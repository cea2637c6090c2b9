use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one service invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ServiceOutput {
    /// Text to show the user for a failed run: stderr, else stdout, else the exit status.
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.code {
            Some(code) => format!("Movie service exited with status {}", code),
            None => "Movie service was terminated by a signal".to_string(),
        }
    }
}

#[async_trait]
pub trait ServiceRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<ServiceOutput>;
}

/// Program plus the fixed leading arguments every invocation starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCommand {
    pub program: String,
    pub prefix: Vec<String>,
}

impl ServiceCommand {
    pub fn new(program: impl Into<String>, prefix: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix,
        }
    }

    /// `<runtime> -cp <classpath> <main_class>`
    pub fn java(runtime: &str, classpath: &str, main_class: &str) -> Self {
        Self::new(
            runtime,
            vec!["-cp".to_string(), classpath.to_string(), main_class.to_string()],
        )
    }

    pub fn argv(&self, args: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + self.prefix.len() + args.len());
        argv.push(self.program.clone());
        argv.extend(self.prefix.iter().cloned());
        argv.extend(args.iter().cloned());
        argv
    }
}

#[derive(Debug, Clone)]
pub struct ProcessRunner {
    command: ServiceCommand,
}

impl ProcessRunner {
    pub fn new(command: ServiceCommand) -> Self {
        Self { command }
    }
}

#[async_trait]
impl ServiceRunner for ProcessRunner {
    async fn run(&self, args: &[String]) -> Result<ServiceOutput> {
        debug!(argv = ?self.command.argv(args), "Invoking movie service");
        let output = Command::new(&self.command.program)
            .args(&self.command.prefix)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to run '{}'", self.command.program))?;

        let result = ServiceOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            success = result.success,
            code = ?result.code,
            stdout_len = result.stdout.len(),
            stderr_len = result.stderr.len(),
            "Movie service finished"
        );
        Ok(result)
    }
}
