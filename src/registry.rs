use async_trait::async_trait;
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    process::Output,
    sync::OnceLock,
};
use thiserror::Error;
use tokio::process::Command;

use crate::constants::NOT_FOUND_CODE;

/// Failures reported by a registry client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The package (or the package at that version) does not exist
    #[error("{spec} not found in registry: {stderr}")]
    NotFound { spec: String, stderr: String },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Modifiers passed through to the publish command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOptions {
    pub tag: Option<String>,
    pub registry: Option<String>,
    pub dry_run: bool,
}

/// The two registry operations the workflow needs
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Version string the registry reports for `name@version`, possibly empty
    async fn view_version(
        &self,
        cwd: &Path,
        name: &str,
        version: &str,
        registry: Option<&str>,
    ) -> Result<String, ClientError>;

    async fn publish(&self, cwd: &Path, options: &PublishOptions) -> Result<(), ClientError>;
}

/// Registry client backed by the `npm` command line
pub struct NpmClient {
    pub program: PathBuf,
}

impl NpmClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        NpmClient {
            program: program.into(),
        }
    }

    pub fn view_args(name: &str, version: &str, registry: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "view".to_string(),
            format!("{}@{}", name, version),
            "version".to_string(),
        ];
        if let Some(registry) = registry {
            args.push("--registry".to_string());
            args.push(registry.to_string());
        }
        args
    }

    pub fn publish_args(options: &PublishOptions) -> Vec<String> {
        let mut args = vec!["publish".to_string()];
        if let Some(tag) = &options.tag {
            args.push("--tag".to_string());
            args.push(tag.clone());
        }
        if let Some(registry) = &options.registry {
            args.push("--registry".to_string());
            args.push(registry.clone());
        }
        if options.dry_run {
            args.push("--dry-run".to_string());
        }
        args
    }

    async fn exec(&self, cwd: &Path, args: &[String]) -> Result<Output, ClientError> {
        let program = self.program.display().to_string();
        tracing::debug!(program = %program, args = ?args, cwd = %cwd.display(), "spawning registry client");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ClientError::Spawn {
                program: program.clone(),
                source,
            })?;

        tracing::debug!(status = %output.status, "registry client finished");
        Ok(output)
    }

    fn failure(&self, args: &[String], output: &Output) -> ClientError {
        ClientError::Failed {
            command: format!("{} {}", self.program.display(), args.join(" ")),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

#[async_trait]
impl RegistryClient for NpmClient {
    async fn view_version(
        &self,
        cwd: &Path,
        name: &str,
        version: &str,
        registry: Option<&str>,
    ) -> Result<String, ClientError> {
        let args = Self::view_args(name, version, registry);
        let output = self.exec(cwd, &args).await?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_not_found(&stderr) {
            return Err(ClientError::NotFound {
                spec: format!("{}@{}", name, version),
                stderr: stderr.trim().to_string(),
            });
        }
        Err(self.failure(&args, &output))
    }

    async fn publish(&self, cwd: &Path, options: &PublishOptions) -> Result<(), ClientError> {
        let args = Self::publish_args(options);
        let output = self.exec(cwd, &args).await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(self.failure(&args, &output))
        }
    }
}

/// Whether the client's error output signals a missing package
///
/// The `code` line npm prints (`npm ERR! code E404`, or `npm error code E404`
/// on npm 10+) decides when present. Without one, any occurrence of `E404`
/// in the output counts, for clients that only mention it in free text.
pub fn is_not_found(stderr: &str) -> bool {
    match error_code(stderr) {
        Some(code) => code == NOT_FOUND_CODE,
        None => stderr.contains(NOT_FOUND_CODE),
    }
}

/// The `code` field of npm's structured error output, if present
pub fn error_code(stderr: &str) -> Option<String> {
    static CODE_LINE: OnceLock<Regex> = OnceLock::new();
    let re = CODE_LINE
        .get_or_init(|| Regex::new(r"(?m)^npm (?:ERR!|error) code (\S+)\s*$").unwrap());
    re.captures(stderr).map(|caps| caps[1].to_string())
}
