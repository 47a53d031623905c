//! Configuration for a publish run
//!
//! Settings are layered, later wins:
//! 1. Built-in defaults (`npm`, no registry override, no tag)
//! 2. `npmpublish.yaml` in the package directory
//! 3. `NPM_PUBLISH_CLIENT` for the client program
//! 4. Command-line flags
//!
//! ## Environment Variable Expansion
//!
//! `npmpublish.yaml` supports environment variable expansion:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set
//!
//! Values that expand to an empty string are treated as unset.

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::constants::{CLIENT_ENV, DEFAULT_CLIENT, PUBLISH_CONFIG};
use crate::manifest::PackageManifest;
use crate::registry::PublishOptions;
use crate::PublishArgs;

/// Optional per-package configuration loaded from `npmpublish.yaml`
///
/// # Example
///
/// ```yaml
/// registry: ${NPM_REGISTRY:-https://registry.npmjs.org}
/// tag: next
/// client: /usr/local/bin/npm
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    /// Registry URL used for both the version query and the publish
    #[serde(default)]
    pub registry: Option<String>,
    /// Default distribution tag
    #[serde(default)]
    pub tag: Option<String>,
    /// Registry client program
    #[serde(default)]
    pub client: Option<String>,
}

/// Everything the workflow needs to know about one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub cwd: PathBuf,
    pub name: String,
    pub version: String,
    pub registry: Option<String>,
    pub tag: Option<String>,
    pub force: bool,
    pub dry_run: bool,
}

impl PublishTarget {
    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions {
            tag: self.tag.clone(),
            registry: self.registry.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub target: PublishTarget,
    pub client: PathBuf,
}

impl Settings {
    /// Resolve settings from CLI arguments, config file, environment and `package.json`
    pub fn resolve(args: &PublishArgs) -> anyhow::Result<Self> {
        let cwd = match &args.cwd {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("determining current directory")?,
        };
        let file = load_file_config(&cwd)?;
        let manifest = PackageManifest::load(&cwd)?;
        let client = env::var(CLIENT_ENV).ok().filter(|v| !v.is_empty());

        Ok(Self::merge(args, file, manifest, client, cwd))
    }

    fn merge(
        args: &PublishArgs,
        file: FileConfig,
        manifest: PackageManifest,
        client_env: Option<String>,
        cwd: PathBuf,
    ) -> Self {
        let client = client_env
            .or(file.client)
            .unwrap_or_else(|| DEFAULT_CLIENT.to_string());

        Settings {
            target: PublishTarget {
                cwd,
                name: manifest.name,
                version: manifest.version,
                registry: args.registry.clone().or(file.registry),
                tag: args.tag.clone().or(file.tag),
                force: args.force,
                dry_run: args.dry_run,
            },
            client: PathBuf::from(client),
        }
    }
}

/// Load `npmpublish.yaml` from `dir`, or defaults when the file is absent
pub fn load_file_config(dir: &Path) -> anyhow::Result<FileConfig> {
    let path = dir.join(PUBLISH_CONFIG);
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let data = preprocess_config(&path)?;
    if data.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    let cfg: FileConfig = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg.normalized())
}

impl FileConfig {
    fn normalized(self) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        FileConfig {
            registry: non_empty(self.registry),
            tag: non_empty(self.tag),
            client: non_empty(self.client),
        }
    }
}

pub fn expand_env_placeholders(input: &str) -> String {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let op = caps.get(2).map_or("", |m| m.as_str());
        let val = caps.get(3).map_or("", |m| m.as_str());
        let var = env::var(var_name).ok();

        match (var.as_deref(), op) {
            (Some(v), "") => v.to_string(),                   // ${VAR}
            (Some(v), ":-") if !v.is_empty() => v.to_string(), // ${VAR:-default}
            (_, ":-") => val.to_string(),
            (Some(v), "-") => v.to_string(), // ${VAR-default}
            (None, "-") => val.to_string(),
            (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
            (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
            _ => String::new(),
        }
    })
    .to_string()
}

pub fn preprocess_config(path: &Path) -> anyhow::Result<String> {
    let raw_data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(expand_env_placeholders(&raw_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest(name: &str, version: &str) -> PackageManifest {
        PackageManifest {
            name: name.into(),
            version: version.into(),
            private: false,
        }
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_file_config(dir.path()).unwrap(), FileConfig::default());
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PUBLISH_CONFIG),
            "registry: http://localhost:4873\ntag: next\n",
        )
        .unwrap();

        let cfg = load_file_config(dir.path()).unwrap();
        assert_eq!(cfg.registry.as_deref(), Some("http://localhost:4873"));
        assert_eq!(cfg.tag.as_deref(), Some("next"));
        assert!(cfg.client.is_none());
    }

    #[test]
    fn test_config_placeholder_default_and_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PUBLISH_CONFIG),
            "registry: ${NPM_PUBLISH_TEST_UNSET_REGISTRY:-http://fallback}\ntag: ${NPM_PUBLISH_TEST_UNSET_TAG:-}\n",
        )
        .unwrap();

        let cfg = load_file_config(dir.path()).unwrap();
        assert_eq!(cfg.registry.as_deref(), Some("http://fallback"));
        assert!(cfg.tag.is_none());
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PUBLISH_CONFIG), "registry: [unclosed").unwrap();
        assert!(load_file_config(dir.path()).is_err());
    }

    #[test]
    fn test_misspelled_key_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PUBLISH_CONFIG),
            "regsitry: http://localhost:4873\n",
        )
        .unwrap();

        let err = load_file_config(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("regsitry"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let args = PublishArgs {
            registry: Some("http://cli".into()),
            force: true,
            ..Default::default()
        };
        let file = FileConfig {
            registry: Some("http://file".into()),
            tag: Some("next".into()),
            client: Some("/opt/npm".into()),
        };

        let settings = Settings::merge(&args, file, manifest("foo", "1.0.0"), None, "/pkg".into());
        assert_eq!(settings.target.registry.as_deref(), Some("http://cli"));
        assert_eq!(settings.target.tag.as_deref(), Some("next"));
        assert!(settings.target.force);
        assert!(!settings.target.dry_run);
        assert_eq!(settings.client, PathBuf::from("/opt/npm"));
        assert_eq!(settings.target.name, "foo");
        assert_eq!(settings.target.version, "1.0.0");
    }

    #[test]
    fn test_client_env_overrides_file() {
        let file = FileConfig {
            client: Some("/opt/npm".into()),
            ..Default::default()
        };
        let settings = Settings::merge(
            &PublishArgs::default(),
            file,
            manifest("foo", "1.0.0"),
            Some("/tmp/fake-npm".into()),
            "/pkg".into(),
        );
        assert_eq!(settings.client, PathBuf::from("/tmp/fake-npm"));
    }

    #[test]
    fn test_default_client() {
        let settings = Settings::merge(
            &PublishArgs::default(),
            FileConfig::default(),
            manifest("foo", "1.0.0"),
            None,
            "/pkg".into(),
        );
        assert_eq!(settings.client, PathBuf::from(DEFAULT_CLIENT));
        assert!(settings.target.registry.is_none());
        assert!(settings.target.tag.is_none());
    }

    #[test]
    fn test_publish_options_from_target() {
        let target = PublishTarget {
            cwd: "/pkg".into(),
            name: "foo".into(),
            version: "1.0.0".into(),
            registry: Some("http://r".into()),
            tag: Some("beta".into()),
            force: false,
            dry_run: true,
        };
        assert_eq!(
            target.publish_options(),
            PublishOptions {
                tag: Some("beta".into()),
                registry: Some("http://r".into()),
                dry_run: true,
            }
        );
    }
}
