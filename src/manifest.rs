//! Package metadata read from `package.json`

use anyhow::Context;
use semver::Version;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::constants::PACKAGE_MANIFEST;

/// The subset of `package.json` the publish workflow needs
#[derive(Deserialize, Debug, Clone)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub private: bool,
}

impl PackageManifest {
    /// Load and validate `package.json` from `dir`
    ///
    /// # Errors
    /// Returns error if the file is missing or malformed, if `name` is empty,
    /// if `version` is not a semantic version, or if the package is private.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let path = dir.join(PACKAGE_MANIFEST);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("reading package metadata {}", path.display()))?;
        let manifest: PackageManifest = serde_json::from_str(&data)
            .with_context(|| format!("parsing package metadata {}", path.display()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("{} has an empty \"name\"", PACKAGE_MANIFEST);
        }
        Version::parse(&self.version).with_context(|| {
            format!(
                "invalid version '{}' in {} for '{}'",
                self.version, PACKAGE_MANIFEST, self.name
            )
        })?;
        if self.private {
            anyhow::bail!(
                "package '{}' is marked private in {} and cannot be published",
                self.name,
                PACKAGE_MANIFEST
            );
        }
        Ok(())
    }
}
