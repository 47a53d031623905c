/// Package metadata file read from the working directory.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Optional per-package configuration file.
pub const PUBLISH_CONFIG: &str = "npmpublish.yaml";

/// Environment variable overriding the registry client program.
pub const CLIENT_ENV: &str = "NPM_PUBLISH_CLIENT";

/// Registry client used when nothing else is configured.
#[cfg(not(windows))]
pub const DEFAULT_CLIENT: &str = "npm";

/// Registry client used when nothing else is configured.
///
/// npm ships as a `.cmd` shim on Windows, which process spawning does not
/// find under the bare name.
#[cfg(windows)]
pub const DEFAULT_CLIENT: &str = "npm.cmd";

/// Error code the npm client reports for a missing package or version.
pub const NOT_FOUND_CODE: &str = "E404";
