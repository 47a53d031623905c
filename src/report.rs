//! Message formatting for each end state of a run

use colored::Colorize;

use crate::config::PublishTarget;
use crate::outcome::Outcome;

pub fn up_to_date(target: &PublishTarget) -> String {
    format!(
        "Package {} is up-to-date, no more action required",
        target.name.bold()
    )
}

/// Success line for a finished publish
///
/// `NewVersion` reads as an update, anything else as a creation.
pub fn published(target: &PublishTarget, outcome: Outcome) -> String {
    let tag = target
        .tag
        .as_deref()
        .map(|t| format!(" with tag {}", t.green().bold()))
        .unwrap_or_default();

    match outcome {
        Outcome::NewVersion => format!(
            "Package {} has been updated to v{}{}",
            target.name.blue().bold(),
            target.version.blue().bold(),
            tag
        ),
        _ => format!(
            "Package {} has been created with v{}{}",
            target.name.green().bold(),
            target.version.green().bold(),
            tag
        ),
    }
}

pub fn dry_run() -> String {
    format!("{} no changes were made to the registry", "Dry run:".yellow())
}

pub fn failure(target: &PublishTarget) -> String {
    let tag = target
        .tag
        .as_deref()
        .map(|t| format!(" with tag {}", t.red().bold()))
        .unwrap_or_default();

    format!(
        "Error publishing {} to v{}{}",
        target.name.red().bold(),
        target.version.red().bold(),
        tag
    )
}

/// Error line for failures that happen before the package is known
pub fn setup_failure() -> String {
    format!("{} unable to prepare publication", "Error:".red().bold())
}

/// The full error chain, one cause per line
pub fn cause(error: &anyhow::Error) -> String {
    error
        .chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n  caused by: ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, version: &str, tag: Option<&str>) -> PublishTarget {
        colored::control::set_override(false);
        PublishTarget {
            cwd: "/pkg".into(),
            name: name.into(),
            version: version.into(),
            registry: None,
            tag: tag.map(Into::into),
            force: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_up_to_date() {
        assert_eq!(
            up_to_date(&target("foo", "1.0.0", None)),
            "Package foo is up-to-date, no more action required"
        );
    }

    #[test]
    fn test_updated_without_tag() {
        assert_eq!(
            published(&target("foo", "2.0.0", None), Outcome::NewVersion),
            "Package foo has been updated to v2.0.0"
        );
    }

    #[test]
    fn test_created_with_tag() {
        assert_eq!(
            published(&target("bar", "1.0.0", Some("next")), Outcome::NewPackage),
            "Package bar has been created with v1.0.0 with tag next"
        );
    }

    #[test]
    fn test_forced_same_version_reads_as_created() {
        assert_eq!(
            published(&target("foo", "1.0.0", None), Outcome::SameVersion),
            "Package foo has been created with v1.0.0"
        );
    }

    #[test]
    fn test_failure_mentions_package() {
        assert_eq!(
            failure(&target("bar", "1.0.0", Some("beta"))),
            "Error publishing bar to v1.0.0 with tag beta"
        );
    }

    #[test]
    fn test_cause_chain() {
        let err = anyhow::anyhow!("E401 unauthorized").context("querying registry");
        assert_eq!(
            cause(&err),
            "querying registry\n  caused by: E401 unauthorized"
        );
    }
}
