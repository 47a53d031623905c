use anyhow::Context;

use crate::config::PublishTarget;
use crate::outcome::Outcome;
use crate::registry::{ClientError, RegistryClient};

/// Classify `target` against what the registry already holds
///
/// A missing package is an expected answer and becomes [`Outcome::NewPackage`];
/// every other client failure is returned as an error.
pub async fn resolve<C>(client: &C, target: &PublishTarget) -> anyhow::Result<Outcome>
where
    C: RegistryClient + ?Sized,
{
    let query = client
        .view_version(
            &target.cwd,
            &target.name,
            &target.version,
            target.registry.as_deref(),
        )
        .await;

    let outcome = match query {
        Ok(found) if found.trim() == target.version => Outcome::SameVersion,
        Ok(_) => Outcome::NewVersion,
        Err(ClientError::NotFound { .. }) => Outcome::NewPackage,
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "checking {}@{} in the registry",
                    target.name, target.version
                )
            })
        }
    };

    tracing::debug!(name = %target.name, version = %target.version, %outcome, "resolved");
    Ok(outcome)
}
