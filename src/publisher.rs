use anyhow::Context;

use crate::config::PublishTarget;
use crate::outcome::Outcome;
use crate::registry::RegistryClient;

/// What the publisher did with a resolved outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Same version already published and not forced; nothing was run
    Skipped(Outcome),
    /// The publish command succeeded; carries the outcome it was given
    Published(Outcome),
}

/// Publish `target` unless `outcome` says it is already there
pub async fn publish<C>(client: &C, target: &PublishTarget, outcome: Outcome) -> anyhow::Result<Step>
where
    C: RegistryClient + ?Sized,
{
    if outcome == Outcome::SameVersion && !target.force {
        return Ok(Step::Skipped(outcome));
    }

    let options = target.publish_options();
    tracing::debug!(?options, forced = target.force, "publishing");

    client
        .publish(&target.cwd, &options)
        .await
        .with_context(|| format!("publishing {}@{}", target.name, target.version))?;

    Ok(Step::Published(outcome))
}
