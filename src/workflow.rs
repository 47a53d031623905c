//! Check-then-publish workflow
//!
//! ```text
//! START -> RESOLVING -> PUBLISHING -> REPORTING -> DONE
//!              |            |
//!              |            +-> FAILED
//!              +-> FAILED
//!              +-> up to date (short circuit)
//! ```
//!
//! The workflow never exits the process itself. It returns a [`Completion`]
//! and the binary maps that to an exit code.

use crate::config::PublishTarget;
use crate::logger::Logger;
use crate::outcome::Outcome;
use crate::publisher::{self, Step};
use crate::registry::RegistryClient;
use crate::report;
use crate::resolver;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The version was already published; nothing was done
    UpToDate,
    /// The package was published; carries the resolver's classification
    Published(Outcome),
    /// Resolving or publishing failed
    Failed,
}

impl Completion {
    pub fn exit_code(self) -> i32 {
        match self {
            Completion::UpToDate => Outcome::SameVersion.code(),
            Completion::Published(_) => 0,
            Completion::Failed => Outcome::Error.code(),
        }
    }
}

pub async fn run<C>(client: &C, logger: &dyn Logger, target: &PublishTarget) -> Completion
where
    C: RegistryClient + ?Sized,
{
    match resolve_and_publish(client, target).await {
        Ok(Step::Skipped(_)) => {
            logger.info(&report::up_to_date(target));
            Completion::UpToDate
        }
        Ok(Step::Published(outcome)) => {
            logger.info(&report::published(target, outcome));
            if target.dry_run {
                logger.info(&report::dry_run());
            }
            Completion::Published(outcome)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "publish workflow failed");
            logger.error(&report::failure(target));
            logger.error(&report::cause(&e));
            Completion::Failed
        }
    }
}

async fn resolve_and_publish<C>(client: &C, target: &PublishTarget) -> anyhow::Result<Step>
where
    C: RegistryClient + ?Sized,
{
    let outcome = resolver::resolve(client, target).await?;
    publisher::publish(client, target, outcome).await
}
