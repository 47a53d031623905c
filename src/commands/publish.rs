use crate::config::Settings;
use crate::logger;
use crate::outcome::Outcome;
use crate::registry::NpmClient;
use crate::report;
use crate::workflow;
use crate::PublishArgs;

pub async fn run(args: PublishArgs) -> i32 {
    let log = logger::create(args.silent);

    let settings = match Settings::resolve(&args) {
        Ok(settings) => settings,
        Err(e) => {
            log.error(&report::setup_failure());
            log.error(&report::cause(&e));
            return Outcome::Error.code();
        }
    };
    tracing::debug!(?settings, "resolved settings");

    let client = NpmClient::new(&settings.client);
    workflow::run(&client, log.as_ref(), &settings.target)
        .await
        .exit_code()
}
