//! `pubrelay run`: start the broker.
//!
//! Loads configuration, resolves the pattern, and runs the strategy on a
//! dedicated blocking thread. SIGTERM / Ctrl+C flips the shutdown signal and
//! waits for the relay loop to close its sockets.

use crate::broker::registry::PatternRegistry;
use crate::cli::RunArgs;
use crate::config;
use crate::error::BrokerError;
use crate::logging;
use crate::shutdown;

use super::resolve_source;

pub async fn execute(args: RunArgs) -> Result<(), BrokerError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args
        .sentry_dsn
        .as_ref()
        .map(|dsn| crate::sentry_integration::init(dsn, args.sentry_environment.as_deref()));

    let registry = PatternRegistry::builtin();
    let source = resolve_source(&args.source)?;
    let config = config::load(&*source, registry).await?;
    let strategy = registry.resolve(config.pattern())?;

    tracing::info!(
        pattern = config.pattern(),
        source = source.name(),
        "starting broker"
    );

    let (trigger, shutdown) = shutdown::channel();
    let mut broker = tokio::task::spawn_blocking(move || strategy.bind_and_run(&config, shutdown));

    let joined = tokio::select! {
        joined = &mut broker => joined,
        () = shutdown::signal() => {
            trigger.trigger();
            broker.await
        }
    };

    match joined? {
        Ok(stats) => {
            tracing::info!(
                downstream = stats.downstream,
                upstream = stats.upstream,
                dropped = stats.dropped,
                "broker stopped"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "broker failed");
            Err(e)
        }
    }
}
