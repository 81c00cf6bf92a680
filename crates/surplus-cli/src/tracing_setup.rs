//! Logging setup for the `surplus` binary.
//!
//! Logs go to stderr so that reports and JSON written to stdout stay clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init_tracing(verbose: bool, json: bool) -> anyhow::Result<()> {
    let default_directives = if verbose {
        "surplus=debug,surplus_cli=debug,surplus_calculator=debug"
    } else {
        "surplus=info,surplus_cli=info,surplus_calculator=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
