use clap::Parser;
use surplus_cli::SurplusCli;
use surplus_cli::tracing_setup::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = SurplusCli::parse();
    init_tracing(cli.verbose, cli.log_json)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting surplus allocation calculator");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli.execute(&mut out)
}
