use clap::Parser;
use recur_app::cli::Cli;
use recur_app::command::run;
use recur_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(timezone) = &cli.timezone {
        config.timezone.clone_from(timezone);
    }

    tracing::debug!(config = ?config, "Configuration loaded");

    let level = cli.log_level.as_deref().unwrap_or(config.logging.level.as_str());
    if let Ok(filter) = EnvFilter::try_new(level) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %level, "Invalid log level, keeping warn");
    }

    let output = run(&cli.command, &config)?;
    println!("{output}");

    Ok(())
}
