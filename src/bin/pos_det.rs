use anyhow::Context;
use anyhow::Result;

use clap::Parser;

use std::convert::TryFrom;
use std::path::PathBuf;

use tokio::runtime;
use tokio::sync::mpsc;

use tracing::error;
use tracing::info;
use tracing::Level;

use tracing_subscriber::filter::EnvFilter;

use pos_det::configuration::Configuration;
use pos_det::log_sink::LogSink;
use pos_det::provider::ReplayProvider;
use pos_det::report::ReportEncoder;
use pos_det::scheduler::Scheduler;
use pos_det::scheduler::TokioTimer;
use pos_det::session::Session;
use pos_det::settings::SettingsStore;

/// Periodically acquire position fixes and append them to a report log
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Configuration file
    config: PathBuf,
}

fn main() {
    let args = Args::parse();

    let config = match Configuration::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load configuration file: {}", e);
            std::process::exit(1);
        }
    };

    start_tracing(&config);

    let runtime = match runtime::Builder::new_current_thread().enable_all().build() {
        Ok(r) => r,
        Err(e) => {
            error!("unable to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Configuration) -> Result<()> {
    let settings = SettingsStore::open(&config.settings_file)
        .load()
        .with_context(|| format!("loading settings {}", config.settings_file.display()))?;

    info!("loaded settings {:?}", settings);

    let (tx, rx) = mpsc::unbounded_channel();

    let provider = ReplayProvider::load(&config.replay.track, config.replay.latency(), tx.clone())
        .with_context(|| format!("loading track {}", config.replay.track.display()))?;

    let timer = TokioTimer::new(tx);

    let mut sink = LogSink::new(&config.log_file);

    if let Err(e) = sink.mark_session() {
        error!("unable to open report log {}: {}", config.log_file.display(), e);
    }

    let encoder = ReportEncoder::new(config.terminal.clone().into());

    let scheduler = Scheduler::new(provider, timer, sink, encoder, settings, config.interval());

    let mut session = Session::new(scheduler, rx);

    session.run().await?;

    Ok(())
}

fn start_tracing(config: &Configuration) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .finish();

    let filter = tracing::subscriber::with_default(subscriber, || {
        match EnvFilter::try_from(config.clone()) {
            Ok(f) => f,
            Err(e) => {
                error!("{}", e);

                std::process::exit(1);
            }
        }
    });

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("unable to install log subscriber: {}", e);
    }
}
