mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use engine_logging::{engine_critical, engine_info, engine_warn};
use statusbot_engine::{bootstrap, CancellationToken, PollEngine};

use crate::config::AppConfig;
use crate::logging::LogSettings;

fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables win over it.
    let _ = dotenvy::dotenv();
    let lookup = |key: &str| std::env::var(key).ok();

    let config = match AppConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(err) => {
            logging::initialize(&LogSettings::default());
            engine_critical!("Stopping: {}", err);
            return ExitCode::FAILURE;
        }
    };
    logging::initialize(&config.log);
    engine_info!("Starting homework status bot");

    let engine = match bootstrap(lookup, config.engine) {
        Ok(engine) => engine,
        Err(err) => {
            engine_critical!("Stopping, required configuration is missing: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            engine_critical!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(engine: PollEngine) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(async move {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            match shutdown_signal().await {
                Ok(()) => {
                    engine_info!("Shutdown requested, finishing the current cycle");
                    trigger.cancel();
                }
                Err(err) => engine_warn!("{:#}; graceful shutdown is unavailable", err),
            }
        });
        engine.run(cancel).await;
    });
    Ok(())
}

async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.context("failed to listen for Ctrl-C")?,
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    Ok(())
}
