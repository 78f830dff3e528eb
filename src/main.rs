mod config;
mod logging;

use clap::Parser;
use config::Config;
use hub_webhook::{http_server, ReceivedDelivery};
use logging::Logger;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    Logger::init_logger(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), String> {
    let validator = Arc::new(config.validator());
    if !validator.has_secret() {
        log::warn!("no webhook secret configured; signatures will not be checked");
    }

    let (addr, mut deliveries) = http_server::start(&config.bind, &config.path, validator).await?;
    log::info!("accepting webhook deliveries on http://{addr}{}", config.path);

    // Accepted deliveries go to stdout as JSON lines, one per delivery.
    let stdout = io::stdout();
    loop {
        tokio::select! {
            received = deliveries.recv() => match received {
                Some(received) => emit_line(&mut stdout.lock(), &received),
                None => return Err("HTTP server stopped".to_string()),
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutting down");
                return Ok(());
            }
        }
    }
}

fn emit_line(out: &mut impl Write, received: &ReceivedDelivery) {
    match serde_json::to_string(received) {
        Ok(line) => {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
        Err(e) => log::error!("failed to serialize delivery {}: {e}", received.delivery_id),
    }
}
