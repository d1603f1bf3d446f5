//! slotgrid - weekly availability publisher
//!
//! Fetches the configured ICS feeds, merges them into weekly availability
//! grids, renders them as markdown, and pushes the result to the schedule
//! repository. One invocation is one batch run; scheduling recurring runs is
//! the host's job (cron, systemd timer, CI).

mod logging;
mod run;

use slotgrid_domain::AppConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging first so .env loading is visible.
    logging::init();

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => warn!(error = %err, "no .env file loaded"),
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = run::run(&config).await {
        error!(error = %err, "publish run failed");
        std::process::exit(1);
    }

    info!("publish run completed");
}
