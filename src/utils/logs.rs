use tracing::Level;
use crate::core::domain::{Configuration, Runtime};

// setup_tracing installs the global subscriber; lambda deployments always log json
// without ansi colors or timestamps so CloudWatch renders them cleanly.
pub fn setup_tracing(config: &Configuration) {
    let level = log_level(config);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        // disable printing the name of the module in every log line.
        .with_target(false);
    let _ = if config.runtime == Runtime::Lambda {
        builder.with_ansi(false).without_time().json().try_init()
    } else if config.json_logs {
        builder.with_ansi(false).json().try_init()
    } else {
        builder.try_init()
    };
}

pub(crate) fn log_level(config: &Configuration) -> Level {
    config.log_level.parse::<Level>().unwrap_or(Level::INFO)
}
