use crate::config::Config;
use log::LevelFilter;
use simplelog::ConfigBuilder;

/// Dependencies whose logs are hidden below `TRACE`.
const FILTERED_MODULES: &[&str] = &["hyper", "tower", "axum", "tokio", "mio"];

pub struct Logger {}

impl Logger {
    /// Initializes the global terminal logger at the configured level.
    pub fn init_logger(config: &Config) {
        let apply_filters = config.log_level_filter != LevelFilter::Trace;
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        if let Err(e) = simplelog::TermLogger::init(
            config.log_level_filter,
            builder.build(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        ) {
            eprintln!("hub-webhook: failed to start logger: {e}");
        }
    }
}
