use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SURVEY_ENGINE_LOG";

/// Installs a stderr subscriber. `SURVEY_ENGINE_LOG` wins over the configured filter.
pub fn init(configured: Option<&str>) {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => configured
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
