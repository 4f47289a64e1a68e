use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs the global `env_logger` backend.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `debug` for `verbose`
/// runs and `info` for everything else.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Several tests in one process call `init`; only the first installs the logger.
    let _ = builder.try_init();
}
