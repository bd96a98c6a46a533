use chrono::Local;
use fern::Dispatch;

/// Sets up a console logger for binaries, examples and tests that want
/// one; the library itself only emits through the `log` facade.
///
/// # Errors
/// * If a global logger is already installed
pub fn setup_logger() -> Result<(), log::SetLoggerError> {
    Dispatch::new()
        // Set logging level from RUST_LOG env var or default to Info
        .level(
            std::env::var("RUST_LOG")
                .map(|level| level.parse().unwrap_or(log::LevelFilter::Info))
                .unwrap_or(log::LevelFilter::Info),
        )
        .chain(std::io::stdout())
        // Format log messages with time, level and emitting module
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ));
        })
        .apply()
}
