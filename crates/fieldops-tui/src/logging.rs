use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File-only tracing setup; the terminal itself belongs to the UI.
/// Returns the appender guard, which must stay alive for the process.
pub fn init_logger() -> Result<WorkerGuard> {
    let log_level =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,fieldops_client=debug".to_string());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("fieldops")
        .filename_suffix("log")
        .build("logs")?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&log_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}
