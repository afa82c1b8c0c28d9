//! shopfront binary entrypoint kept minimal. The full runtime lives in `app`.

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

use shopfront::{app, args::Args, theme};

struct ShopfrontTimer;

impl tracing_subscriber::fmt::time::FormatTime for ShopfrontTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// `RUST_LOG` when set, otherwise the level from the command line.
fn env_filter(default_level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
}

/// Initialize tracing writing to ~/.config/shopfront/logs/shopfront.log
fn init_logging(level: &str) {
    let mut log_path = theme::logs_dir();
    log_path.push("shopfront.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(ShopfrontTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // stderr fallback so startup never blocks on the log file
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ShopfrontTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.log_level());

    let settings = args.apply_to(theme::settings());
    tracing::info!(
        offline = settings.offline,
        api_url = %settings.api_url,
        page_size = settings.page_size,
        "shopfront starting"
    );
    if let Err(err) = app::run(args, settings).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("shopfront: {err}");
        std::process::exit(1);
    }
    tracing::info!("shopfront exited");
}

#[cfg(test)]
mod tests {
    /// What: FormatTime impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn shopfront_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::ShopfrontTimer;
        let _ = t.format_time(&mut writer);
        assert!(!buf.is_empty());
    }
}
