use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initialize the tracing subscriber.
///
/// The verbosity flag sets the default directive; `RUST_LOG` always wins so
/// per-module filters keep working in production.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity_level: Option<tracing::Level>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.unwrap_or(tracing::Level::ERROR).into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
