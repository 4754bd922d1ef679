use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

/// Environment variable holding the log filter, e.g. `KIDKEYS_LOG=debug`.
pub const LOG_ENV: &str = "KIDKEYS_LOG";

/// Initialize tracing with a file writer; the terminal itself belongs to the UI.
pub fn init_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    tracing::info!(target: "system", path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_tracing_writes_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("kidkeys.log");

        init_tracing(&path).unwrap();
        tracing::warn!("hello from the test");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("logging initialized"));
        assert!(contents.contains("hello from the test"));

        // a second subscriber cannot be installed
        assert!(init_tracing(&path).is_err());
    }
}
