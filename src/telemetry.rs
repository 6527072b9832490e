//! Log setup. The terminal belongs to the UI, so events go to a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "leader-power.log";

/// `<cache dir>/leader-power/leader-power.log`, or the working directory when
/// the platform has no cache dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("leader-power").join(LOG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

/// Install the global subscriber, appending to `path`.
pub fn init(path: &Path, log_level: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("leader_power=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_log_name() {
        assert!(default_log_path().ends_with(LOG_FILE_NAME));
    }
}
