use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Sends `tracing` output to `log_file`, filtered by `RUST_LOG` (default `info`).
///
/// Does nothing without a file: the terminal belongs to the game screen.
pub(crate) fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("Failed to install log subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_is_a_no_op() {
        assert!(init_tracing(None).is_ok());
    }

    #[test]
    fn test_second_subscriber_is_reported() {
        let dir = std::env::temp_dir();
        let first = dir.join(format!("blockfall-{}-first.log", std::process::id()));
        let second = dir.join(format!("blockfall-{}-second.log", std::process::id()));

        // the first call may lose to another global subscriber; the second never wins
        let _ = init_tracing(Some(&first));
        let err = init_tracing(Some(&second)).unwrap_err();
        assert!(err.to_string().contains("Failed to install log subscriber"));

        let _ = std::fs::remove_file(first);
        let _ = std::fs::remove_file(second);
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let err = init_tracing(Some(Path::new("/nonexistent-dir/blockfall.log"))).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
