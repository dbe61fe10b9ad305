//! Append-only event journal
//!
//! Writes every notice seen on the bus to a file, one JSON object per
//! line, so the day's kiosk traffic can be replayed or audited later.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;

use super::event_bus::EventSubscriber;
use crate::support::errors::InfraError;

/// Drains `subscriber` into `path` until the bus is dropped.
///
/// Returns the number of lines written. The file is created if missing and
/// appended to otherwise.
pub async fn run_event_journal(
    mut subscriber: EventSubscriber,
    path: &Path,
) -> Result<u64, InfraError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    info!("event journal writing to {}", path.display());

    let mut written = 0u64;
    while let Some(message) = subscriber.recv().await {
        let mut line = message.to_json()?;
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        written += 1;
        debug!("journaled {} notice {}", message.notice.notice_type(), message.id);
    }

    if subscriber.missed() > 0 {
        warn!(
            "event journal {} is missing {} notice(s)",
            path.display(),
            subscriber.missed()
        );
    }
    info!("event journal closed after {} line(s)", written);
    Ok(written)
}

/// Runs [`run_event_journal`] on its own task.
///
/// Takes an already-made subscriber so nothing published after this call
/// is lost while the task starts.
pub fn spawn_event_journal(
    subscriber: EventSubscriber,
    path: PathBuf,
) -> JoinHandle<Result<u64, InfraError>> {
    tokio::spawn(async move { run_event_journal(subscriber, &path).await })
}
