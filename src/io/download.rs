//! Concurrent artifact downloader.
//!
//! Fetches a batch of artifacts with bounded concurrency, streaming each
//! body to disk while hashing it. Verification failures delete the staged
//! file. One task failing never aborts its siblings; cancellation is
//! observed between tasks, so nothing is cut off mid-transfer.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::types::{DownloadTask, DownloaderConfig};
use crate::ui::{Phase, ProgressEvent};

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    #[error("Cancelled")]
    Cancelled,
}

/// Outcome of one download task: the staged file path, or why it failed.
#[derive(Debug)]
pub struct TaskResult {
    pub name: String,
    pub result: Result<PathBuf, DownloadError>,
}

impl TaskResult {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Download every task, at most `config.concurrency` at a time.
///
/// Returns one [`TaskResult`] per input task, in completion order. Progress
/// is reported through `events` as `Downloading` updates; terminal phases
/// are the caller's responsibility. Setting `cancel` stops tasks that have
/// not started yet; in-flight transfers run to completion.
pub async fn download_all(
    client: &Client,
    tasks: Vec<DownloadTask>,
    config: &DownloaderConfig,
    events: mpsc::Sender<ProgressEvent>,
    cancel: Arc<AtomicBool>,
) -> Vec<TaskResult> {
    if tasks.is_empty() {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut set = JoinSet::new();

    for task in tasks {
        let client = client.clone();
        let events = events.clone();
        let cancel = cancel.clone();
        let semaphore = semaphore.clone();
        let retries = config.retries;
        let timeout = config.timeout;
        let url = match &config.mirror {
            Some(mirror) => rewrite_mirror(&task.url, mirror),
            None => task.url.clone(),
        };

        set.spawn(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return TaskResult {
                    name: task.name,
                    result: Err(DownloadError::Cancelled),
                };
            };
            if cancel.load(Ordering::SeqCst) {
                return TaskResult {
                    name: task.name,
                    result: Err(DownloadError::Cancelled),
                };
            }

            let result =
                fetch_with_retries(&client, &task, &url, retries, timeout, &events).await;
            if let Err(e) = &result {
                warn!(task = %task.name, error = %e, "download failed");
            }
            TaskResult {
                name: task.name,
                result,
            }
        });
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        if let Ok(result) = joined {
            results.push(result);
        }
    }
    results
}

/// Retry policy: transport errors are retried up to `retries` extra
/// attempts; integrity and IO failures are final.
async fn fetch_with_retries(
    client: &Client,
    task: &DownloadTask,
    url: &str,
    retries: u32,
    timeout: Duration,
    events: &mpsc::Sender<ProgressEvent>,
) -> Result<PathBuf, DownloadError> {
    let mut attempt = 0;
    loop {
        match fetch_once(client, task, url, timeout, events).await {
            Err(DownloadError::Transport(e)) if attempt < retries => {
                attempt += 1;
                debug!(task = %task.name, attempt, error = %e, "retrying download");
            }
            other => return other,
        }
    }
}

async fn fetch_once(
    client: &Client,
    task: &DownloadTask,
    url: &str,
    timeout: Duration,
    events: &mpsc::Sender<ProgressEvent>,
) -> Result<PathBuf, DownloadError> {
    let filename = crate::filename_from_url(url);
    if filename.is_empty() {
        return Err(DownloadError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("URL has no filename: {url}"),
        )));
    }

    // Stage under a per-task subdirectory: URL basenames are not unique
    // across a batch (tag-named release assets collide)
    let stage_dir = task.dest_dir.join(&task.name);
    tokio::fs::create_dir_all(&stage_dir).await?;
    let dest = stage_dir.join(filename);

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?;

    let total = response.content_length().unwrap_or(0);
    let mut stream = response.bytes_stream();
    let mut file = File::create(&dest).await?;
    let mut hasher = Sha256::new();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        hasher.update(&chunk);
        downloaded += chunk.len() as u64;

        let fraction = if total > 0 {
            downloaded as f64 / total as f64
        } else {
            0.0
        };
        // Drop events when the channel is full; a slow observer must never
        // stall a transfer
        let _ = events
            .try_send(ProgressEvent::new(&task.name, Phase::Downloading).with_fraction(fraction));
    }
    file.flush().await?;
    drop(file);

    // An empty expected digest means the manifest opted out of verification
    if !task.sha256.is_empty() {
        let actual = hex::encode(hasher.finalize());
        if !actual.eq_ignore_ascii_case(&task.sha256) {
            tokio::fs::remove_file(&dest).await.ok();
            return Err(DownloadError::Integrity {
                expected: task.sha256.to_lowercase(),
                actual,
            });
        }
    }

    Ok(dest)
}

/// Replace a URL's scheme and authority with the mirror base, keeping the
/// path and query intact.
pub fn rewrite_mirror(url: &str, mirror: &str) -> String {
    let path = url
        .find("://")
        .map(|scheme_end| &url[scheme_end + 3..])
        .and_then(|rest| rest.find('/').map(|i| &rest[i..]))
        .unwrap_or("/");
    format!("{}{path}", mirror.trim_end_matches('/'))
}
