//! Output file naming and the transcript sidecar.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Title line written at the top of every sidecar.
pub(crate) const SIDECAR_TITLE: &str = "Twitter Critique Podcast";

const SEPARATOR_WIDTH: usize = 50;

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
pub(crate) fn sanitize_handle(handle: &str) -> String {
    let cleaned: String = handle
        .trim()
        .trim_start_matches('@')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_owned()
    } else {
        cleaned
    }
}

/// `{prefix}_{handle}_{YYYYmmdd_HHMMSS}`, shared by the `.txt` and `.mp3`.
pub(crate) fn output_basename(prefix: &str, handle: &str, at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}",
        sanitize_handle(prefix),
        sanitize_handle(handle),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Paths of the sidecar transcript and audio file for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputPaths {
    pub transcript: PathBuf,
    pub audio: PathBuf,
}

impl OutputPaths {
    pub(crate) fn new(dir: &Path, basename: &str) -> Self {
        Self {
            transcript: dir.join(format!("{basename}.txt")),
            audio: dir.join(format!("{basename}.mp3")),
        }
    }
}

pub(crate) fn sidecar_contents(handle: &str, transcript: &str, at: NaiveDateTime) -> String {
    format!(
        "{SIDECAR_TITLE}: @{handle}\nGenerated: {}\n{}\n\n{transcript}",
        at.format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(SEPARATOR_WIDTH)
    )
}

/// Writes the transcript sidecar, creating the output directory if needed.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory or file cannot be written.
pub(crate) async fn write_sidecar(
    path: &Path,
    handle: &str,
    transcript: &str,
    at: NaiveDateTime,
) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(path, sidecar_contents(handle, transcript, at)).await
}
