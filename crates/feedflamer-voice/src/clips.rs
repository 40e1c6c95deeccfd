//! Per-utterance clip files that live only for the duration of one render.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::VoiceError;

/// Owns the clip files written during a render and removes them on drop.
///
/// Names are `.{stem}.clip-{index}-{uuid}.mp3` inside the output directory,
/// so concurrent renders into the same directory never collide.
pub(crate) struct TransientClips {
    dir: PathBuf,
    stem: String,
    paths: Vec<PathBuf>,
}

impl TransientClips {
    pub(crate) fn new(dir: &Path, stem: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            stem: stem.to_owned(),
            paths: Vec::new(),
        }
    }

    /// Writes one clip and tracks it for cleanup.
    pub(crate) async fn write(&mut self, index: usize, audio: &[u8]) -> Result<(), VoiceError> {
        let path = self.dir.join(format!(
            ".{}.clip-{index}-{}.mp3",
            self.stem,
            Uuid::new_v4()
        ));
        // Track before writing so a partial file is still removed.
        self.paths.push(path.clone());
        tokio::fs::write(&path, audio)
            .await
            .map_err(|e| VoiceError::io(&path, e))
    }

    /// Reads every clip back in write order and joins the bytes.
    pub(crate) async fn concatenate(&self) -> Result<Vec<u8>, VoiceError> {
        let mut joined = Vec::new();
        for path in &self.paths {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| VoiceError::io(path, e))?;
            joined.extend(bytes);
        }
        Ok(joined)
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Drop for TransientClips {
    fn drop(&mut self) {
        for path in self.paths.drain(..) {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::debug!(path = %path.display(), error = %e, "could not remove clip");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().contains(".clip-"))
            .collect()
    }

    #[tokio::test]
    async fn clips_are_named_uniquely_and_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut clips = TransientClips::new(dir.path(), "show");
            clips.write(0, b"aa").await.unwrap();
            clips.write(0, b"bb").await.unwrap();
            assert_eq!(clips.len(), 2);

            let files = clip_files(dir.path());
            assert_eq!(files.len(), 2, "same index must not collide");
            for f in &files {
                let name = f.file_name().unwrap().to_string_lossy().into_owned();
                assert!(name.starts_with(".show.clip-0-"), "{name}");
                assert!(name.ends_with(".mp3"), "{name}");
            }
        }
        assert!(clip_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn concatenate_preserves_write_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut clips = TransientClips::new(dir.path(), "x");
        clips.write(0, b"one-").await.unwrap();
        clips.write(1, b"two-").await.unwrap();
        clips.write(2, b"three").await.unwrap();
        assert_eq!(clips.concatenate().await.unwrap(), b"one-two-three");
    }

    #[tokio::test]
    async fn failed_write_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut clips = TransientClips::new(&missing, "x");
        let err = clips.write(0, b"a").await.unwrap_err();
        assert!(matches!(err, VoiceError::Io { ref path, .. } if path.starts_with(&missing)));
    }
}
