//! # Voice Clips
//!
//! Stores synthesized speech as one MP3 per request. Every clip gets its own
//! UUID file name and is written to a temporary file first, then renamed, so
//! concurrent requests never overwrite or half-read each other's audio.
//! A store built with [`AudioStore::with_max_clips`] keeps only the newest
//! clips and removes older ones after each save.

use crate::{errors::SpeechError, providers::speech::SpeechProvider};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Language used for the spoken comments.
pub const DEFAULT_SPEECH_LANGUAGE: &str = "hi";

/// Number of clips kept on disk unless configured otherwise.
pub const DEFAULT_MAX_CLIPS: usize = 100;

/// A stored audio clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioClip {
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub public_url: String,
}

/// A directory of audio clips served under a public URL prefix.
#[derive(Debug, Clone)]
pub struct AudioStore {
    dir: PathBuf,
    url_prefix: String,
    max_clips: Option<usize>,
}

impl AudioStore {
    /// `url_prefix` is the route the directory is served from (e.g., "/static").
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            max_clips: None,
        }
    }

    /// Caps the number of stored clips. `0` disables the cap.
    pub fn with_max_clips(mut self, max_clips: usize) -> Self {
        self.max_clips = (max_clips > 0).then_some(max_clips);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the clip directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Writes `audio` under a fresh file name and returns the stored clip.
    pub async fn save(&self, audio: &[u8]) -> Result<AudioClip, SpeechError> {
        let id = Uuid::new_v4();
        let file_name = format!("{id}.mp3");
        let path = self.dir.join(&file_name);
        let tmp_path = self.dir.join(format!(".{id}.mp3.part"));

        let written = match tokio::fs::write(&tmp_path, audio).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        info!(path = %path.display(), bytes = audio.len(), "Stored audio clip");
        if let Some(max_clips) = self.max_clips {
            if let Err(e) = self.prune(&path, max_clips).await {
                warn!(dir = %self.dir.display(), error = %e, "Failed to prune old audio clips");
            }
        }
        Ok(AudioClip {
            public_url: format!("{}/{file_name}", self.url_prefix),
            file_name,
            path,
        })
    }

    /// Removes the oldest clips so at most `max_clips` remain, never `keep`.
    async fn prune(&self, keep: &Path, max_clips: usize) -> std::io::Result<()> {
        let mut clips: Vec<(SystemTime, PathBuf)> = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == keep || path.extension().and_then(|ext| ext.to_str()) != Some("mp3") {
                continue;
            }
            // Another request may have removed it in the meantime.
            let Ok(modified) = entry.metadata().await.and_then(|m| m.modified()) else {
                continue;
            };
            clips.push((modified, path));
        }

        let excess = (clips.len() + 1).saturating_sub(max_clips);
        if excess == 0 {
            return Ok(());
        }

        clips.sort();
        for (_, path) in clips.into_iter().take(excess) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(path = %path.display(), "Removed old audio clip"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Synthesizes `text` in `lang` and stores the result as a new clip.
pub async fn save_voice(
    provider: &dyn SpeechProvider,
    store: &AudioStore,
    text: &str,
    lang: &str,
) -> Result<AudioClip, SpeechError> {
    let audio = provider.synthesize(text, lang).await?;
    store.save(&audio).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_unique_clips() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), "/static/");

        let first = store.save(b"first").await.unwrap();
        let second = store.save(b"second").await.unwrap();

        assert_ne!(first.file_name, second.file_name);
        assert!(first.public_url.starts_with("/static/"));
        assert!(first.public_url.ends_with(".mp3"));
        assert_eq!(std::fs::read(&first.path).unwrap(), b"first");
        assert_eq!(std::fs::read(&second.path).unwrap(), b"second");

        let leftovers = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .count();
        assert_eq!(leftovers, 0);
    }

    fn stored_clips(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn test_save_keeps_at_most_max_clips() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), "/static").with_max_clips(3);

        let mut last = None;
        for _ in 0..50 {
            last = Some(store.save(b"x").await.unwrap());
        }

        let clips = stored_clips(dir.path());
        assert_eq!(clips.len(), 3);
        assert!(clips.contains(&last.unwrap().file_name));
    }

    #[tokio::test]
    async fn test_pruning_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"keep me").unwrap();
        let store = AudioStore::new(dir.path(), "/static").with_max_clips(1);

        store.save(b"first").await.unwrap();
        let second = store.save(b"second").await.unwrap();

        let mut clips = stored_clips(dir.path());
        clips.sort();
        let mut expected = vec![second.file_name, "notes.txt".to_string()];
        expected.sort();
        assert_eq!(clips, expected);
    }

    #[tokio::test]
    async fn test_zero_max_clips_keeps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path(), "/static").with_max_clips(0);

        for _ in 0..5 {
            store.save(b"x").await.unwrap();
        }

        assert_eq!(stored_clips(dir.path()).len(), 5);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the clip directory should be makes every write fail.
        let blocker = dir.path().join("clips");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let store = AudioStore::new(&blocker, "/static");

        assert!(matches!(store.save(b"x").await, Err(SpeechError::Io(_))));
        assert_eq!(stored_clips(dir.path()), vec!["clips".to_string()]);
    }

    #[tokio::test]
    async fn test_save_fails_when_dir_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = AudioStore::new(dir.path().join("missing"), "/static");
        assert!(matches!(store.save(b"x").await, Err(SpeechError::Io(_))));

        store.ensure_dir().await.unwrap();
        assert!(store.save(b"x").await.is_ok());
    }
}
