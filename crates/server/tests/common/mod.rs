//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `quipster-server`
//! integration tests. `TestApp` spawns a real server on a random port, either
//! wired to in-process stubs (`TestApp::spawn`) or to a prepared `AppState`
//! (`TestApp::spawn_with_state`).

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use quipster::{AudioStore, CommentGenerator, LinkClassifier};
use quipster_server::{
    router::{self, AUDIO_ROUTE},
    state::AppState,
};
use quipster_test_utils::{MockAiProvider, MockSpeechProvider, StubFetcher};
use reqwest::Client;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const STUB_COMMENTS: &str = "1. Bhai ye toh legend nikla 😂\n2. Mujhe bhi aisa dost chahiye 🤣";
pub const STUB_AUDIO: &[u8] = b"ID3-stub-mp3-bytes";

/// The stubbed collaborators a `TestApp` was built with, kept for assertions.
pub struct Stubs {
    pub ai_provider: MockAiProvider,
    pub speech_provider: MockSpeechProvider,
    pub youtube: Arc<StubFetcher>,
    pub instagram: Arc<StubFetcher>,
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub audio_dir: PathBuf,
    pub app_state: AppState,
    _audio_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with stub fetchers, a mock AI provider that always
    /// answers with `STUB_COMMENTS`, and a working mock speech provider.
    pub async fn spawn() -> Result<(Self, Stubs)> {
        Self::spawn_with(
            MockAiProvider::with_response(STUB_COMMENTS),
            MockSpeechProvider::new(STUB_AUDIO),
        )
        .await
    }

    pub async fn spawn_with(
        ai_provider: MockAiProvider,
        speech_provider: MockSpeechProvider,
    ) -> Result<(Self, Stubs)> {
        let audio_dir = tempdir()?;
        let youtube = StubFetcher::youtube("Video Title: Cat Fails\nUploader: Cat Channel");
        let instagram = StubFetcher::instagram("Instagram Reel Caption: Monday mood");

        let app_state = AppState {
            classifier: Arc::new(LinkClassifier::new(youtube.clone(), instagram.clone())),
            comment_generator: Arc::new(CommentGenerator::new(Box::new(ai_provider.clone()))),
            speech_provider: Arc::new(speech_provider.clone()),
            audio_store: AudioStore::new(audio_dir.path(), AUDIO_ROUTE),
            speech_language: "hi".to_string(),
        };

        let mut app = Self::spawn_with_state(app_state).await?;
        app._audio_dir = Some(audio_dir);

        let stubs = Stubs {
            ai_provider,
            speech_provider,
            youtube,
            instagram,
        };
        Ok((app, stubs))
    }

    pub async fn spawn_with_state(app_state: AppState) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let audio_dir = app_state.audio_store.dir().to_path_buf();
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            audio_dir,
            app_state: app_state_for_harness,
            _audio_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Lists the finished `.mp3` clips in the audio directory.
    pub fn stored_clips(&self) -> Vec<String> {
        let mut clips: Vec<String> = std::fs::read_dir(&self.audio_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .filter(|name| name.ends_with(".mp3"))
                    .collect()
            })
            .unwrap_or_default();
        clips.sort();
        clips
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
