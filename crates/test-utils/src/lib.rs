use async_trait::async_trait;
use quipster::errors::{FetchError, PromptError, SpeechError};
use quipster::{AiProvider, FallbackReason, SpeechProvider, VideoInfoFetcher};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    default_response: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that answers every prompt with `response`.
    pub fn with_response(response: &str) -> Self {
        let provider = Self::new();
        *provider.default_response.lock().unwrap() = Some(response.to_string());
        provider
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the user prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded `(system, user)` prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        self.default_response.lock().unwrap().clone().ok_or_else(|| {
            PromptError::AiApi(format!(
                "MockAiProvider: No response programmed for user prompt. Got: '{user_prompt}'"
            ))
        })
    }
}

// --- Mock Speech Provider ---

/// Records every synthesis request and answers with fixed audio bytes,
/// or with an API error when built with [`MockSpeechProvider::failing`].
#[derive(Clone, Debug)]
pub struct MockSpeechProvider {
    audio: Option<Vec<u8>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockSpeechProvider {
    pub fn new(audio: &[u8]) -> Self {
        Self {
            audio: Some(audio.to_vec()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            audio: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded `(text, lang)` pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), lang.to_string()));

        self.audio.clone().ok_or(SpeechError::Api {
            status: 503,
            body: "MockSpeechProvider: configured to fail".to_string(),
        })
    }
}

// --- Stub Fetcher ---

/// A video info fetcher with a canned description. `None` simulates a
/// network failure, which surfaces as the fetcher's source fallback.
#[derive(Debug)]
pub struct StubFetcher {
    name: &'static str,
    fallback: FallbackReason,
    text: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(name: &'static str, fallback: FallbackReason, text: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            name,
            fallback,
            text: text.map(String::from),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn youtube(text: &str) -> Arc<Self> {
        Self::new("youtube", FallbackReason::VideoLookupFailed, Some(text))
    }

    pub fn instagram(text: &str) -> Arc<Self> {
        Self::new("instagram", FallbackReason::PostUnavailable, Some(text))
    }

    /// The links this fetcher was asked about.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoInfoFetcher for StubFetcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn source_fallback(&self) -> FallbackReason {
        self.fallback
    }

    async fn fetch(&self, link: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(link.to_string());
        self.text
            .clone()
            .ok_or_else(|| FetchError::Decode(format!("StubFetcher: no content for '{link}'")))
    }
}
