pub mod google;

use crate::errors::SpeechError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for text-to-speech backends.
#[async_trait]
pub trait SpeechProvider: Send + Sync + Debug + DynClone {
    /// Converts `text` into MP3 audio spoken in `lang` (an ISO 639-1 code such as "hi").
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError>;
}

dyn_clone::clone_trait_object!(SpeechProvider);
