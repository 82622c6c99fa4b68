//! # Quipster
//!
//! Turns a social-video link into a list of funny comments and a spoken
//! version of them. The library provides the pieces; `quipster-server`
//! wires them behind HTTP:
//!
//! 1. [`LinkClassifier`] derives a [`VideoDescription`] through a
//!    [`VideoInfoFetcher`] plugin (see `quipster-youtube` and `quipster-instagram`).
//! 2. [`CommentGenerator`] sends the description to an [`AiProvider`].
//! 3. [`voice::save_voice`] converts the comments to speech with a
//!    [`SpeechProvider`] and stores the clip in an [`AudioStore`].

pub mod classifier;
pub mod comments;
pub mod errors;
pub mod fetch;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod voice;

pub use classifier::LinkClassifier;
pub use comments::CommentGenerator;
pub use errors::{FetchError, PromptError, SpeechError};
pub use fetch::VideoInfoFetcher;
pub use providers::{ai::AiProvider, speech::SpeechProvider};
pub use types::{DescriptionOutcome, FallbackReason, VideoDescription, VideoSource};
pub use voice::{AudioClip, AudioStore};
