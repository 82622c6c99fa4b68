//! # Prompt Templates
//!
//! Default prompt templates used by the `quipster` library. They can be
//! overridden through the server configuration.

pub mod comments;
