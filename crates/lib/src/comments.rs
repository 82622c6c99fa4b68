//! # Comment Generation
//!
//! Fills the comment prompt templates with a video description and asks the
//! configured [`AiProvider`] for a list of comments. The instructions and the
//! description go out as one prompt, with the description at the end.

use crate::{
    errors::PromptError,
    prompts::comments::{COMMENT_GENERATION_SYSTEM_PROMPT, COMMENT_GENERATION_USER_PROMPT},
    providers::ai::AiProvider,
};
use tracing::info;

#[derive(Clone, Debug)]
pub struct CommentGenerator {
    ai_provider: Box<dyn AiProvider>,
    system_prompt: String,
    user_prompt: String,
}

impl CommentGenerator {
    /// Creates a generator using the default Hinglish prompts.
    pub fn new(ai_provider: Box<dyn AiProvider>) -> Self {
        Self {
            ai_provider,
            system_prompt: COMMENT_GENERATION_SYSTEM_PROMPT.to_string(),
            user_prompt: COMMENT_GENERATION_USER_PROMPT.to_string(),
        }
    }

    /// Replaces the prompt templates. `{description}` in either template is
    /// substituted with the video description.
    pub fn with_prompts(mut self, system_prompt: String, user_prompt: String) -> Self {
        self.system_prompt = system_prompt;
        self.user_prompt = user_prompt;
        self
    }

    /// Builds the single prompt sent to the model: the instructions, a blank
    /// line, then the filled user template.
    pub fn build_prompt(&self, description: &str) -> String {
        let instructions = self.system_prompt.replace("{description}", description);
        let user = self.user_prompt.replace("{description}", description);
        if instructions.trim().is_empty() {
            user
        } else {
            format!("{}\n\n{user}", instructions.trim_end())
        }
    }

    /// Generates comment text for a description. The output shape is not validated.
    pub async fn generate(&self, description: &str) -> Result<String, PromptError> {
        let prompt = self.build_prompt(description);
        let raw = self.ai_provider.generate("", &prompt).await?;
        let comments = raw.trim().to_string();
        info!(chars = comments.len(), "Generated comments");
        Ok(comments)
    }
}
