//! Scripted `TextGenerator` used by unit tests across the crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationOptions, LlmError, TextGenerator};

/// Replays canned replies in order and records every prompt it receives.
/// Once the script runs out every call fails with `EmptyContent`.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replies that satisfy every content slot.
    pub fn happy() -> Self {
        Self::new(vec![
            Ok(VALUE_PROPOSITION_REPLY.to_string()),
            Ok(SCOPE_SUMMARY_REPLY.to_string()),
            Ok(TERMS_REPLY.to_string()),
        ])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub const VALUE_PROPOSITION_REPLY: &str = r#"```json
{
  "introduction": "Widget Pro gives Acme Corp a faster path from order to delivery.",
  "sections": [
    {"title": "Operational Efficiency", "points": ["Cuts manual order entry", "Fewer fulfilment errors"]},
    {"title": "Growth", "points": ["Scales with seasonal demand"]}
  ],
  "conclusion": "Widget Pro pays for itself within the first quarter."
}
```"#;

pub const SCOPE_SUMMARY_REPLY: &str =
    "We will configure Widget Pro for Acme Corp and hand over a production-ready setup.";

pub const TERMS_REPLY: &str = r#"{
  "sections": [
    {"title": "Scope of Services", "content": "Provider delivers Widget Pro as described.", "subsections": null},
    {"title": "Pricing and Payment Terms", "content": "Fees are due as listed.",
     "subsections": [{"title": "Late Payment", "content": "Overdue invoices accrue 1% per month."}]}
  ]
}"#;
