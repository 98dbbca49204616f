//! Scripted `TextModel` used by the generation tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextModel};

/// Replays queued replies in order. An exhausted queue, or a queued `None`,
/// behaves like an API failure. Every prompt received is recorded.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn script<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Option<&'static str>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(String::from)).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replies<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self::script(replies.into_iter().map(Some))
    }

    pub fn failing() -> Self {
        Self::script(Vec::<Option<&'static str>>::new())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(reply)) => Ok(reply),
            _ => Err(LlmError::Api {
                status: 503,
                message: "scripted failure".to_string(),
            }),
        }
    }
}
