//! Scripted stand-in for the Gemini client, used by orchestrator and handler tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationBackend, LlmError, StructuredRequest};

/// Replays queued responses in order and records every prompt it receives.
/// Panics if called more times than responses were queued.
#[derive(Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<Option<String>, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<Result<Option<String>, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Convenience: every call succeeds with the given JSON texts.
    pub fn with_texts(texts: &[String]) -> Self {
        Self::new(texts.iter().map(|t| Ok(Some(t.clone()))).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate_structured(
        &self,
        request: StructuredRequest<'_>,
    ) -> Result<Option<String>, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedBackend called more times than scripted")
    }
}
