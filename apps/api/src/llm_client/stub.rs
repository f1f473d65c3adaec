//! Test-only `CompletionBackend` that replays a canned reply and records prompts.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionBackend, CompletionOptions, LlmError};

/// One recorded call: (system, prompt, options).
pub type RecordedCall = (String, String, CompletionOptions);

pub struct StubCompletion {
    reply: Mutex<Option<Result<String, LlmError>>>,
    configured: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubCompletion {
    pub fn replying(text: &str) -> Self {
        Self::with_result(Ok(text.to_string()))
    }

    pub fn failing(err: LlmError) -> Self {
        Self::with_result(Err(err))
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::with_result(Err(LlmError::MissingCredential))
        }
    }

    fn with_result(result: Result<String, LlmError>) -> Self {
        Self {
            reply: Mutex::new(Some(result)),
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for StubCompletion {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string(), options));
        if !self.configured {
            return Err(LlmError::MissingCredential);
        }
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}
