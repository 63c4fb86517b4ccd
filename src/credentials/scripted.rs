use std::collections::VecDeque;

use crate::credentials::{OperatorPrompt, PromptError};

/// Canned operator answers, with a record of every question asked.
#[derive(Default)]
pub struct ScriptedPrompt {
    pub secrets: VecDeque<String>,
    pub confirmations: VecDeque<bool>,
    pub secret_requests: Vec<String>,
    pub confirm_requests: usize
}

impl ScriptedPrompt {
    pub fn with_secrets(secrets: &[&str]) -> Self {
        Self {
            secrets: secrets.iter().map(|secret| secret.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn confirming(mut self, answer: bool) -> Self {
        self.confirmations.push_back(answer);
        self
    }
}

impl OperatorPrompt for ScriptedPrompt {
    fn secret(&mut self, account: &str) -> Result<String, PromptError> {
        self.secret_requests.push(account.to_string());

        self.secrets.pop_front().ok_or_else(|| PromptError::Secret {
            account: account.to_string(),
            source: std::io::ErrorKind::UnexpectedEof.into()
        })
    }

    fn confirm(&mut self, _question: &str) -> Result<bool, PromptError> {
        self.confirm_requests += 1;

        Ok(self.confirmations.pop_front().unwrap_or(false))
    }
}
