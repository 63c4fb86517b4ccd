use std::io::{stdin, stdout, BufRead, Write};

use crate::credentials::PromptError;

/// The blocking questions the pipeline may put to the operator.
pub trait OperatorPrompt {
    /// Asks for the passphrase of `account`. Input must not be echoed.
    fn secret(&mut self, account: &str) -> Result<String, PromptError>;

    /// Asks a yes/no question, anything but an explicit yes counts as no.
    fn confirm(&mut self, question: &str) -> Result<bool, PromptError>;
}

/// Reads answers from the controlling terminal.
pub struct TerminalPrompt;

impl OperatorPrompt for TerminalPrompt {
    fn secret(&mut self, account: &str) -> Result<String, PromptError> {
        rpassword::prompt_password(format!("Enter passphrase for wallet {account}\n> "))
            .map_err(|source| PromptError::Secret { account: account.to_string(), source })
    }

    fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let mut output = stdout().lock();
        write!(output, "{question} [y/N]\n> ")?;
        output.flush()?;

        let mut answer = String::new();
        stdin().lock().read_line(&mut answer)?;

        Ok(is_yes(&answer))
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
