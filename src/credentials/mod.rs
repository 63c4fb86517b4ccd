mod errors;
mod prompt;
mod resolver;
#[cfg(test)]
pub mod scripted;

pub use errors::PromptError;
pub use prompt::{OperatorPrompt, TerminalPrompt};
pub use resolver::CredentialResolver;
