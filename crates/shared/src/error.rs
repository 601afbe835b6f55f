use thiserror::Error;

/// Login failures as shown to the operator. All three render as inline text
/// next to the form that produced them; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Local field validation. Never reaches the network.
    #[error("{0}")]
    Validation(&'static str),
    /// The backend explicitly rejected the credentials. Carries the server
    /// message when one was supplied, otherwise a step-appropriate fallback.
    #[error("{0}")]
    Rejected(String),
    /// Network or decode failure. The detail goes to the log; the operator
    /// sees the generic retry text.
    #[error("Connection failed. Please try again.")]
    Transport,
}

impl FlowError {
    pub fn rejected(message: Option<String>, fallback: &str) -> Self {
        match message {
            Some(message) if !message.is_empty() => FlowError::Rejected(message),
            _ => FlowError::Rejected(fallback.to_string()),
        }
    }
}
