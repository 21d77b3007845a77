use std::fmt;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Provider,
    Unexpected,
}

/// `cause` carries the detailed text meant for logs, `message` the text that
/// may be handed back to a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierError {
    pub kind: ErrorKind,
    pub status_code: u16,
    pub cause: String,
    pub message: Option<String>,
}

impl NotifierError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            status_code: 500,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn validation(cause: &str) -> Self {
        Self {
            kind: ErrorKind::Validation,
            status_code: 400,
            cause: cause.to_string(),
            message: Some(cause.to_string()),
        }
    }

    pub fn provider(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            kind: ErrorKind::Provider,
            status_code: 502,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    /// Text safe to return to the caller. Unexpected failures never leak their cause.
    pub fn caller_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation => self.message.clone().unwrap_or(self.cause.clone()),
            ErrorKind::Provider | ErrorKind::Unexpected => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }
}

impl std::error::Error for NotifierError {}

impl fmt::Display for NotifierError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.message {
            Some(message) if message != &self.cause => write!(f, "{} - Cause: {}", message, self.cause),
            _ => write!(f, "{}", self.cause),
        }
    }
}
