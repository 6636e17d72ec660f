use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Generic,
    Forbidden,
    NotFound,
    RateLimited,
}

/// Failure reported by the membership service for an add or remove request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct MemberActionError {
    pub code: ErrorCode,
    pub message: String,
}

impl MemberActionError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Generic, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_message() {
        let err = MemberActionError::new(ErrorCode::Forbidden, "not an admin");
        assert_eq!(err.to_string(), "Forbidden: not an admin");
        assert_eq!(MemberActionError::generic("boom").code, ErrorCode::Generic);
    }
}
