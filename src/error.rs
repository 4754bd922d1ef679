use std::{error::Error, fmt};

/// Failure talking to the word source or the progress store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator could not be reached at all.
    Unreachable(String),
    /// The collaborator answered but refused the request.
    Rejected(String),
}

impl CollaboratorError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, CollaboratorError::Unreachable(_))
    }
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollaboratorError::Unreachable(reason) => {
                write!(f, "collaborator unreachable: {reason}")
            }
            CollaboratorError::Rejected(reason) => write!(f, "request rejected: {reason}"),
        }
    }
}

impl Error for CollaboratorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CollaboratorError::Unreachable("connection refused".into());
        assert_eq!(err.to_string(), "collaborator unreachable: connection refused");
        assert!(err.is_unreachable());

        let err = CollaboratorError::Rejected("unknown level".into());
        assert_eq!(err.to_string(), "request rejected: unknown level");
        assert!(!err.is_unreachable());
    }
}
