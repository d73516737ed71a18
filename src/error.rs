//! Error types shared by both maps and their cursors.

use thiserror::Error;

/// Failure of a lookup, removal or cursor operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum MapError {
    /// The map is empty, the key is absent, or the position is the end sentinel.
    #[error("entry not found")]
    NotFound,
    /// Dereferencing the end sentinel, stepping past the end, or stepping before the beginning.
    #[error("invalid cursor operation")]
    InvalidOperation,
}

/// Failure of `insert`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum InsertError {
    /// An entry with an equal key is already present; it is left untouched.
    #[error("an entry with this key is already present")]
    DuplicateKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(MapError::NotFound.to_string(), "entry not found");
        assert_eq!(MapError::InvalidOperation.to_string(), "invalid cursor operation");
        assert_eq!(
            InsertError::DuplicateKey.to_string(),
            "an entry with this key is already present"
        );
    }
}
