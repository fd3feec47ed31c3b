//! Error types shared by the coding modules.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring, encoding or decoding a code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed polynomial or code configuration
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A word of the wrong length was handed to the code
    #[error("invalid input length: expected {expected} bits, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// A textual or digit input contained something other than 0 or 1
    #[error("invalid input alphabet: {found:?} at index {index} is not a binary digit")]
    InvalidInputAlphabet { index: usize, found: char },

    /// The received word has a nonzero syndrome that maps to no single-bit error
    #[error("uncorrectable syndrome {syndrome:#b}")]
    UncorrectableSyndrome { syndrome: u32 },

    /// The generator/parity-check pairing cannot correct every single-bit error
    #[error("syndrome table construction fault: {0}")]
    SyndromeTableConstructionFault(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Shorthand for [`Error::SyndromeTableConstructionFault`]
    pub fn construction_fault(message: impl Into<String>) -> Self {
        Error::SyndromeTableConstructionFault(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidInputLength {
            expected: 4,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid input length: expected 4 bits, got 5"
        );

        let err = Error::InvalidInputAlphabet {
            index: 2,
            found: 'x',
        };
        assert_eq!(
            err.to_string(),
            "invalid input alphabet: 'x' at index 2 is not a binary digit"
        );

        let err = Error::UncorrectableSyndrome { syndrome: 0b101 };
        assert_eq!(err.to_string(), "uncorrectable syndrome 0b101");
    }

    #[test]
    fn test_shorthand_constructors() {
        assert_eq!(
            Error::invalid_input("bad"),
            Error::InvalidInput("bad".to_string())
        );
        assert_eq!(
            Error::construction_fault("not bijective"),
            Error::SyndromeTableConstructionFault("not bijective".to_string())
        );
    }
}
