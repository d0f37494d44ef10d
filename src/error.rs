//! Error types for coding operations.

use thiserror::Error;

/// Result type alias for coding operations.
pub type Result<T> = core::result::Result<T, HuffmanError>;

#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A character other than '0' or '1' in a bit string handed to the packer.
    #[error("invalid character {found:?} in bit string at position {position}")]
    InvalidBit { found: char, position: usize },

    /// I/O failure from the underlying byte store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frequency analysis over zero symbols.
    #[error("cannot build a code from empty input")]
    EmptyInput,

    /// Tree construction needs at least two leaves.
    #[error("need at least two leaves to build a tree, got {count}")]
    TooFewLeaves { count: usize },

    /// A byte outside the 128-symbol alphabet.
    #[error("symbol {symbol} at position {position} is outside the alphabet")]
    SymbolOutOfAlphabet { symbol: u8, position: usize },

    /// A symbol with no entry in the code table.
    #[error("no code for symbol {symbol}")]
    MissingCode { symbol: u8 },

    /// Bit string ended in the middle of a code (strict decode only).
    #[error("bit string ends with {trailing_bits} bits of an incomplete code")]
    TruncatedCode { trailing_bits: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HuffmanError {
    pub fn config(message: impl Into<String>) -> Self {
        HuffmanError::Config(message.into())
    }

    /// Static label used in log lines.
    pub fn category(&self) -> &'static str {
        match self {
            HuffmanError::InvalidBit { .. } => "format",
            HuffmanError::Io(_) => "io",
            HuffmanError::EmptyInput => "empty_input",
            HuffmanError::TooFewLeaves { .. } => "too_few_leaves",
            HuffmanError::SymbolOutOfAlphabet { .. } => "alphabet",
            HuffmanError::MissingCode { .. } => "missing_code",
            HuffmanError::TruncatedCode { .. } => "truncated_code",
            HuffmanError::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        let err = HuffmanError::InvalidBit { found: '2', position: 3 };
        assert_eq!(err.category(), "format");
        assert_eq!(err.to_string(), "invalid character '2' in bit string at position 3");

        let io: HuffmanError = std::io::Error::other("disk gone").into();
        assert_eq!(io.category(), "io");
    }
}
