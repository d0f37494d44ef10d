//! Huffman coding for 7-bit text.
//!
//! ```rust
//! use huffman_coding::HuffmanCoding;
//!
//! let text = b"abracadabra";
//! let coding = HuffmanCoding::from_symbols(text)?;
//! let packed = coding.compress(text)?;
//! assert_eq!(coding.decompress(&packed)?, text);
//! # Ok::<(), huffman_coding::HuffmanError>(())
//! ```
//!
//! The packed form carries no tree; decoding needs the session built from
//! the same source text.

pub mod bits;
pub mod codec;
pub mod codes;
pub mod config;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod io;
pub mod queue;
pub mod tree;

/// Number of symbols in the alphabet.
pub const ALPHABET_SIZE: usize = 128;

pub use codec::{CodingStats, HuffmanCoding};
pub use codes::CodeTable;
pub use config::CodecConfig;
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyTable, SymbolFreq};
pub use tree::{HuffmanNode, HuffmanTree};
