//! Collaborators at the edge of the codec: where symbols come from, where
//! decoded symbols go, and where packed bytes are kept.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::trace;

use crate::ALPHABET_SIZE;
use crate::error::{HuffmanError, Result};

/// A sequential reader of alphabet symbols.
pub trait SymbolSource {
    fn has_next(&self) -> bool;

    /// Reads the next symbol, rejecting anything outside the alphabet.
    fn read_symbol(&mut self) -> Result<u8>;
}

/// A sequential writer of decoded symbols.
pub trait SymbolSink {
    fn write_symbol(&mut self, symbol: u8) -> Result<()>;
}

/// Named storage for whole byte sequences.
pub trait ByteStore {
    fn write_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
    fn read_bytes(&self, name: &str) -> Result<Vec<u8>>;
}

/// Symbol source over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceSource { data, position: 0 }
    }
}

impl SymbolSource for SliceSource<'_> {
    fn has_next(&self) -> bool {
        self.position < self.data.len()
    }

    fn read_symbol(&mut self) -> Result<u8> {
        let symbol = *self.data.get(self.position).ok_or_else(|| {
            HuffmanError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "symbol source exhausted",
            ))
        })?;
        if symbol as usize >= ALPHABET_SIZE {
            return Err(HuffmanError::SymbolOutOfAlphabet { symbol, position: self.position });
        }
        self.position += 1;
        Ok(symbol)
    }
}

impl SymbolSink for Vec<u8> {
    fn write_symbol(&mut self, symbol: u8) -> Result<()> {
        self.push(symbol);
        Ok(())
    }
}

/// Byte store rooted at a directory. Names are joined onto the root, so an
/// absolute name bypasses it.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsStore { root: root.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ByteStore for FsStore {
    fn write_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(name);
        trace!(path = %path.display(), len = bytes.len(), "writing bytes");
        fs::write(path, bytes)?;
        Ok(())
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        trace!(path = %path.display(), "reading bytes");
        Ok(fs::read(path)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }
}

impl ByteStore for MemoryStore {
    fn write_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.entries.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        self.entries.get(name).cloned().ok_or_else(|| {
            HuffmanError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no entry named {name}"),
            ))
        })
    }
}
