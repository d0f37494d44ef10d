//! A coding session: the frequency list, tree and code table derived from
//! one input, used to encode that input and decode what it became.

use tracing::{debug, info};

use crate::bits;
use crate::codes::CodeTable;
use crate::config::CodecConfig;
use crate::decoder;
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, SymbolFreq};
use crate::io::{ByteStore, SliceSource, SymbolSink, SymbolSource};
use crate::tree::{HuffmanNode, HuffmanTree};

#[derive(Debug, Clone)]
pub struct HuffmanCoding {
    sorted: Vec<SymbolFreq>,
    tree: HuffmanTree,
    codes: CodeTable,
    distinct: usize,
    strict_decode: bool,
}

/// Size figures for one encoded input.
#[derive(Debug, Clone, PartialEq)]
pub struct CodingStats {
    pub symbols: usize,
    pub distinct: usize,
    pub expected_length: f64,
    pub encoded_bits: usize,
    pub packed_bytes: usize,
}

impl CodingStats {
    /// Packed size relative to one byte per input symbol.
    pub fn ratio(&self) -> f64 {
        if self.symbols == 0 {
            return 0.0;
        }
        self.packed_bytes as f64 / self.symbols as f64
    }
}

impl HuffmanCoding {
    pub fn from_source<S: SymbolSource>(source: &mut S) -> Result<Self> {
        let table = FrequencyTable::from_source(source)?;
        let sorted = table.sorted_list()?;
        let tree = HuffmanTree::build(&sorted)?;
        let codes = CodeTable::generate(&tree, &sorted);
        Ok(HuffmanCoding {
            sorted,
            tree,
            codes,
            distinct: table.distinct(),
            strict_decode: false,
        })
    }

    pub fn from_symbols(data: &[u8]) -> Result<Self> {
        Self::from_source(&mut SliceSource::new(data))
    }

    /// Builds the session from the text held in a store under `name`.
    pub fn from_store<B: ByteStore>(store: &B, name: &str) -> Result<Self> {
        let data = store.read_bytes(name)?;
        Self::from_symbols(&data)
    }

    pub fn with_config(self, config: &CodecConfig) -> Self {
        self.strict(config.strict_decode)
    }

    pub fn strict(mut self, strict_decode: bool) -> Self {
        self.strict_decode = strict_decode;
        self
    }

    pub fn sorted_list(&self) -> &[SymbolFreq] {
        &self.sorted
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn root(&self) -> &HuffmanNode {
        self.tree.root()
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Concatenates the code of every symbol in stream order.
    pub fn encode<S: SymbolSource>(&self, source: &mut S) -> Result<String> {
        let mut bits = String::new();
        while source.has_next() {
            let symbol = source.read_symbol()?;
            let code = self.codes.code(symbol).ok_or(HuffmanError::MissingCode { symbol })?;
            bits.push_str(code);
        }
        debug!(bits = bits.len(), "encoded symbol stream");
        Ok(bits)
    }

    pub fn encode_symbols(&self, data: &[u8]) -> Result<String> {
        self.encode(&mut SliceSource::new(data))
    }

    pub fn decode<S: SymbolSink>(&self, bits: &str, sink: &mut S) -> Result<usize> {
        decoder::decode(&self.tree, bits, sink, self.strict_decode)
    }

    pub fn decode_to_vec(&self, bits: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode(bits, &mut out)?;
        Ok(out)
    }

    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        bits::pack(&self.encode_symbols(data)?)
    }

    pub fn decompress(&self, packed: &[u8]) -> Result<Vec<u8>> {
        self.decode_to_vec(&bits::unpack(packed))
    }

    /// Encodes `data` and writes the packed bytes to `name`. Nothing is
    /// written if encoding or packing fails. Returns the packed size.
    pub fn encode_to_store<B: ByteStore>(
        &self,
        data: &[u8],
        store: &mut B,
        name: &str,
    ) -> Result<usize> {
        let packed = self.compress(data)?;
        store.write_bytes(name, &packed)?;
        info!(name, symbols = data.len(), bytes = packed.len(), "wrote encoded data");
        Ok(packed.len())
    }

    /// Reads packed bytes from `name` and decodes them into `sink`.
    pub fn decode_from_store<B: ByteStore, S: SymbolSink>(
        &self,
        store: &B,
        name: &str,
        sink: &mut S,
    ) -> Result<usize> {
        let packed = store.read_bytes(name)?;
        let written = self.decode(&bits::unpack(&packed), sink)?;
        info!(name, bytes = packed.len(), symbols = written, "decoded stored data");
        Ok(written)
    }

    pub fn stats(&self, data: &[u8]) -> Result<CodingStats> {
        let encoded_bits = self.encode_symbols(data)?.len();
        Ok(CodingStats {
            symbols: data.len(),
            distinct: self.distinct,
            expected_length: self.tree.expected_length(),
            encoded_bits,
            packed_bytes: (encoded_bits + bits::padding_len(encoded_bits)) / 8,
        })
    }
}
