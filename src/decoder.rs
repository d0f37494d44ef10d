use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::io::SymbolSink;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Walks the tree one bit at a time, emitting a symbol at every leaf.
///
/// '0' goes left and anything else goes right. Bits left over after the
/// last complete code are dropped unless `strict` is set. Returns the
/// number of symbols written.
pub fn decode<S: SymbolSink>(
    tree: &HuffmanTree,
    bits: &str,
    sink: &mut S,
    strict: bool,
) -> Result<usize> {
    let root = tree.root();
    let mut node = root;
    let mut pending = 0usize;
    let mut written = 0usize;

    for bit in bits.chars() {
        let next = if bit == '0' { node.left() } else { node.right() };
        // only a leaf root has no children, and build() never produces one
        node = next.unwrap_or(root);
        pending += 1;

        if let HuffmanNode::Leaf(data) = node {
            if let Some(symbol) = data.symbol() {
                sink.write_symbol(symbol)?;
                written += 1;
            }
            node = root;
            pending = 0;
        }
    }

    if pending > 0 {
        if strict {
            return Err(HuffmanError::TruncatedCode { trailing_bits: pending });
        }
        debug!(trailing_bits = pending, "dropping incomplete trailing code");
    }
    debug!(symbols = written, "decoded bit string");
    Ok(written)
}
