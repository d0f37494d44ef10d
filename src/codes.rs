use tracing::debug;

use crate::ALPHABET_SIZE;
use crate::frequency::SymbolFreq;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Bit-pattern string per symbol; symbols absent from the tree have none.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTable {
    codes: [Option<String>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Looks up the leaf of every listed symbol, '0' for each left turn and
    /// '1' for each right turn.
    pub fn generate(tree: &HuffmanTree, sorted: &[SymbolFreq]) -> Self {
        let mut codes: [Option<String>; ALPHABET_SIZE] = std::array::from_fn(|_| None);
        let mut path = String::new();
        for symbol in sorted.iter().filter_map(SymbolFreq::symbol) {
            path.clear();
            if Self::find_leaf(tree.root(), symbol, &mut path) {
                codes[symbol as usize] = Some(path.clone());
            }
        }
        let table = CodeTable { codes };
        debug!(codes = table.len(), "code table generated");
        table
    }

    /// Depth-first, left before right, stopping at the first match.
    fn find_leaf(node: &HuffmanNode, symbol: u8, path: &mut String) -> bool {
        match node {
            HuffmanNode::Leaf(data) => data.symbol() == Some(symbol),
            HuffmanNode::Internal { l_child, r_child, .. } => {
                path.push('0');
                if Self::find_leaf(l_child, symbol, path) {
                    return true;
                }
                path.pop();

                path.push('1');
                if Self::find_leaf(r_child, symbol, path) {
                    return true;
                }
                path.pop();
                false
            }
        }
    }

    pub fn code(&self, symbol: u8) -> Option<&str> {
        self.codes.get(symbol as usize)?.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.codes.iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
