use std::fmt;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::SymbolFreq;
use crate::queue::Queue;

#[derive(Debug, Clone, PartialEq)]
pub enum HuffmanNode {
    Leaf(SymbolFreq),
    Internal {
        data: SymbolFreq,
        l_child: Box<HuffmanNode>,
        r_child: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Joins two subtrees; `first` becomes the left child.
    fn merge(first: HuffmanNode, second: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            data: SymbolFreq::merged(first.probability() + second.probability()),
            l_child: Box::new(first),
            r_child: Box::new(second),
        }
    }

    pub fn data(&self) -> &SymbolFreq {
        match self {
            HuffmanNode::Leaf(data) => data,
            HuffmanNode::Internal { data, .. } => data,
        }
    }

    pub fn probability(&self) -> f64 {
        self.data().probability()
    }

    pub fn symbol(&self) -> Option<u8> {
        self.data().symbol()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf(_))
    }

    pub fn left(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Leaf(_) => None,
            HuffmanNode::Internal { l_child, .. } => Some(l_child),
        }
    }

    pub fn right(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Leaf(_) => None,
            HuffmanNode::Internal { r_child, .. } => Some(r_child),
        }
    }
}

/// Optimal prefix-code tree, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Builds the tree from a list sorted ascending by probability.
    ///
    /// Leaves wait in a source queue and merged nodes in a target queue.
    /// Both stay sorted, so the two smallest pending nodes are always at
    /// the queue fronts and no heap is needed.
    pub fn build(sorted: &[SymbolFreq]) -> Result<Self> {
        Self::build_observed(sorted, |_| {})
    }

    fn build_observed<F>(sorted: &[SymbolFreq], mut on_enqueue: F) -> Result<Self>
    where
        F: FnMut(&Queue<HuffmanNode>),
    {
        if sorted.len() < 2 {
            return Err(HuffmanError::TooFewLeaves { count: sorted.len() });
        }

        let mut source: Queue<HuffmanNode> = sorted.iter()
            .map(|&entry| HuffmanNode::Leaf(entry))
            .collect();
        let mut target = Queue::new();
        let mut merges = 0usize;

        while !(target.len() == 1 && source.is_empty()) {
            let first = Self::take_smaller(&mut source, &mut target)?;
            let second = Self::take_smaller(&mut source, &mut target)?;
            target.enqueue(HuffmanNode::merge(first, second));
            merges += 1;
            on_enqueue(&target);
        }

        let root = target.dequeue().ok_or(HuffmanError::TooFewLeaves { count: sorted.len() })?;
        debug!(leaves = sorted.len(), merges, "huffman tree built");
        Ok(HuffmanTree { root })
    }

    /// Dequeues the smaller front, preferring the source queue on ties.
    fn take_smaller(
        source: &mut Queue<HuffmanNode>,
        target: &mut Queue<HuffmanNode>,
    ) -> Result<HuffmanNode> {
        let node = match (source.peek(), target.peek()) {
            (Some(s), Some(t)) if s.probability() <= t.probability() => source.dequeue(),
            (Some(_), Some(_)) => target.dequeue(),
            (Some(_), None) => source.dequeue(),
            (None, _) => target.dequeue(),
        };
        node.ok_or(HuffmanError::TooFewLeaves { count: 1 })
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Every leaf with its depth, left to right.
    pub fn leaf_depths(&self) -> Vec<(u8, usize)> {
        let mut leaves = Vec::new();
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf(data) => {
                    if let Some(symbol) = data.symbol() {
                        leaves.push((symbol, depth));
                    }
                }
                HuffmanNode::Internal { l_child, r_child, .. } => {
                    stack.push((r_child, depth + 1));
                    stack.push((l_child, depth + 1));
                }
            }
        }
        leaves
    }

    /// Sum of probability times code length over all leaves.
    pub fn expected_length(&self) -> f64 {
        let mut total = 0.0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf(data) => total += data.probability() * depth as f64,
                HuffmanNode::Internal { l_child, r_child, .. } => {
                    stack.push((l_child, depth + 1));
                    stack.push((r_child, depth + 1));
                }
            }
        }
        total
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(
            f: &mut fmt::Formatter<'_>,
            node: &HuffmanNode,
            depth: usize,
            label: &str,
        ) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match node {
                HuffmanNode::Leaf(data) => {
                    let symbol = data.symbol().unwrap_or(0);
                    writeln!(
                        f,
                        "{indent}{label} leaf {:?} ({symbol}) p={:.4}",
                        symbol as char,
                        data.probability()
                    )
                }
                HuffmanNode::Internal { data, l_child, r_child } => {
                    writeln!(f, "{indent}{label} node p={:.4}", data.probability())?;
                    write_node(f, l_child, depth + 1, "0")?;
                    write_node(f, r_child, depth + 1, "1")
                }
            }
        }
        write_node(f, &self.root, 0, "root")
    }
}
