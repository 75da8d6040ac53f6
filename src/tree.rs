use derivative::Derivative;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyMap;

/// A node of the Huffman tree.
///
/// Nodes compare by `(weight, seq)` only, so the priority queue pops the
/// lightest node first and resolves equal weights by creation order. Leaves
/// are created in ascending symbol order before any internal node.
#[derive(Debug, Clone, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub struct Node {
    weight: u64,
    seq: usize,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(u8),
    Internal { left: Box<Node>, right: Box<Node> },
}

impl Node {
    fn leaf(symbol: u8, weight: u64, seq: usize) -> Self {
        Self {
            weight,
            seq,
            kind: NodeKind::Leaf(symbol),
        }
    }

    fn from_children(left: Node, right: Node, seq: usize) -> Self {
        Self {
            weight: left.weight + right.weight,
            seq,
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The symbol held by a leaf; `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    /// The `(left, right)` children of an internal node; `None` for leaves.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => Some((left, right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the tree for `frequencies`, or `None` when there are no symbols.
    ///
    /// A single distinct symbol yields a bare leaf as the root.
    pub fn build(frequencies: &FrequencyMap) -> Option<Self> {
        let mut pq: BinaryHeap<_> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, count))| Reverse(Node::leaf(symbol, count, seq)))
            .collect();
        let mut next_seq = pq.len();

        loop {
            let Reverse(left) = pq.pop()?;
            let Some(Reverse(right)) = pq.pop() else {
                return Some(Self { root: left });
            };

            pq.push(Reverse(Node::from_children(left, right, next_seq)));
            next_seq += 1;
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight of the tree, equal to the length of the counted buffer.
    pub fn weight(&self) -> u64 {
        self.root.weight
    }
}
