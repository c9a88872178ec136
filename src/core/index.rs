//! Memory-ordered process index
//!
//! A binary search tree keyed on `(memory_bytes, pid)`. Nodes live in a `Vec`
//! and link to their children by position, so the whole tree is freed in one
//! go when the refresh cycle that built it ends. The tree is not rebalanced;
//! insert and traversal are iterative, so a degenerate (sorted) insertion
//! order costs time but never stack depth.

use std::cmp::Ordering;

use super::record::ProcessRecord;

#[derive(Debug)]
struct Node {
    record: ProcessRecord,
    /// Smaller keys
    left: Option<usize>,
    /// Larger keys
    right: Option<usize>,
}

/// Ordered collection of process records, highest memory first on traversal.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, keeping `(memory_bytes, pid)` order.
    ///
    /// Returns `false` and drops `record` if an entry with the same key is
    /// already present; the existing entry is kept.
    pub fn insert(&mut self, record: ProcessRecord) -> bool {
        let key = record.key();
        let new_id = self.nodes.len();

        let Some(mut current) = self.root else {
            self.root = Some(new_id);
            self.nodes.push(Node { record, left: None, right: None });
            return true;
        };

        loop {
            let node = &mut self.nodes[current];
            let slot = match key.cmp(&node.record.key()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
            match *slot {
                Some(child) => current = child,
                None => {
                    *slot = Some(new_id);
                    break;
                }
            }
        }

        self.nodes.push(Node { record, left: None, right: None });
        true
    }

    /// Records in strictly descending `(memory_bytes, pid)` order.
    pub fn descending(&self) -> Descending<'_> {
        let mut iter = Descending {
            index: self,
            stack: Vec::new(),
        };
        iter.push_right_spine(self.root);
        iter
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reverse in-order walk over an [`OrderedIndex`].
pub struct Descending<'a> {
    index: &'a OrderedIndex,
    /// Nodes whose right subtree is done but which are not yet yielded
    stack: Vec<usize>,
}

impl<'a> Descending<'a> {
    fn push_right_spine(&mut self, mut next: Option<usize>) {
        while let Some(id) = next {
            self.stack.push(id);
            next = self.index.nodes[id].right;
        }
    }
}

impl<'a> Iterator for Descending<'a> {
    type Item = &'a ProcessRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.index.nodes[id];
        self.push_right_spine(node.left);
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.index.len()))
    }
}

impl<'a> IntoIterator for &'a OrderedIndex {
    type Item = &'a ProcessRecord;
    type IntoIter = Descending<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.descending()
    }
}
