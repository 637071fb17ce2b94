// src/tree.rs

//! The order-statistics tree (`ScoreSet`): a balanced BST over entries,
//! augmented with subtree sizes so rank and index lookups are O(log n).
//!
//! Realized as an arena of nodes (`Vec<Option<Node>>` with a free list for
//! reclaimed slots) rather than a graph of boxed/raw-pointer nodes — the
//! idiomatic-Rust shape for an owned, self-balancing tree with no external
//! aliasing.

use crate::comparator::{compare_entries, MemberKey, ScoreKey};
use crate::entry::Entry;
use bytes::Bytes;
use std::cmp::Ordering;
use std::sync::Arc;

struct Node {
    entry: Arc<Entry>,
    left: Option<usize>,
    right: Option<usize>,
    height: i32,
    size: usize,
}

/// A balanced, size-augmented BST of `Arc<Entry>` ordered by
/// `(score, member)`. Supports O(log n) insert, remove, rank (`index_of`)
/// and positional lookup (`get_by_index`).
#[derive(Default)]
pub struct ScoreSet {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: Option<usize>,
}

impl ScoreSet {
    pub fn new() -> Self {
        ScoreSet {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `entry`. The caller must have already removed any prior
    /// entry for the same member — this tree never deduplicates.
    pub fn insert(&mut self, entry: Arc<Entry>) {
        let new_root = self.insert_rec(self.root, entry);
        self.root = Some(new_root);
    }

    /// Removes the entry with the given `(score, member)` key, returning it
    /// if present.
    pub fn remove(&mut self, score: f64, member: &Bytes) -> Option<Arc<Entry>> {
        let key = ScoreKey::new(score, MemberKey::Bytes(member.clone()));
        let (new_root, removed) = self.remove_rec(self.root, &key);
        self.root = new_root;
        removed
    }

    /// Number of entries strictly less than `probe` under the comparator —
    /// the insertion index for a non-member probe.
    pub fn index_of(&self, probe: &ScoreKey) -> usize {
        self.index_of_rec(self.root, probe)
    }

    /// Entry at position `i` in ascending order, or `None` if out of range.
    pub fn get_by_index(&self, i: usize) -> Option<Arc<Entry>> {
        if i >= self.len() {
            return None;
        }
        let idx = self.find_by_index(self.root.expect("non-empty tree has a root"), i);
        Some(self.node(idx).entry.clone())
    }

    /// Up to `count` entries starting at index `start`, ascending when
    /// `reverse` is false, descending when true.
    pub fn range_by_index(&self, start: usize, count: usize, reverse: bool) -> Vec<Arc<Entry>> {
        let n = self.len();
        let mut result = Vec::new();
        if count == 0 || start >= n {
            return result;
        }
        if !reverse {
            let mut i = start;
            while i < n && result.len() < count {
                result.push(self.get_by_index(i).expect("index within bounds"));
                i += 1;
            }
        } else {
            let mut i = start as isize;
            while i >= 0 && result.len() < count {
                result.push(self.get_by_index(i as usize).expect("index within bounds"));
                i -= 1;
            }
        }
        result
    }

    /// Removes and returns the entry at position `i`, used by ZPOPMAX to
    /// repeatedly pop from the top.
    pub fn pop_by_index(&mut self, i: usize) -> Option<Arc<Entry>> {
        let entry = self.get_by_index(i)?;
        self.remove(entry.score, &entry.member)
    }

    /// Full in-order traversal, for serialization and invariant checks.
    pub fn in_order(&self) -> Vec<Arc<Entry>> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root {
            self.in_order_rec(root, &mut out);
        }
        out
    }

    fn in_order_rec(&self, idx: usize, out: &mut Vec<Arc<Entry>>) {
        let node = self.node(idx);
        if let Some(l) = node.left {
            self.in_order_rec(l, out);
        }
        out.push(node.entry.clone());
        if let Some(r) = node.right {
            self.in_order_rec(r, out);
        }
    }

    fn entry_key(entry: &Entry) -> ScoreKey {
        ScoreKey::new(entry.score, MemberKey::Bytes(entry.member.clone()))
    }

    fn node(&self, idx: usize) -> &Node {
        self.nodes[idx].as_ref().expect("arena slot must be occupied")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        self.nodes[idx].as_mut().expect("arena slot must be occupied")
    }

    fn size_of(&self, idx: Option<usize>) -> usize {
        idx.map_or(0, |i| self.node(i).size)
    }

    fn height_of(&self, idx: Option<usize>) -> i32 {
        idx.map_or(0, |i| self.node(i).height)
    }

    fn alloc(&mut self, entry: Arc<Entry>) -> usize {
        let node = Node {
            entry,
            left: None,
            right: None,
            height: 1,
            size: 1,
        };
        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn free_slot(&mut self, idx: usize) {
        self.nodes[idx] = None;
        self.free.push(idx);
    }

    fn update(&mut self, idx: usize) {
        let left = self.node(idx).left;
        let right = self.node(idx).right;
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let size = 1 + self.size_of(left) + self.size_of(right);
        let node = self.node_mut(idx);
        node.height = height;
        node.size = size;
    }

    fn balance_factor(&self, idx: usize) -> i32 {
        let node = self.node(idx);
        self.height_of(node.left) - self.height_of(node.right)
    }

    fn rotate_left(&mut self, idx: usize) -> usize {
        let r = self.node(idx).right.expect("rotate_left requires a right child");
        let rl = self.node(r).left;
        self.node_mut(r).left = Some(idx);
        self.node_mut(idx).right = rl;
        self.update(idx);
        self.update(r);
        r
    }

    fn rotate_right(&mut self, idx: usize) -> usize {
        let l = self.node(idx).left.expect("rotate_right requires a left child");
        let lr = self.node(l).right;
        self.node_mut(l).right = Some(idx);
        self.node_mut(idx).left = lr;
        self.update(idx);
        self.update(l);
        l
    }

    fn rebalance(&mut self, idx: usize) -> usize {
        self.update(idx);
        let bf = self.balance_factor(idx);
        if bf > 1 {
            let left = self.node(idx).left.expect("bf > 1 implies a left child");
            if self.balance_factor(left) < 0 {
                let new_left = self.rotate_left(left);
                self.node_mut(idx).left = Some(new_left);
            }
            return self.rotate_right(idx);
        }
        if bf < -1 {
            let right = self.node(idx).right.expect("bf < -1 implies a right child");
            if self.balance_factor(right) > 0 {
                let new_right = self.rotate_right(right);
                self.node_mut(idx).right = Some(new_right);
            }
            return self.rotate_left(idx);
        }
        idx
    }

    fn insert_rec(&mut self, idx_opt: Option<usize>, entry: Arc<Entry>) -> usize {
        match idx_opt {
            None => self.alloc(entry),
            Some(idx) => {
                let node_key = Self::entry_key(&self.node(idx).entry);
                let new_key = Self::entry_key(&entry);
                match compare_entries(&new_key, &node_key) {
                    Ordering::Greater => {
                        let right = self.node(idx).right;
                        let new_right = self.insert_rec(right, entry);
                        self.node_mut(idx).right = Some(new_right);
                    }
                    Ordering::Less | Ordering::Equal => {
                        let left = self.node(idx).left;
                        let new_left = self.insert_rec(left, entry);
                        self.node_mut(idx).left = Some(new_left);
                    }
                }
                self.rebalance(idx)
            }
        }
    }

    fn remove_rec(&mut self, idx_opt: Option<usize>, key: &ScoreKey) -> (Option<usize>, Option<Arc<Entry>>) {
        let idx = match idx_opt {
            None => return (None, None),
            Some(idx) => idx,
        };
        let node_key = Self::entry_key(&self.node(idx).entry);
        match compare_entries(&node_key, key) {
            Ordering::Less => {
                let right = self.node(idx).right;
                let (new_right, removed) = self.remove_rec(right, key);
                self.node_mut(idx).right = new_right;
                (Some(self.rebalance(idx)), removed)
            }
            Ordering::Greater => {
                let left = self.node(idx).left;
                let (new_left, removed) = self.remove_rec(left, key);
                self.node_mut(idx).left = new_left;
                (Some(self.rebalance(idx)), removed)
            }
            Ordering::Equal => {
                let removed = self.node(idx).entry.clone();
                let left = self.node(idx).left;
                let right = self.node(idx).right;
                let new_subtree = match (left, right) {
                    (None, None) => {
                        self.free_slot(idx);
                        None
                    }
                    (Some(l), None) => {
                        self.free_slot(idx);
                        Some(l)
                    }
                    (None, Some(r)) => {
                        self.free_slot(idx);
                        Some(r)
                    }
                    (Some(_), Some(r)) => {
                        let (successor, new_right) = self.remove_min(r);
                        self.node_mut(idx).entry = successor;
                        self.node_mut(idx).right = new_right;
                        Some(self.rebalance(idx))
                    }
                };
                (new_subtree, Some(removed))
            }
        }
    }

    fn remove_min(&mut self, idx: usize) -> (Arc<Entry>, Option<usize>) {
        let left = self.node(idx).left;
        match left {
            None => {
                let entry = self.node(idx).entry.clone();
                let right = self.node(idx).right;
                self.free_slot(idx);
                (entry, right)
            }
            Some(l) => {
                let (entry, new_left) = self.remove_min(l);
                self.node_mut(idx).left = new_left;
                (entry, Some(self.rebalance(idx)))
            }
        }
    }

    fn index_of_rec(&self, idx_opt: Option<usize>, probe: &ScoreKey) -> usize {
        match idx_opt {
            None => 0,
            Some(idx) => {
                let node = self.node(idx);
                let node_key = Self::entry_key(&node.entry);
                match compare_entries(&node_key, probe) {
                    Ordering::Less => 1 + self.size_of(node.left) + self.index_of_rec(node.right, probe),
                    Ordering::Equal | Ordering::Greater => self.index_of_rec(node.left, probe),
                }
            }
        }
    }

    fn find_by_index(&self, idx: usize, i: usize) -> usize {
        let node = self.node(idx);
        let left_size = self.size_of(node.left);
        match i.cmp(&left_size) {
            Ordering::Less => self.find_by_index(node.left.expect("i < left_size implies a left child"), i),
            Ordering::Equal => idx,
            Ordering::Greater => {
                self.find_by_index(node.right.expect("i > left_size implies a right child"), i - left_size - 1)
            }
        }
    }
}
