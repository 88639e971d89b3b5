//! Dictionary construction and word lookup.
//!
//! The dictionary is a DAWG (directed acyclic word graph): a trie whose
//! common suffixes are shared, built once from a sorted word list and
//! frozen read-only. Supports containment, prefix, and anagram queries.

pub mod loader;
pub mod queries;
pub mod score;

use std::collections::{HashMap, HashSet};

use crate::error::DictionaryError;

/// Query surface of a dictionary backend. Alternative backends (a plain
/// trie, a test stub) can stand in for the DAWG without touching the
/// move validator or session engine.
pub trait WordDictionary: Send + Sync {
    /// True iff `word` is a complete dictionary word. Empty input is false.
    fn contains(&self, word: &str) -> bool;
    /// True iff some dictionary word starts with `prefix`. Empty input is true.
    fn is_prefix(&self, prefix: &str) -> bool;
    /// Up to `limit` words extending `prefix`, ascending lexicographic.
    fn find_by_prefix(&self, prefix: &str, limit: usize) -> Vec<String>;
    /// Up to `limit` distinct words formable from the letter multiset.
    /// `?` is a wildcard standing in for any single letter.
    fn find_anagrams(&self, letters: &str, limit: usize) -> Vec<String>;
    /// Flat letter-value sum; wildcards and unknown characters score zero.
    fn score(&self, word: &str) -> u32;
}

/// A node's structural identity: terminal flag plus its sorted edge set.
/// Two nodes with equal keys are interchangeable and get shared.
type NodeKey = (bool, Vec<(char, u32)>);

#[derive(Debug, Clone, Default)]
struct Node {
    terminal: bool,
    /// Sorted by letter; targets index into the owning arena.
    edges: Vec<(char, u32)>,
}

impl Node {
    fn child(&self, letter: char) -> Option<u32> {
        self.edges
            .binary_search_by_key(&letter, |&(l, _)| l)
            .ok()
            .map(|i| self.edges[i].1)
    }

    fn set_child(&mut self, letter: char, target: u32) {
        match self.edges.binary_search_by_key(&letter, |&(l, _)| l) {
            Ok(i) => self.edges[i].1 = target,
            Err(i) => self.edges.insert(i, (letter, target)),
        }
    }

    fn key(&self) -> NodeKey {
        (self.terminal, self.edges.clone())
    }
}

/// Immutable DAWG dictionary. Root node is index 0.
#[derive(Debug, Clone)]
pub struct Dawg {
    nodes: Vec<Node>,
}

impl Dawg {
    /// Build from words sorted ascending (case already folded by the
    /// caller). Rejects out-of-order input; duplicate adjacent words are
    /// tolerated as no-ops.
    pub fn from_sorted_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = Builder::new();
        for word in words {
            builder.insert(word.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Number of nodes after suffix sharing. A plain trie over the same
    /// words would be at least as large.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk edges from the root along `text`; `None` if the path is absent.
    fn walk(&self, text: &str) -> Option<u32> {
        let mut index = 0u32;
        for letter in text.chars() {
            index = self.nodes[index as usize].child(letter)?;
        }
        Some(index)
    }
}

impl WordDictionary for Dawg {
    fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let normalized = word.to_lowercase();
        match self.walk(&normalized) {
            Some(index) => self.nodes[index as usize].terminal,
            None => false,
        }
    }

    fn is_prefix(&self, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        let normalized = prefix.to_lowercase();
        self.walk(&normalized).is_some()
    }

    fn find_by_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        if limit == 0 {
            return Vec::new();
        }
        let normalized = prefix.to_lowercase();
        let start = match self.walk(&normalized) {
            Some(index) => index,
            None => return Vec::new(),
        };
        // Depth-first with an explicit stack; children pushed in descending
        // letter order so pops run roughly ascending. The final sort makes
        // the result deterministic regardless of traversal order.
        let mut results: Vec<String> = Vec::new();
        let mut stack = vec![(start, normalized)];
        while let Some((index, word)) = stack.pop() {
            if results.len() >= limit {
                break;
            }
            let node = &self.nodes[index as usize];
            if node.terminal {
                results.push(word.clone());
                if results.len() >= limit {
                    break;
                }
            }
            for &(letter, child) in node.edges.iter().rev() {
                let mut next = word.clone();
                next.push(letter);
                stack.push((child, next));
            }
        }
        results.sort();
        results.truncate(limit);
        results
    }

    fn find_anagrams(&self, letters: &str, limit: usize) -> Vec<String> {
        if letters.is_empty() || limit == 0 {
            return Vec::new();
        }
        let normalized = letters.to_lowercase();
        let mut counts = [0u8; 26];
        let mut blanks = 0u8;
        for ch in normalized.chars() {
            if ch == '?' {
                blanks += 1;
            } else if ch.is_ascii_lowercase() {
                counts[(ch as u8 - b'a') as usize] += 1;
            }
        }
        // Backtracking over the remaining-letter multiset, pruned by
        // is_prefix. A word reachable through several wildcard assignments
        // is recorded once via the set.
        let mut results: HashSet<String> = HashSet::new();
        let mut stack = vec![(String::new(), counts, blanks)];
        while let Some((prefix, counts, blanks)) = stack.pop() {
            if results.len() >= limit {
                break;
            }
            if !prefix.is_empty() && self.contains(&prefix) {
                results.insert(prefix.clone());
                if results.len() >= limit {
                    break;
                }
            }
            for i in 0..26 {
                if counts[i] == 0 {
                    continue;
                }
                let letter = (b'a' + i as u8) as char;
                let mut next = prefix.clone();
                next.push(letter);
                if !self.is_prefix(&next) {
                    continue;
                }
                let mut next_counts = counts;
                next_counts[i] -= 1;
                stack.push((next, next_counts, blanks));
            }
            if blanks > 0 {
                for i in 0..26 {
                    let letter = (b'a' + i as u8) as char;
                    let mut next = prefix.clone();
                    next.push(letter);
                    if !self.is_prefix(&next) {
                        continue;
                    }
                    stack.push((next, counts, blanks - 1));
                }
            }
        }
        let mut ordered: Vec<String> = results.into_iter().collect();
        ordered.sort();
        ordered.truncate(limit);
        ordered
    }

    fn score(&self, word: &str) -> u32 {
        word.to_lowercase().chars().map(score::letter_value).sum()
    }
}

/// Incremental DAWG builder. Nodes added after the common prefix of the
/// previous word are registered in a dedup table keyed by structural
/// content; an equal registered node replaces the fresh one, collapsing
/// shared suffixes as construction proceeds.
struct Builder {
    nodes: Vec<Node>,
    registry: HashMap<NodeKey, u32>,
    previous: Vec<char>,
    /// Node indices along the previous word's path; `path[0]` is the root.
    path: Vec<u32>,
}

impl Builder {
    fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            registry: HashMap::new(),
            previous: Vec::new(),
            path: vec![0],
        }
    }

    fn insert(&mut self, word: &str) -> Result<(), DictionaryError> {
        let chars: Vec<char> = word.chars().collect();
        if self.previous.as_slice() > chars.as_slice() {
            return Err(DictionaryError::OutOfOrder {
                previous: self.previous.iter().collect(),
                word: word.to_string(),
            });
        }
        let common = common_prefix_len(&self.previous, &chars);
        self.replace_or_register(common);

        let mut node = self.path[common];
        for &letter in &chars[common..] {
            let next = self.nodes.len() as u32;
            self.nodes.push(Node::default());
            self.nodes[node as usize].set_child(letter, next);
            self.path.push(next);
            node = next;
        }
        self.nodes[node as usize].terminal = true;
        self.previous = chars;
        Ok(())
    }

    fn finish(mut self) -> Dawg {
        self.replace_or_register(0);
        self.freeze()
    }

    /// Register (or share) every path node strictly deeper than `index`.
    /// Runs deepest-first so a node's children are already in final form
    /// when its key is computed.
    fn replace_or_register(&mut self, index: usize) {
        while self.path.len() - 1 > index {
            let depth = self.path.len() - 1;
            let node = self.path[depth];
            let key = self.nodes[node as usize].key();
            match self.registry.get(&key) {
                Some(&registered) if registered != node => {
                    let parent = self.path[depth - 1];
                    let letter = self.previous[depth - 1];
                    self.nodes[parent as usize].set_child(letter, registered);
                }
                Some(_) => {}
                None => {
                    self.registry.insert(key, node);
                }
            }
            self.path.pop();
        }
    }

    /// Drop nodes orphaned by sharing and renumber the survivors.
    fn freeze(self) -> Dawg {
        let mut remap: HashMap<u32, u32> = HashMap::new();
        let mut order: Vec<u32> = vec![0];
        remap.insert(0, 0);
        let mut stack = vec![0u32];
        while let Some(index) = stack.pop() {
            for &(_, child) in &self.nodes[index as usize].edges {
                if !remap.contains_key(&child) {
                    remap.insert(child, order.len() as u32);
                    order.push(child);
                    stack.push(child);
                }
            }
        }
        let nodes = order
            .iter()
            .map(|&old| {
                let node = &self.nodes[old as usize];
                Node {
                    terminal: node.terminal,
                    edges: node
                        .edges
                        .iter()
                        .map(|&(letter, target)| (letter, remap[&target]))
                        .collect(),
                }
            })
            .collect();
        Dawg { nodes }
    }
}

fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
