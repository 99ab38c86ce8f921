//! The heap engine.
//!
//! A contiguous, array-backed binary min-heap over [`Item`]s, ordered by
//! whatever the oracle currently reports. Because verdicts are not
//! guaranteed transitive or stable, the heap property is a *weak* invariant:
//! [`Heap::is_heap`] checks it against the verdicts obtained during that
//! pass, and no global total order is implied. The engine keeps no state of
//! its own between calls; all state is the sequence it wraps.

use std::collections::BTreeSet;

use crate::item::Item;
use crate::oracle::{Oracle, Verdict};

/// Failure surfaced by operations that require a non-empty heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    #[error("heap is empty")]
    Empty,
}

/// An ordered sequence of items satisfying the heap property.
///
/// Index `i`'s children live at `2i + 1` and `2i + 2`; for every child that
/// exists, the parent compares `Less` or `Equal` under the oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heap {
    items: Vec<Item>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a sequence as-is, trusting its order.
    ///
    /// Used when loading a store that already holds heap order; call
    /// [`Heap::heapify`] for an arbitrary sequence.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn peek(&self) -> Option<&Item> {
        self.items.first()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Establish the heap property over an arbitrary sequence.
    ///
    /// Sift-down over every non-leaf index, last parent first.
    pub fn heapify(&mut self, oracle: &mut dyn Oracle) {
        for i in (0..self.items.len() / 2).rev() {
            self.sift_down(i, oracle);
        }
    }

    /// Append `item` and sift it up into place.
    pub fn insert(&mut self, item: Item, oracle: &mut dyn Oracle) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1, oracle);
    }

    /// Remove and return the top item.
    pub fn pop_top(&mut self, oracle: &mut dyn Oracle) -> Result<Item, HeapError> {
        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }
        let top = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0, oracle);
        }
        Ok(top)
    }

    /// Seat `item` at the top and return the old top.
    ///
    /// Passing a clone of the current top re-settles it against possibly
    /// updated verdicts without removing it ("re-queue" semantics).
    pub fn replace_top(&mut self, item: Item, oracle: &mut dyn Oracle) -> Result<Item, HeapError> {
        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }
        let old = std::mem::replace(&mut self.items[0], item);
        self.sift_down(0, oracle);
        Ok(old)
    }

    /// Check the heap property at every index, without mutating.
    ///
    /// The sole correctness oracle for this container: the result is only
    /// meaningful relative to the verdicts obtained during this pass.
    pub fn is_heap(&self, oracle: &mut dyn Oracle) -> bool {
        let len = self.items.len();
        for i in 0..len {
            for child in [2 * i + 1, 2 * i + 2] {
                if child < len
                    && oracle.compare(&self.items[i], &self.items[child]) == Verdict::Greater
                {
                    return false;
                }
            }
        }
        true
    }

    /// Remove the items at `indices` while preserving the heap property of
    /// the remainder.
    ///
    /// Indices are processed in descending order with swap-with-last
    /// truncation, so removing later indices never shifts earlier targets.
    /// Indices that fall outside the shrunk sequence are ignored. After all
    /// removals, each affected slot still in bounds is repaired in whichever
    /// direction the promoted element violated: up when it undercuts its new
    /// parent, down otherwise.
    pub fn delete_many(&mut self, indices: &BTreeSet<usize>, oracle: &mut dyn Oracle) {
        for &index in indices.iter().rev() {
            if index < self.items.len() {
                self.items.swap_remove(index);
            }
        }
        for &index in indices.iter().rev() {
            if index < self.items.len() {
                self.restore(index, oracle);
            }
        }
    }

    /// Repair the heap property around index `i` after an arbitrary
    /// replacement there.
    ///
    /// A last element promoted into an earlier slot can violate either side:
    /// it may undercut its new parent as well as exceed its children. When
    /// the promoted element moves up, the displaced parent lands at `i` and
    /// must itself be re-settled downward.
    fn restore(&mut self, i: usize, oracle: &mut dyn Oracle) {
        if i > 0 {
            let parent = (i - 1) / 2;
            if oracle.compare(&self.items[parent], &self.items[i]) == Verdict::Greater {
                self.items.swap(i, parent);
                self.sift_up(parent, oracle);
                self.sift_down(i, oracle);
                return;
            }
        }
        self.sift_down(i, oracle);
    }

    fn sift_up(&mut self, mut i: usize, oracle: &mut dyn Oracle) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if oracle.compare(&self.items[parent], &self.items[i]) == Verdict::Greater {
                self.items.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize, oracle: &mut dyn Oracle) {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            // Smaller child; ties go to the lower index.
            let child = if right < len
                && oracle.compare(&self.items[left], &self.items[right]) == Verdict::Greater
            {
                right
            } else {
                left
            };
            if oracle.compare(&self.items[i], &self.items[child]) == Verdict::Greater {
                self.items.swap(i, child);
                i = child;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(a: &Item, b: &Item) -> Verdict {
        match a.text().cmp(b.text()) {
            std::cmp::Ordering::Less => Verdict::Less,
            std::cmp::Ordering::Greater => Verdict::Greater,
            std::cmp::Ordering::Equal => Verdict::Equal,
        }
    }

    fn heap_of(texts: &[&str]) -> Heap {
        Heap::from_items(texts.iter().copied().map(Item::new).collect())
    }

    #[test]
    fn pop_top_on_empty_is_an_error() {
        let mut heap = Heap::new();
        assert_eq!(heap.pop_top(&mut lex), Err(HeapError::Empty));
    }

    #[test]
    fn replace_top_on_empty_is_an_error() {
        let mut heap = Heap::new();
        assert_eq!(
            heap.replace_top(Item::new("x"), &mut lex),
            Err(HeapError::Empty)
        );
    }

    #[test]
    fn replace_top_returns_the_old_top_and_reseats() {
        let mut heap = heap_of(&["a", "b", "c"]);
        let old = heap.replace_top(Item::new("z"), &mut lex).unwrap();
        assert_eq!(old.text(), "a");
        assert!(heap.is_heap(&mut lex));
        assert_eq!(heap.peek().unwrap().text(), "b");
    }

    #[test]
    fn delete_repairs_an_upward_violation() {
        // Valid lex heap; deleting index 3 promotes the last leaf "d" under
        // parent "m", a violation only visible on the upward side.
        let mut heap = heap_of(&["a", "m", "b", "n", "o", "c", "d"]);
        assert!(heap.is_heap(&mut lex));

        let indices: BTreeSet<usize> = [3].into_iter().collect();
        heap.delete_many(&indices, &mut lex);

        assert_eq!(heap.len(), 6);
        assert!(heap.is_heap(&mut lex));
    }

    #[test]
    fn delete_ignores_indices_past_the_shrunk_end() {
        let mut heap = heap_of(&["a", "b", "c"]);
        let indices: BTreeSet<usize> = [0, 17].into_iter().collect();
        heap.delete_many(&indices, &mut lex);
        assert_eq!(heap.len(), 2);
        assert!(heap.is_heap(&mut lex));
    }
}
