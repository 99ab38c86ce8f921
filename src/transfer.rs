//! Moving items between independently maintained heaps.

use std::collections::BTreeSet;

use crate::heap::{Heap, HeapError};
use crate::item::Item;
use crate::oracle::Oracle;

/// Insert every item of `source` into `target`, in source sequence order.
///
/// `source` is left untouched; whether its backing store is subsequently
/// cleared is the caller's decision.
pub fn merge_all(source: &Heap, target: &mut Heap, oracle: &mut dyn Oracle) {
    for item in source.items() {
        target.insert(item.clone(), oracle);
    }
}

/// Pop the top of `source` and insert it into `target`.
///
/// Returns the moved item, or [`HeapError::Empty`] when `source` has
/// nothing to give.
pub fn transfer_one(
    source: &mut Heap,
    target: &mut Heap,
    oracle: &mut dyn Oracle,
) -> Result<Item, HeapError> {
    let item = source.pop_top(oracle)?;
    target.insert(item.clone(), oracle);
    Ok(item)
}

/// Partition `source` in place, extracting the items `select` picks.
///
/// The predicate sees every item at its current index before any mutation;
/// only then are the selected items heap-inserted into a fresh heap and
/// their indices removed from `source` highest-first, exactly as
/// [`Heap::delete_many`] does. The extracted heap is returned; the
/// remainder is `source`.
pub fn split<F>(source: &mut Heap, mut select: F, oracle: &mut dyn Oracle) -> Heap
where
    F: FnMut(usize, &Item) -> bool,
{
    let selected: Vec<usize> = source
        .items()
        .iter()
        .enumerate()
        .filter(|(index, item)| select(*index, item))
        .map(|(index, _)| index)
        .collect();

    let mut extracted = Heap::new();
    for &index in &selected {
        extracted.insert(source.items()[index].clone(), oracle);
    }

    let indices: BTreeSet<usize> = selected.into_iter().collect();
    source.delete_many(&indices, oracle);
    extracted
}
