use std::cmp::Ordering;

use sift_harness::{merge_all, split, transfer_one, Heap, HeapError, Item, Verdict};

fn lex(a: &Item, b: &Item) -> Verdict {
    match a.text().cmp(b.text()) {
        Ordering::Less => Verdict::Less,
        Ordering::Greater => Verdict::Greater,
        Ordering::Equal => Verdict::Equal,
    }
}

fn heap_of(texts: &[&str]) -> Heap {
    let mut heap = Heap::from_items(texts.iter().copied().map(Item::new).collect());
    heap.heapify(&mut lex);
    heap
}

fn sorted_texts(items: &[Item]) -> Vec<String> {
    let mut texts: Vec<String> = items.iter().map(|i| i.text().to_string()).collect();
    texts.sort();
    texts
}

#[test]
fn merge_all_grows_target_and_keeps_source() {
    let source = heap_of(&["d", "a", "f"]);
    let before = source.clone();
    let mut target = heap_of(&["b", "c", "e"]);

    merge_all(&source, &mut target, &mut lex);

    assert_eq!(source, before);
    assert_eq!(target.len(), 6);
    assert!(target.is_heap(&mut lex));
    assert_eq!(
        sorted_texts(target.items()),
        vec!["a", "b", "c", "d", "e", "f"]
    );
}

#[test]
fn transfer_one_moves_exactly_one_item() {
    let mut source = heap_of(&["b", "a", "c"]);
    let mut target = heap_of(&["x", "y"]);

    let moved = transfer_one(&mut source, &mut target, &mut lex).unwrap();

    assert_eq!(moved.text(), "a");
    assert_eq!(source.len(), 2);
    assert_eq!(target.len(), 3);
    assert!(source.is_heap(&mut lex));
    assert!(target.is_heap(&mut lex));
    assert_eq!(target.peek().unwrap().text(), "a");
}

#[test]
fn transfer_one_from_empty_source_fails() {
    let mut source = Heap::new();
    let mut target = heap_of(&["x"]);

    assert_eq!(
        transfer_one(&mut source, &mut target, &mut lex),
        Err(HeapError::Empty)
    );
    assert_eq!(target.len(), 1);
}

#[test]
fn split_partitions_without_loss_or_duplication() {
    let mut source = heap_of(&["e", "b", "a", "d", "c", "f"]);
    let original = sorted_texts(source.items());
    let picked: Vec<String> = source
        .items()
        .iter()
        .enumerate()
        .filter(|(index, _)| index % 2 == 1)
        .map(|(_, item)| item.text().to_string())
        .collect();

    let extracted = split(&mut source, |index, _| index % 2 == 1, &mut lex);

    assert_eq!(source.len() + extracted.len(), original.len());
    assert!(source.is_heap(&mut lex));
    assert!(extracted.is_heap(&mut lex));

    let mut expected_extracted = picked;
    expected_extracted.sort();
    assert_eq!(sorted_texts(extracted.items()), expected_extracted);

    let mut recombined = sorted_texts(source.items());
    recombined.extend(sorted_texts(extracted.items()));
    recombined.sort();
    assert_eq!(recombined, original);
}

#[test]
fn split_selecting_nothing_leaves_source_untouched() {
    let mut source = heap_of(&["c", "a", "b"]);
    let before = source.clone();

    let extracted = split(&mut source, |_, _| false, &mut lex);

    assert!(extracted.is_empty());
    assert_eq!(source, before);
}

#[test]
fn split_selecting_everything_drains_source() {
    let mut source = heap_of(&["c", "a", "b"]);

    let extracted = split(&mut source, |_, _| true, &mut lex);

    assert!(source.is_empty());
    assert_eq!(extracted.len(), 3);
    assert!(extracted.is_heap(&mut lex));
}

#[test]
fn split_predicate_sees_pre_mutation_positions() {
    let mut source = heap_of(&["a", "b", "c", "d"]);
    let layout: Vec<String> = source.items().iter().map(|i| i.text().to_string()).collect();

    let mut seen = Vec::new();
    split(
        &mut source,
        |index, item| {
            seen.push((index, item.text().to_string()));
            false
        },
        &mut lex,
    );

    let expected: Vec<(usize, String)> = layout.into_iter().enumerate().collect();
    assert_eq!(seen, expected);
}
