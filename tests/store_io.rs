use sift_harness::store;
use sift_harness::Item;

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let items = store::load(dir.path().join("nope.txt")).unwrap();
    assert!(items.is_empty());
}

#[test]
fn store_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.txt");

    let items: Vec<Item> = ["call mom", "buy milk"].into_iter().map(Item::new).collect();
    store::store(&items, &path).unwrap();

    assert_eq!(store::load(&path).unwrap(), items);
    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw, "call mom\nbuy milk\n");
}

#[test]
fn blank_lines_are_skipped_and_entries_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.txt");
    std::fs::write(&path, "  call mom  \n\n   \nbuy milk\n").unwrap();

    let items = store::load(&path).unwrap();
    let texts: Vec<&str> = items.iter().map(Item::text).collect();
    assert_eq!(texts, vec!["call mom", "buy milk"]);
}

#[test]
fn store_overwrites_the_destination_fully() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.txt");

    let many: Vec<Item> = ["a", "b", "c"].into_iter().map(Item::new).collect();
    store::store(&many, &path).unwrap();
    let one: Vec<Item> = vec![Item::new("only")];
    store::store(&one, &path).unwrap();

    assert_eq!(store::load(&path).unwrap(), one);
}
