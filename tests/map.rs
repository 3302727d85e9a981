use polyseq::{Element, Map};

#[test]
fn insert_get_remove() {
    let mut map = Map::new();
    assert!(map.is_empty());

    assert!(map.insert("k", 1_i64).is_none());
    let old = map.insert("k", 2_i64).unwrap();
    assert!(old.eq_element(&1_i64));

    assert_eq!(map.len(), 1);
    assert!(map.contains_key("k"));
    assert!(map.get("k").unwrap().eq_element(&2_i64));
    assert!(map.get("missing").is_none());

    assert!(map.remove("k").is_some());
    assert!(map.remove("k").is_none());
    assert!(map.is_empty());
}

#[test]
fn values_mutate_in_place() {
    let mut map = Map::new();
    map.insert("n", 1_i64);
    let value = map.get_mut("n").unwrap();
    *value.as_any_mut().downcast_mut::<i64>().unwrap() = 5;
    assert!(map.get("n").unwrap().eq_element(&5_i64));
}

#[test]
fn values_of_different_types_coexist_under_different_keys() {
    let mut map = Map::new();
    map.insert("count", 3_i64);
    map.insert("label", "three".to_string());
    assert!(map.get("count").unwrap().eq_element(&3_i64));
    assert!(map.get("label").unwrap().eq_element(&"three".to_string()));
}

#[test]
fn iteration() {
    let mut map = Map::new();
    map.insert("a", 1_i64);
    map.insert("b", 2_i64);

    assert_eq!(map.iter().len(), 2);
    assert_eq!(map.keys().count(), 2);
    assert_eq!(map.values().count(), 2);

    let keys: Vec<&String> = map.keys().collect();
    assert!(keys.contains(&&"a".to_string()));

    map.clear();
    assert!(map.is_empty());
}

#[test]
fn maps_compare_by_entries() {
    let mut left = Map::new();
    left.insert("a", 1_i64);
    let mut right = Map::new();
    right.insert("a", 1_i64);
    assert_eq!(left, right);

    right.insert("a", 2_i64);
    assert_ne!(left, right);

    right.insert("a", 1_i64);
    right.insert("b", 1_i64);
    assert_ne!(left, right);
}

#[test]
fn clones_are_deep() {
    let mut map = Map::new();
    map.insert("a", 1_i64);
    let copy = map.clone();
    map.insert("a", 2_i64);
    assert!(copy.get("a").unwrap().eq_element(&1_i64));
}

#[test]
fn collecting_entries() {
    let map: Map = vec![("a", 1_i64), ("b", 2)].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert!(map.get("b").unwrap().eq_element(&2_i64));
}
