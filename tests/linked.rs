use std::collections::HashMap;

use linked_bst::{Error, Tree};

fn sample() -> Tree<i32> {
    vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect()
}

#[test]
fn inorder_after_inserts() {
    let tree = sample();

    assert_eq!(tree.len(), 7);
    assert_eq!(
        tree.inorder().copied().collect::<Vec<_>>(),
        [1, 3, 4, 5, 7, 8, 9]
    );
}

#[test]
fn remove_node_with_two_children() {
    let mut tree = sample();

    assert_eq!(tree.remove(&5), Ok(5));
    assert_eq!(tree.iter().next(), Some(&4));
    assert_eq!(
        tree.inorder().copied().collect::<Vec<_>>(),
        [1, 3, 4, 7, 8, 9]
    );
    assert_eq!(tree.len(), 6);
}

#[test]
fn remove_absent_item_fails() {
    let mut tree = sample();

    let err = tree.remove(&100).unwrap_err();
    assert_eq!(err, Error::ItemNotFound);
    assert_eq!(err.to_string(), "item not found in tree");
    assert_eq!(tree.len(), 7);
}

#[test]
fn find_absent_item() {
    assert_eq!(sample().find(&100), None);
}

#[test]
fn rebalance_ascending_inserts() {
    let mut tree: Tree<_> = (1..=7).collect();
    tree.rebalance();

    assert!(tree.height() <= Some(2));
    assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn range_find_content_and_sentinel() {
    let tree = sample();

    let mut found: Vec<i32> = tree.range_find(&2, &6).into_iter().copied().collect();
    found.sort_unstable();
    assert_eq!(found, [3, 4, 5]);

    assert_eq!(tree.range_find(&20, &30), [&20, &30]);
}

#[test]
fn works_with_strings() {
    let mut tree: Tree<String> = ["pear", "apple", "fig", "apple"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(tree.find(&"fig".to_string()).map(String::as_str), Some("fig"));
    assert_eq!(tree.successor(&"apple".to_string()).map(String::as_str), Some("fig"));
    assert_eq!(tree.remove(&"apple".to_string()), Ok("apple".to_string()));
    assert!(tree.contains(&"apple".to_string()));

    tree.rebalance();
    assert_eq!(tree.into_sorted_vec(), ["apple", "fig", "pear"]);
}

#[test]
fn extend_and_clear() {
    let mut tree = sample();
    tree.extend(vec![6, 6]);

    assert_eq!(tree.len(), 9);
    assert_eq!(tree.range_find(&6, &6), [&6, &6]);

    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), None);
}

quickcheck::quickcheck! {
    fn inserts_keep_sorted_inorder(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        let mut sorted = xs.clone();
        sorted.sort_unstable();
        tree.len() == xs.len() && tree.inorder().copied().eq(sorted)
    }
}

quickcheck::quickcheck! {
    fn removals_match_counts(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let mut counts = HashMap::new();
        for x in &xs {
            *counts.entry(*x).or_insert(0usize) += 1;
        }

        for x in &removes {
            let before = tree.len();
            match counts.get_mut(x) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    if tree.remove(x) != Ok(*x) || tree.len() != before - 1 {
                        return false;
                    }
                }
                _ => {
                    if tree.remove(x) != Err(Error::ItemNotFound) || tree.len() != before {
                        return false;
                    }
                }
            }
        }

        counts.iter().all(|(x, &count)| tree.contains(x) == (count > 0))
    }
}

quickcheck::quickcheck! {
    fn rebalance_preserves_items_and_bounds_height(xs: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        let before: Vec<i8> = tree.inorder().copied().collect();

        tree.rebalance();

        let bound = ((xs.len() + 1) as f64).log2().ceil() as usize;
        let after: Vec<i8> = tree.inorder().copied().collect();
        before == after && tree.height().map_or(true, |h| h < bound) && tree.is_balanced()
    }
}

quickcheck::quickcheck! {
    fn preorder_and_inorder_hold_the_same_items(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        let mut preorder: Vec<i8> = tree.iter().copied().collect();
        preorder.sort_unstable();
        preorder == tree.inorder().copied().collect::<Vec<_>>()
    }
}
