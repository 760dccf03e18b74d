use ordered_tree::{Node, OrderedTree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, BTreeSet};

use crate::logging::init_test_logging;
use crate::Op;

/// How many copies of each value a tree should be holding.
type Model<T> = BTreeMap<T, usize>;

/// Every value in the model, smallest first, repeated as many times as it was stored.
fn expand<T: Clone>(model: &Model<T>) -> Vec<T> {
    model
        .iter()
        .flat_map(|(value, count)| std::iter::repeat(value.clone()).take(*count))
        .collect()
}

/// Applies a set of operations to a tree and a model of it.
/// This way we can ensure that after a random smattering of inserts
/// and removals we have the same values in both. Returns whether
/// every intermediate check passed.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, model: &mut Model<T>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                *model.entry(x.clone()).or_insert(0) += 1;
            }
            Op::InsertRecursively(x) => {
                tree.insert_recursively(x.clone());
                model.entry(x.clone()).or_insert(1);
            }
            Op::Remove(x) => {
                let expected = match model.get_mut(x) {
                    Some(count) => {
                        *count -= 1;
                        if *count == 0 {
                            model.remove(x);
                        }
                        Some(x.clone())
                    }
                    None => None,
                };
                if tree.remove(x) != expected {
                    return false;
                }
            }
            Op::Traverse => {
                let values: Vec<T> = tree.dfs_in_order().into_iter().cloned().collect();
                if values != expand(model) {
                    return false;
                }
            }
        }
    }

    true
}

/// Inserts the middle of `xs` first and then recurses on either half, which keeps the tree
/// balanced without the tree having to do anything about it.
fn fill_balanced_tree(tree: &mut OrderedTree<i8>, xs: &[i8]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        tree.insert_recursively(xs[mid]);
        fill_balanced_tree(tree, &xs[..mid]);
        fill_balanced_tree(tree, &xs[mid + 1..]);
    }
}

fn same_node<T>(a: Option<&Node<T>>, b: Option<&Node<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_test_logging();
    let mut tree = OrderedTree::new();
    let mut model = Model::new();

    do_ops(&ops, &mut tree, &mut model)
        && tree.len() == model.values().sum::<usize>()
        && tree.dfs_in_order().into_iter().cloned().eq(expand(&model))
        && (i8::MIN..=i8::MAX).all(|x| {
            tree.find(&x).is_some() == model.contains_key(&x)
                && same_node(tree.find(&x), tree.find_recursively(&x))
        })
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x).map(Node::value) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.insert_recursively(*x);
    }
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none() && tree.find_recursively(x).is_none())
}

#[quickcheck]
fn inserts_agree_on_distinct_values(xs: BTreeSet<i8>, seed: Vec<i8>) -> bool {
    // Use `seed` to scramble the otherwise sorted set into some insertion order.
    let mut xs: Vec<_> = xs.into_iter().collect();
    for (i, s) in seed.iter().enumerate() {
        if !xs.is_empty() {
            let j = (*s as u8 as usize) % xs.len();
            let i = i % xs.len();
            xs.swap(i, j);
        }
    }

    let mut iterative = OrderedTree::new();
    let mut recursive = OrderedTree::new();
    for x in &xs {
        iterative.insert(*x);
        recursive.insert_recursively(*x);
    }

    iterative == recursive
        && xs
            .iter()
            .all(|x| same_node(iterative.find(x), iterative.find_recursively(x)))
}

#[quickcheck]
fn remove_present_value(xs: BTreeSet<i8>, pick: usize) -> bool {
    init_test_logging();
    if xs.is_empty() {
        return true;
    }
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let removed = *xs.iter().nth(pick % xs.len()).unwrap();

    let before = tree.len();
    let result = tree.remove(&removed);
    let after = tree.dfs_in_order();

    result == Some(removed)
        && tree.find(&removed).is_none()
        && after.len() == before - 1
        && after.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn remove_missing_value(xs: Vec<i8>, missing: i8) -> bool {
    let mut tree: OrderedTree<_> = xs.into_iter().filter(|x| *x != missing).collect();
    let before: Vec<i8> = tree.dfs_in_order().into_iter().copied().collect();

    tree.remove(&missing).is_none() && tree.dfs_in_order().into_iter().copied().eq(before)
}

#[quickcheck]
fn median_first_insertion_is_balanced(xs: BTreeSet<i8>) -> bool {
    let xs: Vec<_> = xs.into_iter().collect();
    let mut tree = OrderedTree::new();
    fill_balanced_tree(&mut tree, &xs);

    tree.is_balanced() && tree.len() == xs.len()
}

#[quickcheck]
fn second_highest_is_second_to_last_in_order(xs: Vec<i8>, removals: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.into_iter().collect();
    for x in &removals {
        tree.remove(x);
    }

    tree.find_second_highest() == tree.dfs_in_order().into_iter().rev().nth(1)
}

#[test]
fn scenario_traversals() {
    init_test_logging();
    let mut tree = OrderedTree::new();
    tree.insert(10)
        .insert(5)
        .insert(15)
        .insert(3)
        .insert(7)
        .insert(12)
        .insert(18);

    assert_eq!(tree.dfs_in_order(), [&3, &5, &7, &10, &12, &15, &18]);
    assert_eq!(tree.dfs_pre_order(), [&10, &5, &3, &7, &15, &12, &18]);
    assert_eq!(tree.bfs(), [&10, &5, &15, &3, &7, &12, &18]);
}

#[test]
fn scenario_balance_and_second_highest() {
    init_test_logging();
    let bushy: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    let stringy: OrderedTree<_> = [1, 2, 3, 4, 5].into_iter().collect();

    assert!(bushy.is_balanced());
    assert!(!stringy.is_balanced());
    assert_eq!(bushy.find_second_highest(), Some(&8));

    let single: OrderedTree<_> = [1].into_iter().collect();
    let empty: OrderedTree<i32> = OrderedTree::new();
    assert_eq!(single.find_second_highest(), None);
    assert_eq!(empty.find_second_highest(), None);
    assert!(empty.bfs().is_empty());
}

#[test]
fn duplicate_handling_differs_between_inserts() {
    init_test_logging();
    let mut iterative = OrderedTree::new();
    iterative.insert(4).insert(2).insert(4);
    let mut recursive = OrderedTree::new();
    recursive
        .insert_recursively(4)
        .insert_recursively(2)
        .insert_recursively(4);

    assert_eq!(iterative.dfs_in_order(), [&2, &4, &4]);
    assert_eq!(recursive.dfs_in_order(), [&2, &4]);
}
