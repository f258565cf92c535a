use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::tm::class::{Element, EquivalenceClass};
use crate::tm::encoding::{ParsedTree, Scope, TreeEncoding};
use crate::tm::error::MineResult;
use crate::tm::occurrences::{LabelRecord, OccurrenceKind, OccurrenceList, VectorRecord};

/// Labels occurring in at least `min_support` distinct trees, ascending.
pub fn frequent_labels(hosts: &[ParsedTree], min_support: usize) -> Vec<String> {
    let mut label_trees: BTreeMap<&str, BTreeSet<usize>> = BTreeMap::new();

    for (tree_idx, host) in hosts.iter().enumerate() {
        for node in &host.nodes {
            label_trees.entry(node.label.as_str()).or_default().insert(tree_idx);
        }
    }

    label_trees
        .into_iter()
        .filter(|(_, trees)| trees.len() >= min_support)
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Root class: empty prefix, one element per frequent label, each with the
/// scope of every node carrying it.
pub fn find_frequent_f1(
    hosts: &[ParsedTree],
    min_support: usize,
    kind: OccurrenceKind,
) -> MineResult<EquivalenceClass> {
    let labels = frequent_labels(hosts, min_support);
    let mut lists: BTreeMap<&str, OccurrenceList> = labels
        .iter()
        .map(|label| (label.as_str(), OccurrenceList::empty(kind)))
        .collect();

    for (tree_idx, host) in hosts.iter().enumerate() {
        for node in &host.nodes {
            if let Some(list) = lists.get_mut(node.label.as_str()) {
                push_single(list, tree_idx, node.scope);
            }
        }
    }

    let mut f1 = EquivalenceClass::new(TreeEncoding::default());
    for (label, list) in lists {
        f1.add_element(Element::new(label, 0), list)?;
    }
    f1.settle();

    debug!(elements = f1.elements().len(), "built root class");
    Ok(f1)
}

/// Two-node classes seeded from the root class: prefix `a`, elements `(b, 0)`
/// for every frequent label `b` found below an `a` node. Pairs are collected
/// over ancestor-descendant relations; direct parent-child occurrence is
/// settled later by the embedded-match filter.
pub fn find_frequent_f2(
    f1: &EquivalenceClass,
    hosts: &[ParsedTree],
    min_support: usize,
    kind: OccurrenceKind,
) -> MineResult<Vec<EquivalenceClass>> {
    let labels: BTreeSet<&str> = f1.elements().iter().map(|e| e.label.as_str()).collect();
    let mut pair_lists: BTreeMap<(&str, &str), OccurrenceList> = BTreeMap::new();

    for (tree_idx, host) in hosts.iter().enumerate() {
        for ancestor in 0..host.len() {
            let Some(&top) = labels.get(host.label(ancestor)) else {
                continue;
            };
            for descendant in host.descendants(ancestor) {
                let Some(&below) = labels.get(host.label(descendant)) else {
                    continue;
                };
                let list = pair_lists
                    .entry((top, below))
                    .or_insert_with(|| OccurrenceList::empty(kind));
                push_pair(list, tree_idx, host, ancestor, descendant);
            }
        }
    }

    let mut classes = Vec::new();
    for &top in &labels {
        let mut class = EquivalenceClass::new(TreeEncoding::single(top));
        for &below in &labels {
            let list = pair_lists
                .remove(&(top, below))
                .unwrap_or_else(|| OccurrenceList::empty(kind));
            class.add_element(Element::new(below, 0), list)?;
        }

        class.discard_non_frequent_elements(min_support)?;
        if !class.is_empty() {
            debug!(prefix = top, elements = class.elements().len(), "seeded two-node class");
            classes.push(class);
        }
    }

    Ok(classes)
}

fn push_single(list: &mut OccurrenceList, tree: usize, scope: Scope) {
    match list {
        OccurrenceList::LabelTracking(records) => {
            records.add(LabelRecord::new(tree, Vec::new(), scope));
        }
        OccurrenceList::ScopeVector(records) => {
            records.add(VectorRecord::new(tree, vec![scope]));
        }
    }
}

fn push_pair(list: &mut OccurrenceList, tree: usize, host: &ParsedTree, ancestor: usize, descendant: usize) {
    match list {
        OccurrenceList::LabelTracking(records) => {
            records.add(LabelRecord::new(tree, vec![ancestor], host.scope(descendant)));
        }
        OccurrenceList::ScopeVector(records) => {
            records.add(VectorRecord::new(
                tree,
                vec![host.scope(ancestor), host.scope(descendant)],
            ));
        }
    }
}
