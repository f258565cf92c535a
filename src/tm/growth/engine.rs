use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::tm::class::{ClassState, Element, EquivalenceClass};
use crate::tm::config::MinerConfig;
use crate::tm::encoding::{ParsedTree, TreeEncoding};
use crate::tm::error::{MineError, MineResult};
use crate::tm::occurrences::OccurrenceList;

/// Grows every seed class depth-first and returns the seeds followed by all
/// confirmed descendants, in discovery order.
///
/// Classes live in an arena indexed by id; the worklist holds ids still to be
/// expanded, so long patterns never deepen the call stack.
pub fn grow_equivalence_classes(
    hosts: &[ParsedTree],
    seeds: Vec<EquivalenceClass>,
    config: &MinerConfig,
) -> MineResult<Vec<EquivalenceClass>> {
    let mut arena: Vec<EquivalenceClass> = seeds;
    let mut worklist: Vec<usize> = (0..arena.len()).rev().collect();

    while let Some(class_id) = worklist.pop() {
        config.check_deadline()?;

        let class = &arena[class_id];
        if class.state() != ClassState::Confirmed
            || !config.allows_growth_from(class.prefix().node_count())
        {
            continue;
        }

        let children = expand_class(class, hosts, config.min_support)?;

        let first_child = arena.len();
        for child in children {
            debug!(
                prefix = %child.prefix(),
                elements = child.elements().len(),
                "confirmed equivalence class"
            );
            arena.push(child);
        }
        // Keep depth-first order: the first child is expanded next.
        worklist.extend((first_child..arena.len()).rev());
    }

    Ok(arena)
}

/// Builds the confirmed child classes of `class`, one per element whose
/// pattern occurs directly somewhere.
pub fn expand_class(
    class: &EquivalenceClass,
    hosts: &[ParsedTree],
    min_support: usize,
) -> MineResult<Vec<EquivalenceClass>> {
    let prefix = class.prefix();
    let rightmost = prefix.rightmost_path();
    let mut children = Vec::new();

    for x in class.elements() {
        let new_prefix = class.pattern_for(x)?;
        let x_list = class.occurrences_for(x)?;

        if !occurs_directly(&new_prefix, x_list, hosts) {
            debug!(prefix = %new_prefix, "abandoning embedded-only branch");
            continue;
        }

        let new_position = x.attach + 1 + prefix.number_of_descendants(x.attach)?;
        let mut child = EquivalenceClass::new(new_prefix);

        for y in class.elements() {
            let y_list = class.occurrences_for(y)?;
            match x.attach.cmp(&y.attach) {
                Ordering::Equal => {
                    let joined = x_list.in_scope_join(y_list)?;
                    trace!(x = %x.label, y = %y.label, records = joined.len(), "in-scope join");
                    if joined.support() >= min_support {
                        child.add_element(Element::new(y.label.as_str(), new_position), joined)?;
                    }
                    try_sibling(&mut child, y, x_list, y_list, &rightmost, min_support)?;
                }
                Ordering::Greater => {
                    try_sibling(&mut child, y, x_list, y_list, &rightmost, min_support)?;
                }
                Ordering::Less => {}
            }
        }

        if child.settle() == ClassState::Confirmed {
            children.push(child);
        }
    }

    Ok(children)
}

/// Out-scope join of `x` with `y`; keeps `(y, j)` in `child` when frequent.
fn try_sibling(
    child: &mut EquivalenceClass,
    y: &Element,
    x_list: &OccurrenceList,
    y_list: &OccurrenceList,
    rightmost: &[usize],
    min_support: usize,
) -> MineResult<()> {
    let attach_depth = rightmost
        .iter()
        .position(|&node| node == y.attach)
        .ok_or(MineError::InvalidPosition {
            position: y.attach,
            nodes: rightmost.last().map_or(0, |&tip| tip + 1),
        })?;

    let joined = x_list.out_scope_join(y_list, attach_depth)?;
    trace!(y = %y.label, attach_depth, records = joined.len(), "out-scope join");
    if joined.support() >= min_support {
        child.add_element(y.clone(), joined)?;
    }
    Ok(())
}

/// Whether `pattern` occurs directly in at least one tree the list refers to.
pub fn occurs_directly(pattern: &TreeEncoding, list: &OccurrenceList, hosts: &[ParsedTree]) -> bool {
    let parsed = pattern.to_parsed();
    list.trees()
        .into_iter()
        .any(|tree| hosts[tree].contains_subtree(&parsed))
}
