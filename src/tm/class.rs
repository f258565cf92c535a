use std::collections::BTreeMap;

use super::encoding::TreeEncoding;
use super::error::{MineError, MineResult};
use super::occurrences::OccurrenceList;

/// One-node extension of a class prefix: `label` attached as the last child of
/// the prefix node at pre-order position `attach`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element {
    pub label: String,
    pub attach: usize,
}

impl Element {
    pub fn new(label: impl Into<String>, attach: usize) -> Self {
        Self {
            label: label.into(),
            attach,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassState {
    /// Built but not yet support-filtered.
    Candidate,
    /// Non-empty after filtering; eligible for growth.
    Confirmed,
    /// Emptied by filtering; never expanded.
    Dead,
}

/// All frequent one-node extensions of a shared prefix, each with the
/// occurrence list of the pattern it derives.
#[derive(Debug, Clone)]
pub struct EquivalenceClass {
    prefix: TreeEncoding,
    elements: Vec<Element>,
    occurrences: BTreeMap<TreeEncoding, OccurrenceList>,
    state: ClassState,
}

impl EquivalenceClass {
    pub fn new(prefix: TreeEncoding) -> Self {
        Self {
            prefix,
            elements: Vec::new(),
            occurrences: BTreeMap::new(),
            state: ClassState::Candidate,
        }
    }

    pub fn prefix(&self) -> &TreeEncoding {
        &self.prefix
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn state(&self) -> ClassState {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn pattern_for(&self, element: &Element) -> MineResult<TreeEncoding> {
        self.prefix.add_node(element.label.as_str(), element.attach)
    }

    /// Adds an element with its list; an element already present keeps its
    /// first list.
    pub fn add_element(&mut self, element: Element, list: OccurrenceList) -> MineResult<()> {
        if self.elements.contains(&element) {
            return Ok(());
        }
        let pattern = self.pattern_for(&element)?;
        self.occurrences.insert(pattern, list);
        self.elements.push(element);
        Ok(())
    }

    pub fn occurrences_for(&self, element: &Element) -> MineResult<&OccurrenceList> {
        let pattern = self.pattern_for(element)?;
        self.occurrences
            .get(&pattern)
            .ok_or_else(|| MineError::MissingOccurrenceList(pattern.to_string()))
    }

    /// Pattern and list of every element, in element order.
    pub fn patterns(&self) -> MineResult<Vec<(TreeEncoding, &OccurrenceList)>> {
        self.elements
            .iter()
            .map(|element| {
                let pattern = self.pattern_for(element)?;
                let list = self
                    .occurrences
                    .get(&pattern)
                    .ok_or_else(|| MineError::MissingOccurrenceList(pattern.to_string()))?;
                Ok((pattern, list))
            })
            .collect()
    }

    /// Drops elements whose list falls below `min_support` distinct trees and
    /// settles the class state.
    pub fn discard_non_frequent_elements(&mut self, min_support: usize) -> MineResult<()> {
        let mut kept = Vec::with_capacity(self.elements.len());
        let mut kept_lists = BTreeMap::new();

        for element in self.elements.drain(..) {
            let pattern = self.prefix.add_node(element.label.as_str(), element.attach)?;
            let list = self
                .occurrences
                .remove(&pattern)
                .ok_or_else(|| MineError::MissingOccurrenceList(pattern.to_string()))?;
            if list.support() >= min_support {
                kept_lists.insert(pattern, list);
                kept.push(element);
            }
        }

        self.elements = kept;
        self.occurrences = kept_lists;
        self.settle();
        Ok(())
    }

    /// Marks the class confirmed if it has elements, dead otherwise.
    pub fn settle(&mut self) -> ClassState {
        self.state = if self.elements.is_empty() {
            ClassState::Dead
        } else {
            ClassState::Confirmed
        };
        self.state
    }
}
