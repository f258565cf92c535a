use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;
use rayon::prelude::*;

use super::class::EquivalenceClass;
use super::encoding::{ParsedTree, TreeCodec, TreeEncoding};
use super::error::MineResult;

/// A discovered equivalence class after re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSummary {
    pub prefix: String,
    pub patterns: Vec<String>,
}

/// Outcome of a mining run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningResult {
    /// Frequent non-embedded patterns, deduplicated and sorted.
    pub patterns: Vec<String>,
    /// Distinct trees directly containing each pattern, aligned with `patterns`.
    pub supports: Vec<usize>,
    /// Rows follow the input forest, columns follow `patterns`.
    pub characterization: Array2<u8>,
    pub classes: Vec<ClassSummary>,
}

/// Element patterns of one class that survive re-validation, with the trees
/// that contain them directly.
#[derive(Debug, Clone)]
pub struct ValidatedClass {
    pub prefix: TreeEncoding,
    pub patterns: Vec<(TreeEncoding, BTreeSet<usize>)>,
}

impl MiningResult {
    pub fn empty(num_trees: usize) -> Self {
        Self {
            patterns: Vec::new(),
            supports: Vec::new(),
            characterization: Array2::zeros((num_trees, 0)),
            classes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn column_of(&self, pattern: &str) -> Option<usize> {
        self.patterns
            .binary_search_by(|candidate| candidate.as_str().cmp(pattern))
            .ok()
    }

    /// Characterization row of one input tree.
    pub fn row(&self, tree: usize) -> Vec<u8> {
        self.characterization.row(tree).to_vec()
    }
}

/// Keeps only the records whose host tree contains the element pattern
/// directly, and only the patterns still meeting `min_support` afterwards.
pub fn extract_non_embedded(
    class: &EquivalenceClass,
    hosts: &[ParsedTree],
    min_support: usize,
) -> MineResult<ValidatedClass> {
    let mut patterns = Vec::new();

    for (pattern, list) in class.patterns()? {
        let parsed = pattern.to_parsed();
        let direct: BTreeSet<usize> = list
            .trees()
            .into_iter()
            .filter(|&tree| hosts[tree].contains_subtree(&parsed))
            .collect();

        if direct.len() >= min_support {
            patterns.push((pattern, direct));
        }
    }

    Ok(ValidatedClass {
        prefix: class.prefix().clone(),
        patterns,
    })
}

pub fn validate_classes(
    classes: &[EquivalenceClass],
    hosts: &[ParsedTree],
    min_support: usize,
    parallel: bool,
) -> MineResult<Vec<ValidatedClass>> {
    if parallel {
        classes
            .par_iter()
            .map(|class| extract_non_embedded(class, hosts, min_support))
            .collect()
    } else {
        classes
            .iter()
            .map(|class| extract_non_embedded(class, hosts, min_support))
            .collect()
    }
}

/// Merges validated classes into the sorted pattern list and the tree by
/// pattern indicator matrix.
pub fn build_characterization(
    validated: &[ValidatedClass],
    num_trees: usize,
    codec: &TreeCodec,
) -> MiningResult {
    let mut merged: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    let mut classes = Vec::with_capacity(validated.len());

    for class in validated {
        let mut rendered = Vec::with_capacity(class.patterns.len());
        for (pattern, trees) in &class.patterns {
            let text = codec.render(pattern);
            merged.entry(text.clone()).or_default().extend(trees.iter().copied());
            rendered.push(text);
        }
        if !rendered.is_empty() {
            classes.push(ClassSummary {
                prefix: codec.render(&class.prefix),
                patterns: rendered,
            });
        }
    }

    let mut characterization: Array2<u8> = Array2::zeros((num_trees, merged.len()));
    let mut patterns = Vec::with_capacity(merged.len());
    let mut supports = Vec::with_capacity(merged.len());

    for (column, (pattern, trees)) in merged.into_iter().enumerate() {
        for &tree in &trees {
            characterization[[tree, column]] = 1;
        }
        supports.push(trees.len());
        patterns.push(pattern);
    }

    MiningResult {
        patterns,
        supports,
        characterization,
        classes,
    }
}
