use tracing::info;

use super::characterize::{build_characterization, validate_classes, MiningResult};
use super::config::MinerConfig;
use super::encoding::ParsedTree;
use super::error::MineResult;
use super::growth::{find_frequent_f1, find_frequent_f2, grow_equivalence_classes};

/// Anything that can mine frequent subtrees from a forest of encodings.
pub trait FrequentSubtreeFinder {
    /// Whether `subtree` occurs directly in `tree`.
    fn contains_subtree(&self, tree: &str, subtree: &str) -> MineResult<bool>;

    /// Frequent non-embedded subtrees of `trees`, sorted.
    fn find_frequent_subtrees(&self, trees: &[String]) -> MineResult<Vec<String>>;
}

#[derive(Debug, Clone, Default)]
pub struct TreeMiner {
    config: MinerConfig,
}

impl TreeMiner {
    pub fn new(config: MinerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    pub fn mine<S: AsRef<str>>(&self, forest: &[S]) -> MineResult<MiningResult> {
        let config = &self.config;
        config.validate()?;

        let hosts = forest
            .iter()
            .map(|tree| config.codec.parse_tree(tree.as_ref()))
            .collect::<MineResult<Vec<ParsedTree>>>()?;

        let kind = config.occurrence_kind();
        info!(
            trees = hosts.len(),
            min_support = config.min_support,
            representation = ?kind,
            "mining frequent subtrees"
        );

        if hosts.is_empty() {
            return Ok(MiningResult::empty(0));
        }

        let f1 = find_frequent_f1(&hosts, config.min_support, kind)?;
        let seeds = if config.max_pattern_size.map_or(true, |limit| limit >= 2) {
            find_frequent_f2(&f1, &hosts, config.min_support, kind)?
        } else {
            Vec::new()
        };

        let mut found = vec![f1];
        found.extend(grow_equivalence_classes(&hosts, seeds, config)?);

        let validated = validate_classes(&found, &hosts, config.min_support, config.parallel)?;
        let result = build_characterization(&validated, hosts.len(), &config.codec);

        info!(
            classes = found.len(),
            patterns = result.patterns.len(),
            "mining finished"
        );
        Ok(result)
    }
}

impl FrequentSubtreeFinder for TreeMiner {
    fn contains_subtree(&self, tree: &str, subtree: &str) -> MineResult<bool> {
        self.config.codec.contains_subtree(tree, subtree)
    }

    fn find_frequent_subtrees(&self, trees: &[String]) -> MineResult<Vec<String>> {
        self.mine(trees).map(|result| result.patterns)
    }
}

/// Mines `forest` with the default codec.
///
/// `count_multiple_occurrences` selects label-tracking occurrence lists (every
/// embedding kept) over scope-vector lists (rightmost paths only). Both yield
/// the same patterns; support always counts distinct trees.
pub fn mine<S: AsRef<str>>(
    forest: &[S],
    min_support: usize,
    count_multiple_occurrences: bool,
) -> MineResult<MiningResult> {
    TreeMiner::new(MinerConfig::new(min_support, count_multiple_occurrences)).mine(forest)
}
