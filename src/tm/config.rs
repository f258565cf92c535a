use std::time::{Duration, Instant};

use super::encoding::TreeCodec;
use super::error::{MineError, MineResult};
use super::occurrences::OccurrenceKind;

#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Minimum number of distinct trees a pattern must occur in.
    pub min_support: usize,
    /// `true` tracks every embedding (label-tracking lists), `false` only
    /// rightmost-path scopes (scope-vector lists).
    pub count_multiple_occurrences: bool,
    pub codec: TreeCodec,
    /// Growth fails with [`MineError::DeadlineExceeded`] once this passes.
    pub deadline: Option<Instant>,
    /// Largest pattern, in nodes, the engine grows towards. Single-node
    /// patterns are always reported.
    pub max_pattern_size: Option<usize>,
    /// Re-validate discovered classes on the rayon pool.
    pub parallel: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_support: 1,
            count_multiple_occurrences: true,
            codec: TreeCodec::default(),
            deadline: None,
            max_pattern_size: None,
            parallel: false,
        }
    }
}

impl MinerConfig {
    pub fn new(min_support: usize, count_multiple_occurrences: bool) -> Self {
        Self {
            min_support,
            count_multiple_occurrences,
            ..Self::default()
        }
    }

    pub fn with_codec(mut self, codec: TreeCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_time_limit(self, limit: Duration) -> Self {
        self.with_deadline(Instant::now() + limit)
    }

    pub fn with_max_pattern_size(mut self, nodes: usize) -> Self {
        self.max_pattern_size = Some(nodes);
        self
    }

    pub fn with_parallel_validation(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn occurrence_kind(&self) -> OccurrenceKind {
        if self.count_multiple_occurrences {
            OccurrenceKind::LabelTracking
        } else {
            OccurrenceKind::ScopeVector
        }
    }

    pub fn validate(&self) -> MineResult<()> {
        if self.min_support == 0 {
            return Err(MineError::UnsupportedMinSupport(self.min_support));
        }
        Ok(())
    }

    pub(crate) fn check_deadline(&self) -> MineResult<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(MineError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Whether a class whose prefix has `prefix_nodes` nodes may be expanded;
    /// its children carry patterns two nodes larger.
    pub(crate) fn allows_growth_from(&self, prefix_nodes: usize) -> bool {
        self.max_pattern_size
            .map_or(true, |limit| prefix_nodes + 2 <= limit)
    }
}
