//! Frequent non-embedded subtree mining over forests of rooted, ordered,
//! labeled trees, with a per-tree characterization matrix of the patterns
//! found.
//!
//! ```
//! let result = canopy::mine(&["A B -1 C -1", "A C -1"], 2, true).unwrap();
//! assert_eq!(result.patterns, vec!["A", "A C -1", "C"]);
//! assert_eq!(result.row(0), vec![1, 1, 1]);
//! ```

pub mod tm;

pub use tm::{
    mine, ClassSummary, FrequentSubtreeFinder, MineError, MineResult, MinerConfig, MiningResult,
    OccurrenceKind, Scope, TreeCodec, TreeEncoding, TreeMiner,
};

#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::tm::{MinerConfig, TreeMiner};

    #[pyfunction]
    #[pyo3(signature = (trees, min_support, count_multiple_occurrences = true))]
    fn mine_subtrees<'py>(
        py: Python<'py>,
        trees: Vec<String>,
        min_support: usize,
        count_multiple_occurrences: bool,
    ) -> PyResult<(Vec<String>, Bound<'py, PyArray2<u8>>)> {
        let miner = TreeMiner::new(MinerConfig::new(min_support, count_multiple_occurrences));
        let result = py
            .allow_threads(|| miner.mine(&trees))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok((result.patterns, result.characterization.into_pyarray(py)))
    }

    #[pyfunction]
    fn contains_subtree(tree: &str, subtree: &str) -> PyResult<bool> {
        crate::tm::TreeCodec::default()
            .contains_subtree(tree, subtree)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[pymodule]
    fn canopy(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(mine_subtrees, m)?)?;
        m.add_function(wrap_pyfunction!(contains_subtree, m)?)?;
        Ok(())
    }
}
