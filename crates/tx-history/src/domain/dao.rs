//! # DAO Correlation
//!
//! A transaction participates in the DAO when it creates a tagged output
//! (deposit) or spends one (withdrawal). The tag lives on the spent output,
//! so withdrawals are only visible through a lookup of previous outputs.

use std::collections::{BTreeSet, HashMap};

use shared_types::{Hash, OutPoint};

use super::entities::{InputRecord, OutputRecord};

/// Lookup of `(tx_hash, index) -> has_dao_data` for a set of outputs.
#[derive(Debug, Clone, Default)]
pub struct DaoIndex {
    tags: HashMap<OutPoint, bool>,
}

impl DaoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the given outputs.
    pub fn from_outputs<'a>(outputs: impl IntoIterator<Item = &'a OutputRecord>) -> Self {
        let mut index = Self::new();
        index.extend(outputs);
        index
    }

    /// Add outputs. A tag, once recorded, is never cleared.
    pub fn extend<'a>(&mut self, outputs: impl IntoIterator<Item = &'a OutputRecord>) {
        for output in outputs {
            let tagged = self.tags.entry(output.out_point).or_insert(false);
            *tagged |= output.has_dao_data();
        }
    }

    /// Whether the output at `out_point` is known and tagged.
    pub fn is_tagged(&self, out_point: &OutPoint) -> bool {
        self.tags.get(out_point).copied().unwrap_or(false)
    }

    /// Deposit or withdrawal check for one transaction.
    pub fn participates(&self, inputs: &[InputRecord], outputs: &[OutputRecord]) -> bool {
        outputs.iter().any(OutputRecord::has_dao_data)
            || inputs
                .iter()
                .filter_map(|i| i.previous_output.as_ref())
                .any(|out_point| self.is_tagged(out_point))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Transactions whose outputs the given inputs spend.
pub fn previous_tx_hashes<'a>(inputs: impl IntoIterator<Item = &'a InputRecord>) -> BTreeSet<Hash> {
    inputs
        .into_iter()
        .filter_map(|i| i.previous_output.map(|p| p.tx_hash))
        .collect()
}
