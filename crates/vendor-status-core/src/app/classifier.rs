//! Batch runner: raw vendor records -> facts -> tree -> results.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::app::loader::InputLoader;
use crate::app::tree::{DecisionTree, Step};
use crate::domain::{
    ClassifyError, FactRecord, TreeResult, VendorId, VendorOfferState, VendorStatus,
};
use crate::ports::Clock;

/// Facts, path and status of one vendor, for explaining a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub id: VendorId,
    pub facts: FactRecord,
    pub path: Vec<Step>,
    pub status: VendorStatus,
}

/// Classifies vendors against a shared decision tree.
///
/// Records are independent of each other. The clock is read once per call,
/// so every record of a batch is judged against the same instant.
pub struct Classifier<C> {
    clock: C,
    loader: InputLoader,
    tree: Arc<DecisionTree>,
}

impl<C: Clock> Classifier<C> {
    pub(crate) fn new(clock: C, loader: InputLoader, tree: Arc<DecisionTree>) -> Self {
        Self {
            clock,
            loader,
            tree,
        }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    pub fn loader(&self) -> &InputLoader {
        &self.loader
    }

    /// Classifies one vendor at a given instant.
    pub fn classify_at(
        &self,
        raw: &VendorOfferState,
        now: &DateTime<FixedOffset>,
    ) -> Result<TreeResult, ClassifyError> {
        let facts = self.loader.derive_facts(raw, now)?;
        Ok(self.evaluate(&facts))
    }

    fn evaluate(&self, facts: &FactRecord) -> TreeResult {
        let status = self.tree.evaluate(facts);
        tracing::debug!(id = facts.id, %status, "classified vendor");
        TreeResult {
            id: facts.id,
            status,
        }
    }

    pub fn classify(&self, raw: &VendorOfferState) -> Result<TreeResult, ClassifyError> {
        self.classify_at(raw, &self.clock.now())
    }

    /// Classifies every record, in input order, stopping at the first error.
    ///
    /// A malformed record means upstream broke its contract, so the whole
    /// batch is rejected rather than partially reported.
    pub fn run(&self, raws: &[VendorOfferState]) -> Result<Vec<TreeResult>, ClassifyError> {
        let now = self.clock.now();
        let facts = self
            .loader
            .load_inputs(raws, &now)
            .inspect_err(|err| tracing::warn!(error = %err, "aborting batch"))?;
        let results: Vec<_> = facts.iter().map(|f| self.evaluate(f)).collect();
        tracing::info!(count = results.len(), %now, "batch classified");
        Ok(results)
    }

    /// Classifies every record, in input order, keeping per-record errors.
    pub fn classify_each(
        &self,
        raws: &[VendorOfferState],
    ) -> Vec<Result<TreeResult, ClassifyError>> {
        let now = self.clock.now();
        let results: Vec<_> = raws
            .iter()
            .map(|raw| {
                self.classify_at(raw, &now).inspect_err(|err| {
                    tracing::warn!(id = raw.id, error = %err, "skipping vendor");
                })
            })
            .collect();
        tracing::info!(
            count = results.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            %now,
            "batch classified"
        );
        results
    }

    /// Classifies one vendor and reports how the status was reached.
    pub fn explain(&self, raw: &VendorOfferState) -> Result<Explanation, ClassifyError> {
        self.explain_at(raw, &self.clock.now())
    }

    pub fn explain_at(
        &self,
        raw: &VendorOfferState,
        now: &DateTime<FixedOffset>,
    ) -> Result<Explanation, ClassifyError> {
        let facts = self.loader.derive_facts(raw, now)?;
        let evaluation = self.tree.trace(&facts);
        Ok(Explanation {
            id: facts.id,
            facts,
            path: evaluation.path,
            status: evaluation.status,
        })
    }

    /// Explains every record against one instant, stopping at the first error.
    pub fn explain_all(
        &self,
        raws: &[VendorOfferState],
    ) -> Result<Vec<Explanation>, ClassifyError> {
        let now = self.clock.now();
        raws.iter().map(|raw| self.explain_at(raw, &now)).collect()
    }
}
