//! ClassifierBuilder - wiring of clock, rules and tree.
//!
//! Everything that can be wrong with the configuration is checked in
//! [`ClassifierBuilder::build`], before the first record is classified.

use std::sync::Arc;

use crate::app::classifier::Classifier;
use crate::app::loader::InputLoader;
use crate::app::tree::DecisionTree;
use crate::domain::{ClassifyError, DerivationRules};
use crate::ports::Clock;

/// Builds a [`Classifier`].
///
/// ```ignore
/// let classifier = ClassifierBuilder::new(SystemClock)
///     .rules(DerivationRules::default())
///     .build()?;
/// let results = classifier.run(&vendors)?;
/// ```
///
/// Without an explicit tree the reference availability tree is used.
pub struct ClassifierBuilder<C> {
    clock: C,
    rules: DerivationRules,
    tree: Option<Arc<DecisionTree>>,
}

impl<C: Clock> ClassifierBuilder<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            rules: DerivationRules::default(),
            tree: None,
        }
    }

    pub fn rules(mut self, rules: DerivationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Uses an already validated tree, possibly shared with other classifiers.
    pub fn tree(mut self, tree: impl Into<Arc<DecisionTree>>) -> Self {
        self.tree = Some(tree.into());
        self
    }

    /// Validates the rules and builds the reference tree if none was given.
    pub fn build(self) -> Result<Classifier<C>, ClassifyError> {
        self.rules.validate()?;
        let tree = match self.tree {
            Some(tree) => tree,
            None => Arc::new(DecisionTree::reference()?),
        };
        tracing::debug!(
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            "decision tree ready"
        );
        Ok(Classifier::new(
            self.clock,
            InputLoader::new(self.rules),
            tree,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tree::DecisionNode;
    use crate::domain::VendorStatus;
    use crate::ports::FixedClock;
    use chrono::DateTime;

    fn clock() -> FixedClock {
        FixedClock::new(DateTime::parse_from_rfc3339("2023-06-30T10:00:00+02:00").unwrap())
    }

    #[test]
    fn defaults_to_reference_tree() {
        let classifier = ClassifierBuilder::new(clock()).build().unwrap();
        assert_eq!(classifier.tree(), &DecisionTree::reference().unwrap());
        assert_eq!(classifier.loader().rules(), &DerivationRules::default());
    }

    #[test]
    fn invalid_rules_fail_the_build() {
        let rules = DerivationRules {
            own_delivery_type: String::new(),
            ..DerivationRules::default()
        };
        let result = ClassifierBuilder::new(clock()).rules(rules).build();
        assert!(matches!(result, Err(ClassifyError::InvalidRules(_))));
    }

    #[test]
    fn custom_tree_is_shared_not_copied() {
        let tree = Arc::new(
            DecisionTree::new(DecisionNode::leaf(VendorStatus::ClosedDefault)).unwrap(),
        );
        let a = ClassifierBuilder::new(clock())
            .tree(tree.clone())
            .build()
            .unwrap();
        let b = ClassifierBuilder::new(clock())
            .tree(tree.clone())
            .build()
            .unwrap();
        assert!(std::ptr::eq(a.tree(), b.tree()));
        assert_eq!(Arc::strong_count(&tree), 3);
    }
}
