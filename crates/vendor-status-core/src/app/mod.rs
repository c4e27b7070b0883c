//! The classification pipeline: fact loader, decision tree, and the batch
//! runner that wires them together.

pub mod builder;
pub mod classifier;
pub mod loader;
pub mod tree;

pub use self::builder::ClassifierBuilder;
pub use self::classifier::{Classifier, Explanation};
pub use self::loader::InputLoader;
pub use self::tree::{DecisionNode, DecisionTree, Evaluation, NodeSpec, Step};
