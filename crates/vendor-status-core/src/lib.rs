//! vendor-status-core
//!
//! Classifies a vendor's current service availability (delivery, pickup,
//! closed, opens later, ...) from upstream vendor/offer state.
//!
//! Raw records go through [`app::InputLoader`] to become facts, and facts go
//! through [`app::DecisionTree`] to become results. [`app::Classifier`] drives
//! both over a batch.

pub mod app;
pub mod domain;
pub mod observability;
pub mod ports;

pub use app::{Classifier, ClassifierBuilder, DecisionTree, Explanation, InputLoader};
pub use domain::{
    ClassifyError, DerivationRules, Fact, FactRecord, TreeResult, VendorOfferState, VendorStatus,
};
pub use observability::StatusCounts;
pub use ports::{Clock, FixedClock, SystemClock};
