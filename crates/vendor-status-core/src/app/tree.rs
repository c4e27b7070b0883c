//! Decision tree: fact record -> vendor status.
//!
//! The tree is an explicit value of [`DecisionNode`]s. It is validated once
//! when it is built ([`DecisionTree::new`]) and then only read, so one
//! instance can be shared by every evaluation and every thread.
//!
//! Branch keys are typed [`Fact`]s, so string keys ([`NodeSpec`]) are
//! resolved before a tree exists (`UnknownFactName`). Every branch has both
//! children: the type guarantees it for [`DecisionNode`], string specs are
//! checked (`UnknownFactValue`). No branch may re-test a fact fixed by an
//! ancestor (`UnreachableBranch`), which keeps every leaf reachable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ClassifyError, Fact, FactRecord, VendorStatus};

/// A node of the decision tree. Owns its children exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionNode {
    Branch {
        fact: Fact,
        on_true: Box<DecisionNode>,
        on_false: Box<DecisionNode>,
    },
    Leaf(VendorStatus),
}

impl DecisionNode {
    pub fn branch(fact: Fact, on_true: DecisionNode, on_false: DecisionNode) -> Self {
        DecisionNode::Branch {
            fact,
            on_true: Box::new(on_true),
            on_false: Box::new(on_false),
        }
    }

    pub fn leaf(status: VendorStatus) -> Self {
        DecisionNode::Leaf(status)
    }
}

/// String-keyed form of a tree, shaped like a `property -> {true, false}`
/// map.
///
/// Nothing can be evaluated against a `NodeSpec`; it has to go through
/// [`DecisionTree::from_spec`], which resolves names and checks children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSpec {
    Branch {
        property: String,
        branches: BTreeMap<bool, NodeSpec>,
    },
    Leaf(VendorStatus),
}

impl NodeSpec {
    pub fn branch(
        property: impl Into<String>,
        branches: impl IntoIterator<Item = (bool, NodeSpec)>,
    ) -> Self {
        NodeSpec::Branch {
            property: property.into(),
            branches: branches.into_iter().collect(),
        }
    }

    pub fn leaf(status: VendorStatus) -> Self {
        NodeSpec::Leaf(status)
    }

    fn resolve(&self) -> Result<DecisionNode, ClassifyError> {
        match self {
            NodeSpec::Leaf(status) => Ok(DecisionNode::Leaf(*status)),
            NodeSpec::Branch { property, branches } => {
                let fact: Fact = property.parse()?;
                let child = |value: bool| {
                    branches
                        .get(&value)
                        .ok_or(ClassifyError::UnknownFactValue { fact, value })
                        .and_then(NodeSpec::resolve)
                };
                Ok(DecisionNode::branch(fact, child(true)?, child(false)?))
            }
        }
    }
}

/// One decision taken during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub fact: Fact,
    pub value: bool,
}

/// Status plus the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub status: VendorStatus,
    pub path: Vec<Step>,
}

/// A validated, immutable decision tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    root: DecisionNode,
    depth: usize,
    leaf_count: usize,
}

#[derive(Default)]
struct Shape {
    depth: usize,
    leaf_count: usize,
}

impl DecisionTree {
    /// Validates `root` and wraps it in a tree.
    pub fn new(root: DecisionNode) -> Result<Self, ClassifyError> {
        let mut shape = Shape::default();
        walk(&root, [None; Fact::COUNT], 0, &mut shape)?;
        Ok(Self {
            root,
            depth: shape.depth,
            leaf_count: shape.leaf_count,
        })
    }

    /// Builds a tree from its string-keyed form.
    pub fn from_spec(spec: &NodeSpec) -> Result<Self, ClassifyError> {
        Self::new(spec.resolve()?)
    }

    /// The production availability tree.
    pub fn reference() -> Result<Self, ClassifyError> {
        Self::new(reference_root())
    }

    pub fn root(&self) -> &DecisionNode {
        &self.root
    }

    /// Largest number of branches on any root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Leaf statuses, depth-first with the `true` child first.
    pub fn leaves(&self) -> Vec<VendorStatus> {
        let mut out = Vec::with_capacity(self.leaf_count);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                DecisionNode::Leaf(status) => out.push(*status),
                DecisionNode::Branch {
                    on_true, on_false, ..
                } => {
                    stack.push(&**on_false);
                    stack.push(&**on_true);
                }
            }
        }
        out
    }

    pub fn evaluate(&self, facts: &FactRecord) -> VendorStatus {
        let mut node = &self.root;
        loop {
            match node {
                DecisionNode::Leaf(status) => return *status,
                DecisionNode::Branch {
                    fact,
                    on_true,
                    on_false,
                } => {
                    node = if facts.get(*fact) {
                        &**on_true
                    } else {
                        &**on_false
                    };
                }
            }
        }
    }

    /// Like [`DecisionTree::evaluate`], also recording every branch taken.
    pub fn trace(&self, facts: &FactRecord) -> Evaluation {
        let mut path = Vec::with_capacity(self.depth);
        let mut node = &self.root;
        loop {
            match node {
                DecisionNode::Leaf(status) => {
                    return Evaluation {
                        status: *status,
                        path,
                    };
                }
                DecisionNode::Branch {
                    fact,
                    on_true,
                    on_false,
                } => {
                    let value = facts.get(*fact);
                    path.push(Step { fact: *fact, value });
                    node = if value { &**on_true } else { &**on_false };
                }
            }
        }
    }
}

fn walk(
    node: &DecisionNode,
    decided: [Option<bool>; Fact::COUNT],
    level: usize,
    shape: &mut Shape,
) -> Result<(), ClassifyError> {
    match node {
        DecisionNode::Leaf(_) => {
            shape.leaf_count += 1;
            shape.depth = shape.depth.max(level);
            Ok(())
        }
        DecisionNode::Branch {
            fact,
            on_true,
            on_false,
        } => {
            if decided[fact.index()].is_some() {
                return Err(ClassifyError::UnreachableBranch { fact: *fact });
            }
            for (value, child) in [(true, on_true), (false, on_false)] {
                let mut next = decided;
                next[fact.index()] = Some(value);
                walk(child, next, level + 1, shape)?;
            }
            Ok(())
        }
    }
}

fn reference_root() -> DecisionNode {
    use DecisionNode as N;
    use VendorStatus as S;

    let pickup_or = |otherwise: VendorStatus| {
        N::branch(Fact::IsPickup, N::leaf(S::PickUpOnline), N::leaf(otherwise))
    };

    let open = N::branch(
        Fact::IsClosedForHurrierDelay,
        pickup_or(S::WithoutDelivery),
        N::branch(
            Fact::IsCloseEventActive,
            pickup_or(S::WithoutDelivery),
            N::branch(
                Fact::IsShrinkEventActive,
                pickup_or(S::WithoutDelivery),
                N::branch(
                    Fact::IsDelivery,
                    N::leaf(S::DeliveryOnline),
                    pickup_or(S::OpenDefault),
                ),
            ),
        ),
    );

    let closed = N::branch(
        Fact::OutsideWorkingHours,
        N::branch(
            Fact::OpensLater,
            N::branch(
                Fact::PreOrder,
                N::leaf(S::ProgramOrderOpensAt),
                N::leaf(S::OpensAt),
            ),
            N::leaf(S::Closed),
        ),
        N::branch(
            Fact::IsScheduleVariation,
            N::branch(
                Fact::OpensLater,
                N::leaf(S::ClosedTemporarily),
                N::leaf(S::Closed),
            ),
            N::leaf(S::Closed),
        ),
    );

    N::branch(Fact::IsOpen, open, closed)
}
