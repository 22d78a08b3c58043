//! Facts: labeled edges from a user to an entity.

use super::relation::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An outgoing edge stored under its source node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Edge {
    pub relation: Relation,
    pub target: String,
}

/// A `(user, relation, entity)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    /// Source user id.
    pub user: String,
    /// Edge label.
    pub relation: Relation,
    /// Target entity text.
    pub entity: String,
}

impl Fact {
    /// Create a new fact.
    pub fn new(user: impl Into<String>, relation: Relation, entity: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            relation,
            entity: entity.into(),
        }
    }
}

/// Renders as `user RELATION entity`, the line format handed to answer synthesis.
impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.user, self.relation, self.entity)
    }
}
