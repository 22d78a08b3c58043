//! Node types for the fact graph.

use serde::{Deserialize, Serialize};

/// The semantic role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A user the facts are about.
    User,
    /// A thing a user is related to (company, city, subject...).
    Entity,
}

impl NodeKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::User => "user",
            NodeKind::Entity => "entity",
        }
    }
}

/// A node in the fact graph, identified by its string.
///
/// The kind is fixed when the node is first inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// User id or entity surface text.
    pub id: String,
    /// Role assigned on first insertion.
    pub kind: NodeKind,
}

impl Node {
    /// Create a new node.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}
