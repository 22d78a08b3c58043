//! The fact graph store.

use super::fact::{Edge, Fact};
use super::node::{Node, NodeKind};
use super::relation::Relation;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A directed multi-relation graph of user facts.
///
/// Nodes are keyed by their string identity. Edges are kept per source node
/// in insertion order, and no two edges share the same
/// `(source, relation, target)` triple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactGraph {
    /// All nodes by identity.
    nodes: HashMap<String, Node>,
    /// Outgoing edges by source node, in insertion order.
    outgoing: HashMap<String, Vec<Edge>>,
    /// Total number of edges.
    edge_count: usize,
}

impl FactGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Node Management
    // =========================================================================

    /// Insert a node if absent. An existing node keeps its original kind.
    fn ensure_node(&mut self, id: &str, kind: NodeKind) {
        match self.nodes.get(id) {
            Some(existing) if existing.kind != kind => {
                warn!(
                    node = id,
                    kept = existing.kind.name(),
                    requested = kind.name(),
                    "node already exists with another kind; keeping the original"
                );
            }
            Some(_) => {}
            None => {
                self.nodes.insert(id.to_string(), Node::new(id, kind));
            }
        }
    }

    /// Get the kind a node was first inserted with.
    pub fn node_kind(&self, id: &str) -> Option<NodeKind> {
        self.nodes.get(id).map(|n| n.kind)
    }

    /// Check whether a node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get all nodes of a specific kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.kind == kind).collect()
    }

    // =========================================================================
    // Fact Management
    // =========================================================================

    /// Add a fact `(user, relation, entity)`.
    ///
    /// Returns `false` when the identical triple is already stored, in which
    /// case the graph is left untouched apart from node insertion.
    pub fn add_fact(&mut self, user: &str, relation: &Relation, entity: &str) -> bool {
        self.ensure_node(user, NodeKind::User);
        self.ensure_node(entity, NodeKind::Entity);

        let edges = self.outgoing.entry(user.to_string()).or_default();
        if edges
            .iter()
            .any(|e| e.target == entity && &e.relation == relation)
        {
            debug!(user, %relation, entity, "fact already stored");
            return false;
        }

        edges.push(Edge {
            relation: relation.clone(),
            target: entity.to_string(),
        });
        self.edge_count += 1;
        true
    }

    /// Get the entities related to `user` by `relation`, in insertion order.
    ///
    /// An unknown user yields an empty list.
    pub fn query_facts(&self, user: &str, relation: &Relation) -> Vec<String> {
        self.outgoing_of(user)
            .iter()
            .filter(|e| &e.relation == relation)
            .map(|e| e.target.clone())
            .collect()
    }

    /// Get the distinct relations on `user`'s outgoing edges.
    pub fn list_relations(&self, user: &str) -> HashSet<Relation> {
        self.outgoing_of(user)
            .iter()
            .map(|e| e.relation.clone())
            .collect()
    }

    /// Get every fact whose source is `user`, in insertion order.
    pub fn facts_of(&self, user: &str) -> Vec<Fact> {
        self.outgoing_of(user)
            .iter()
            .map(|e| Fact::new(user, e.relation.clone(), e.target.clone()))
            .collect()
    }

    /// Get every fact in the graph. Users are visited in sorted order.
    pub fn facts(&self) -> Vec<Fact> {
        let mut users: Vec<&String> = self.outgoing.keys().collect();
        users.sort();
        users.into_iter().flat_map(|u| self.facts_of(u)).collect()
    }

    /// Build an independent graph holding only `user`'s outgoing edges and
    /// their endpoint nodes.
    ///
    /// Endpoint nodes keep the kinds they have in this graph. The result
    /// shares nothing with `self`.
    pub fn user_subgraph(&self, user: &str) -> FactGraph {
        let mut subgraph = FactGraph::new();
        let edges = self.outgoing_of(user);
        if edges.is_empty() {
            return subgraph;
        }

        let source_kind = self.node_kind(user).unwrap_or(NodeKind::User);
        subgraph.ensure_node(user, source_kind);
        for edge in edges {
            let target_kind = self.node_kind(&edge.target).unwrap_or(NodeKind::Entity);
            subgraph.ensure_node(&edge.target, target_kind);
        }
        subgraph
            .outgoing
            .insert(user.to_string(), edges.to_vec());
        subgraph.edge_count = edges.len();
        subgraph
    }

    fn outgoing_of(&self, user: &str) -> &[Edge] {
        self.outgoing.get(user).map(Vec::as_slice).unwrap_or(&[])
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Get the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check whether the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let graph = FactGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_add_and_query() {
        let mut graph = FactGraph::new();

        assert!(graph.add_fact("user_1", &Relation::WorksAt, "Google"));
        assert_eq!(graph.query_facts("user_1", &Relation::WorksAt), vec!["Google"]);
        assert_eq!(graph.node_kind("user_1"), Some(NodeKind::User));
        assert_eq!(graph.node_kind("Google"), Some(NodeKind::Entity));
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut graph = FactGraph::new();

        assert!(graph.add_fact("user_1", &Relation::WorksAt, "Google"));
        assert!(!graph.add_fact("user_1", &Relation::WorksAt, "Google"));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.query_facts("user_1", &Relation::WorksAt).len(), 1);
    }

    #[test]
    fn test_same_entity_different_relations() {
        let mut graph = FactGraph::new();

        graph.add_fact("user_1", &Relation::StudiesAt, "MIT");
        graph.add_fact("user_1", &Relation::Likes, "MIT");

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.query_facts("user_1", &Relation::Likes), vec!["MIT"]);
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let mut graph = FactGraph::new();

        graph.add_fact("user_1", &Relation::Likes, "tea");
        graph.add_fact("user_1", &Relation::WorksAt, "Google");
        graph.add_fact("user_1", &Relation::Likes, "chess");
        graph.add_fact("user_1", &Relation::Likes, "tea");
        graph.add_fact("user_1", &Relation::Likes, "rust");

        assert_eq!(
            graph.query_facts("user_1", &Relation::Likes),
            vec!["tea", "chess", "rust"]
        );
    }

    #[test]
    fn test_unknown_user() {
        let graph = FactGraph::new();
        assert!(graph.query_facts("ghost", &Relation::WorksAt).is_empty());
        assert!(graph.list_relations("ghost").is_empty());
        assert!(graph.facts_of("ghost").is_empty());
    }

    #[test]
    fn test_users_are_partitioned() {
        let mut graph = FactGraph::new();

        graph.add_fact("alice", &Relation::LivesIn, "Delhi");
        graph.add_fact("bob", &Relation::LivesIn, "Mumbai");

        assert_eq!(graph.query_facts("alice", &Relation::LivesIn), vec!["Delhi"]);
        assert_eq!(graph.query_facts("bob", &Relation::LivesIn), vec!["Mumbai"]);
    }

    #[test]
    fn test_shared_entity_node() {
        let mut graph = FactGraph::new();

        graph.add_fact("alice", &Relation::WorksAt, "Google");
        graph.add_fact("bob", &Relation::WorksAt, "Google");

        // One entity node, two edges
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_list_relations() {
        let mut graph = FactGraph::new();

        graph.add_fact("user_1", &Relation::Likes, "tea");
        graph.add_fact("user_1", &Relation::Likes, "chess");
        graph.add_fact("user_1", &Relation::LivesIn, "Delhi");

        let relations = graph.list_relations("user_1");
        assert_eq!(relations.len(), 2);
        assert!(relations.contains(&Relation::Likes));
        assert!(relations.contains(&Relation::LivesIn));
    }

    #[test]
    fn test_first_kind_wins() {
        let mut graph = FactGraph::new();

        // "Jordan" is first stored as an entity...
        graph.add_fact("alice", &Relation::Custom("KNOWS".into()), "Jordan");
        // ...and later used as a user id.
        graph.add_fact("Jordan", &Relation::LivesIn, "Paris");

        assert_eq!(graph.node_kind("Jordan"), Some(NodeKind::Entity));
        assert_eq!(graph.query_facts("Jordan", &Relation::LivesIn), vec!["Paris"]);

        // The reverse direction keeps the user kind.
        graph.add_fact("alice", &Relation::Likes, "alice");
        assert_eq!(graph.node_kind("alice"), Some(NodeKind::User));
    }

    #[test]
    fn test_user_subgraph() {
        let mut graph = FactGraph::new();

        graph.add_fact("alice", &Relation::WorksAt, "Google");
        graph.add_fact("alice", &Relation::LivesIn, "Delhi");
        graph.add_fact("bob", &Relation::WorksAt, "Infosys");

        let sub = graph.user_subgraph("alice");
        assert_eq!(sub.edge_count(), 2);
        assert_eq!(sub.node_count(), 3);
        assert!(!sub.contains_node("bob"));
        assert_eq!(sub.node_kind("Delhi"), Some(NodeKind::Entity));
    }

    #[test]
    fn test_user_subgraph_is_independent() {
        let mut graph = FactGraph::new();
        graph.add_fact("alice", &Relation::WorksAt, "Google");

        let mut sub = graph.user_subgraph("alice");
        sub.add_fact("alice", &Relation::WorksAt, "Microsoft");

        assert_eq!(sub.query_facts("alice", &Relation::WorksAt).len(), 2);
        assert_eq!(graph.query_facts("alice", &Relation::WorksAt), vec!["Google"]);
    }

    #[test]
    fn test_empty_user_subgraph() {
        let mut graph = FactGraph::new();
        graph.add_fact("alice", &Relation::WorksAt, "Google");

        let sub = graph.user_subgraph("bob");
        assert!(sub.is_empty());
        assert_eq!(sub.node_count(), 0);
    }

    #[test]
    fn test_facts_listing() {
        let mut graph = FactGraph::new();

        graph.add_fact("bob", &Relation::Likes, "jazz");
        graph.add_fact("alice", &Relation::WorksAt, "Google");
        graph.add_fact("alice", &Relation::LivesIn, "Delhi");

        let lines: Vec<String> = graph.facts().iter().map(|f| f.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "alice WORKS_AT Google",
                "alice LIVES_IN Delhi",
                "bob LIKES jazz"
            ]
        );
        assert_eq!(graph.nodes_of_kind(NodeKind::User).len(), 2);
    }
}
