//! A lock-protected handle to one fact graph.

use super::fact::Fact;
use super::relation::Relation;
use super::store::FactGraph;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Cloneable handle to a single fact graph shared by every caller.
///
/// Every operation takes the one lock for its whole duration. Callers only
/// ever receive copies of graph data.
#[derive(Debug, Clone, Default)]
pub struct SharedFactGraph {
    inner: Arc<Mutex<FactGraph>>,
}

impl SharedFactGraph {
    /// Create a handle around an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing graph.
    pub fn from_graph(graph: FactGraph) -> Self {
        Self {
            inner: Arc::new(Mutex::new(graph)),
        }
    }

    /// See [`FactGraph::add_fact`].
    pub fn add_fact(&self, user: &str, relation: &Relation, entity: &str) -> bool {
        self.inner.lock().add_fact(user, relation, entity)
    }

    /// See [`FactGraph::query_facts`].
    pub fn query_facts(&self, user: &str, relation: &Relation) -> Vec<String> {
        self.inner.lock().query_facts(user, relation)
    }

    /// See [`FactGraph::list_relations`].
    pub fn list_relations(&self, user: &str) -> HashSet<Relation> {
        self.inner.lock().list_relations(user)
    }

    /// See [`FactGraph::facts_of`].
    pub fn facts_of(&self, user: &str) -> Vec<Fact> {
        self.inner.lock().facts_of(user)
    }

    /// See [`FactGraph::user_subgraph`].
    pub fn user_subgraph(&self, user: &str) -> FactGraph {
        self.inner.lock().user_subgraph(user)
    }

    /// Copy the whole graph.
    pub fn snapshot(&self) -> FactGraph {
        self.inner.lock().clone()
    }

    /// Get the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.lock().edge_count()
    }
}
