//! MemoryService: statement text in, stored fact out.

use crate::command::{parse_recall, parse_remember, CommandError};
use crate::extract::{RelationExtractor, Triple};
use crate::graph::{Fact, Relation, SharedFactGraph};
use crate::parser::{ParseError, SentenceParser};
use std::sync::Arc;
use tracing::{debug, info};

/// Ties the parser, the extractor and the fact graph together.
#[derive(Clone)]
pub struct MemoryService {
    graph: SharedFactGraph,
    parser: Arc<dyn SentenceParser>,
    extractor: RelationExtractor,
}

impl MemoryService {
    /// Create a service over an existing graph.
    pub fn new(graph: SharedFactGraph, parser: Arc<dyn SentenceParser>) -> Self {
        Self {
            graph,
            parser,
            extractor: RelationExtractor::new(),
        }
    }

    /// Replace the extractor (e.g. one with extra rules).
    pub fn with_extractor(mut self, extractor: RelationExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// The graph this service writes to.
    pub fn graph(&self) -> &SharedFactGraph {
        &self.graph
    }

    /// Parse `text` and, if it states a first-person fact, store it.
    ///
    /// Returns the confirmation to show the user, or `None` when no fact was
    /// found. A parser failure aborts the whole operation; nothing is stored.
    pub async fn extract_and_store(
        &self,
        user_id: &str,
        text: &str,
    ) -> Result<Option<String>, ParseError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let sentence = self.parser.parse(text).await?;
        let Some(Triple { relation, entity }) = self.extractor.extract(&sentence) else {
            debug!(user = user_id, "no fact in statement");
            return Ok(None);
        };

        let added = self.graph.add_fact(user_id, &relation, &entity);
        info!(user = user_id, %relation, entity = %entity, added, "stored extracted fact");
        Ok(Some(relation.confirmation(&entity)))
    }

    /// Store a fact given as the body of a `remember:` command.
    pub fn remember(&self, user_id: &str, body: &str) -> Result<Fact, CommandError> {
        let (relation, entity) = parse_remember(body)?;
        Ok(self.store(user_id, relation, entity))
    }

    /// Look up the entities for the relation named in a `recall:` body.
    pub fn recall(&self, user_id: &str, body: &str) -> Result<Vec<String>, CommandError> {
        let relation = parse_recall(body)?;
        Ok(self.graph.query_facts(user_id, &relation))
    }

    /// Store a fact directly, bypassing extraction.
    pub fn store(&self, user_id: &str, relation: Relation, entity: String) -> Fact {
        let added = self.graph.add_fact(user_id, &relation, &entity);
        info!(user = user_id, %relation, entity = %entity, added, "stored manual fact");
        Fact::new(user_id, relation, entity)
    }
}
