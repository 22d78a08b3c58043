//! One chat turn at a time: commands, statements, then questions.

use crate::answer::{AnswerSynthesizer, SynthesisError, UNKNOWN_ANSWER};
use crate::command::{Command, CommandError};
use crate::graph::{Fact, SharedFactGraph};
use crate::intent::{detect_recall_relation, looks_like_question};
use crate::parser::ParseError;
use crate::service::MemoryService;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Reply after a `remember:` command.
pub const STORED_REPLY: &str = "Memory stored.";

/// Reply when `recall:` finds nothing.
pub const NOT_FOUND_REPLY: &str = "No memory found.";

/// Reply for input that is neither a fact nor a question.
pub const FALLBACK_REPLY: &str = "Use 'remember:' to store and 'recall:' to retrieve.";

/// Reply for blank input.
pub const HELP_TEXT: &str = "Tell me about yourself (\"I work at Google.\") or ask \
(\"Where do I work?\"). Commands: 'remember: RELATION entity', 'recall: RELATION'.";

/// Errors that end a chat turn without a reply.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("parser error: {0}")]
    Parse(#[from] ParseError),

    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),
}

/// A conversation with one user over a shared memory service.
pub struct ChatSession {
    service: MemoryService,
    synthesizer: Option<Arc<dyn AnswerSynthesizer>>,
    user_id: String,
}

impl ChatSession {
    pub fn new(service: MemoryService, user_id: impl Into<String>) -> Self {
        Self {
            service,
            synthesizer: None,
            user_id: user_id.into(),
        }
    }

    /// Answer questions through `synthesizer` instead of listing entities.
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn AnswerSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Switch to another user. Facts stay in the shared graph.
    pub fn set_user(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn graph(&self) -> &SharedFactGraph {
        self.service.graph()
    }

    /// Handle one line of user input.
    pub async fn respond(&self, input: &str) -> Result<String, ChatError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(HELP_TEXT.to_string());
        }

        if let Some(command) = Command::parse(input) {
            return Ok(self.run_command(command));
        }

        if let Some(confirmation) = self.service.extract_and_store(&self.user_id, input).await? {
            return Ok(confirmation);
        }

        if looks_like_question(input) {
            return self.answer(input).await;
        }

        Ok(FALLBACK_REPLY.to_string())
    }

    fn run_command(&self, command: Result<Command, CommandError>) -> String {
        match command {
            Ok(Command::Remember { relation, entity }) => {
                self.service.store(&self.user_id, relation, entity);
                STORED_REPLY.to_string()
            }
            Ok(Command::Recall { relation }) => {
                let entities = self.graph().query_facts(&self.user_id, &relation);
                if entities.is_empty() {
                    NOT_FOUND_REPLY.to_string()
                } else {
                    entities.join(", ")
                }
            }
            Err(e) => {
                debug!(error = %e, "malformed command");
                format!("Invalid format. Use: {}", e.usage())
            }
        }
    }

    async fn answer(&self, question: &str) -> Result<String, ChatError> {
        let facts = self.relevant_facts(question);
        if facts.is_empty() {
            return Ok(UNKNOWN_ANSWER.to_string());
        }

        match &self.synthesizer {
            Some(synthesizer) => {
                let triples: Vec<String> = facts.iter().map(Fact::to_string).collect();
                let answer = synthesizer
                    .synthesize(&triples, question)
                    .await
                    .inspect_err(|e| warn!(error = %e, "could not answer question"))?;
                Ok(answer)
            }
            None => Ok(facts
                .into_iter()
                .map(|f| f.entity)
                .collect::<Vec<_>>()
                .join(", ")),
        }
    }

    /// Facts for the relation the question asks about, or every fact of
    /// the user when no relation is recognised.
    fn relevant_facts(&self, question: &str) -> Vec<Fact> {
        let facts = self.graph().facts_of(&self.user_id);
        match detect_recall_relation(question) {
            Some(relation) => {
                debug!(%relation, "question maps to relation");
                facts.into_iter().filter(|f| f.relation == relation).collect()
            }
            None => facts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Relation;
    use crate::testing::{MockSynthesizer, ScriptedParser};

    fn session() -> ChatSession {
        let service = MemoryService::new(
            SharedFactGraph::new(),
            Arc::new(ScriptedParser::with_fixtures()),
        );
        ChatSession::new(service, "user_1")
    }

    #[tokio::test]
    async fn test_blank_input_shows_help() {
        assert_eq!(session().respond("   ").await.unwrap(), HELP_TEXT);
    }

    #[tokio::test]
    async fn test_statement_then_question() {
        let chat = session();

        assert_eq!(
            chat.respond("I work at Google.").await.unwrap(),
            "Got it. I'll remember you work at Google."
        );
        assert_eq!(chat.respond("Where do I work?").await.unwrap(), "Google");
        assert_eq!(chat.respond("Where do I live?").await.unwrap(), UNKNOWN_ANSWER);
    }

    #[tokio::test]
    async fn test_commands() {
        let chat = session();

        assert_eq!(chat.respond("recall: LIKES").await.unwrap(), NOT_FOUND_REPLY);
        assert_eq!(chat.respond("remember: LIKES green tea").await.unwrap(), STORED_REPLY);
        assert_eq!(chat.respond("remember: LIKES pizza").await.unwrap(), STORED_REPLY);
        assert_eq!(chat.respond("recall: LIKES").await.unwrap(), "green tea, pizza");
        assert_eq!(
            chat.respond("remember: LIKES").await.unwrap(),
            "Invalid format. Use: remember: relation entity"
        );
        assert_eq!(
            chat.respond("recall:").await.unwrap(),
            "Invalid format. Use: recall: relation"
        );
    }

    #[tokio::test]
    async fn test_unmatched_statement_falls_back() {
        assert_eq!(session().respond("I sleep.").await.unwrap(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_parser_failure_is_an_error() {
        let err = session().respond("Nobody scripted this").await.unwrap_err();
        assert!(matches!(err, ChatError::Parse(ParseError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_synthesizer_gets_only_matching_triples() {
        let mock = Arc::new(MockSynthesizer::new("You like green tea."));
        let chat = session().with_synthesizer(mock.clone());

        chat.respond("I work at Google.").await.unwrap();
        chat.respond("I like green tea!").await.unwrap();

        assert_eq!(chat.respond("What do I like?").await.unwrap(), "You like green tea.");
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].triples, vec!["user_1 LIKES green tea"]);
        assert_eq!(calls[0].question, "What do I like?");
    }

    #[tokio::test]
    async fn test_no_facts_skips_synthesizer() {
        let mock = Arc::new(MockSynthesizer::new("unused"));
        let chat = session().with_synthesizer(mock.clone());

        assert_eq!(chat.respond("Where do I work?").await.unwrap(), UNKNOWN_ANSWER);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_an_error() {
        let chat = session().with_synthesizer(Arc::new(MockSynthesizer::failing()));
        chat.respond("I work at Google.").await.unwrap();

        let err = chat.respond("Where do I work?").await.unwrap_err();
        assert!(matches!(err, ChatError::Synthesis(_)));
    }

    #[tokio::test]
    async fn test_users_are_partitioned() {
        let mut chat = session();
        chat.respond("I work at Google.").await.unwrap();

        chat.set_user("user_2");
        assert_eq!(chat.user_id(), "user_2");
        assert_eq!(chat.respond("Where do I work?").await.unwrap(), UNKNOWN_ANSWER);
        assert_eq!(
            chat.graph().query_facts("user_1", &Relation::WorksAt),
            vec!["Google"]
        );
    }
}
