//! QA tests for full chat turns.
//!
//! These tests drive `ChatSession` the way the front end does:
//! - Statements are stored and confirmed
//! - Questions are answered from the speaker's own facts
//! - Manual commands bypass extraction
//!
//! Run with: `cargo test -p graphmem-core --test qa_chat`

use graphmem_core::chat::{FALLBACK_REPLY, NOT_FOUND_REPLY, STORED_REPLY};
use graphmem_core::testing::{MockSynthesizer, ScriptedParser};
use graphmem_core::{ChatSession, MemoryService, Relation, SharedFactGraph, UNKNOWN_ANSWER};
use std::sync::Arc;

fn chat(graph: &SharedFactGraph, user: &str) -> ChatSession {
    let service = MemoryService::new(graph.clone(), Arc::new(ScriptedParser::with_fixtures()));
    ChatSession::new(service, user)
}

// =============================================================================
// CONVERSATION FLOW
// =============================================================================

#[tokio::test]
async fn test_full_conversation() {
    let graph = SharedFactGraph::new();
    let chat = chat(&graph, "user_1");

    let replies = [
        ("I work at Google.", "Got it. I'll remember you work at Google."),
        ("I live in New Delhi.", "Got it. I'll remember you live in New Delhi."),
        ("I study at MIT.", "Got it. I'll remember you study at MIT."),
        ("I study Physics.", "Got it. I'll remember you study Physics."),
        ("I like green tea!", "Got it. I'll remember you like green tea."),
        ("I don't work at Google.", FALLBACK_REPLY),
        ("Where do I live?", "New Delhi"),
        ("What do I like?", "green tea"),
    ];
    for (input, expected) in replies {
        assert_eq!(chat.respond(input).await.unwrap(), expected, "input: {input}");
    }

    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.list_relations("user_1").len(), 5);
}

#[tokio::test]
async fn test_two_sessions_share_one_graph() {
    let graph = SharedFactGraph::new();
    let alice = chat(&graph, "alice");
    let bob = chat(&graph, "bob");

    alice.respond("I work at Google.").await.unwrap();
    bob.respond("remember: WORKS_AT Acme").await.unwrap();

    assert_eq!(alice.respond("Where do I work?").await.unwrap(), "Google");
    assert_eq!(bob.respond("Where do I work?").await.unwrap(), "Acme");
    assert_eq!(bob.respond("recall: works_at").await.unwrap(), "Acme");
    assert_eq!(graph.edge_count(), 2);
}

// =============================================================================
// MANUAL COMMANDS
// =============================================================================

#[tokio::test]
async fn test_custom_relation_round_trip() {
    let graph = SharedFactGraph::new();
    let chat = chat(&graph, "u");

    assert_eq!(chat.respond("remember: PLAYS chess").await.unwrap(), STORED_REPLY);
    assert_eq!(chat.respond("remember: PLAYS chess").await.unwrap(), STORED_REPLY);
    assert_eq!(chat.respond("recall: PLAYS").await.unwrap(), "chess");
    assert_eq!(chat.respond("recall: plays").await.unwrap(), NOT_FOUND_REPLY);
    assert_eq!(
        graph.query_facts("u", &Relation::Custom("PLAYS".to_string())),
        vec!["chess"]
    );
}

#[tokio::test]
async fn test_remember_single_token_reports_format() {
    let graph = SharedFactGraph::new();
    let chat = chat(&graph, "u");

    assert_eq!(
        chat.respond("remember: LIKES").await.unwrap(),
        "Invalid format. Use: remember: relation entity"
    );
    assert_eq!(graph.edge_count(), 0);
}

// =============================================================================
// ANSWER SYNTHESIS
// =============================================================================

#[tokio::test]
async fn test_synthesizer_sees_only_the_speakers_facts() {
    let graph = SharedFactGraph::new();
    graph.add_fact("someone_else", &Relation::WorksAt, "Initech");

    let mock = Arc::new(MockSynthesizer::new("You work at Google."));
    let chat = chat(&graph, "u").with_synthesizer(mock.clone());

    chat.respond("I work at Google.").await.unwrap();
    assert_eq!(
        chat.respond("Where do I work?").await.unwrap(),
        "You work at Google."
    );

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].triples, vec!["u WORKS_AT Google"]);
}

#[tokio::test]
async fn test_unknown_without_facts() {
    let graph = SharedFactGraph::new();
    let mock = Arc::new(MockSynthesizer::new("should not be called"));
    let chat = chat(&graph, "u").with_synthesizer(mock.clone());

    assert_eq!(chat.respond("What do I like?").await.unwrap(), UNKNOWN_ANSWER);
    assert!(mock.calls().is_empty());
}
