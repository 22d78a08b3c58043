//! Per-user personal-fact memory.
//!
//! This crate provides:
//! - A deduplicated, per-user fact graph (`WORKS_AT`, `LIVES_IN`, ...)
//! - Rule-based relation extraction from dependency-parsed sentences
//! - Manual `remember:` / `recall:` commands
//! - Answers grounded in stored facts, optionally phrased by an LLM
//!
//! # Quick Start
//!
//! ```ignore
//! use graphmem_core::{ChatSession, HttpParser, MemoryService, SharedFactGraph};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let parser = HttpParser::new("http://127.0.0.1:8080/parse")?;
//!     let service = MemoryService::new(SharedFactGraph::new(), Arc::new(parser));
//!     let chat = ChatSession::new(service, "user_1");
//!
//!     println!("{}", chat.respond("I work at Google.").await?);
//!     println!("{}", chat.respond("Where do I work?").await?);
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod chat;
pub mod command;
pub mod extract;
pub mod graph;
pub mod intent;
pub mod parser;
pub mod service;
pub mod testing;

// Primary public API
pub use answer::{AnswerSynthesizer, GroqSynthesizer, SynthesisError, UNKNOWN_ANSWER};
pub use chat::{ChatError, ChatSession};
pub use command::{Command, CommandError};
pub use extract::{AnnotatedSentence, RawToken, RelationExtractor, Triple};
pub use graph::{Fact, FactGraph, NodeKind, Relation, SharedFactGraph};
pub use parser::{HttpParser, ParseError, SentenceParser};
pub use service::MemoryService;
pub use testing::{MockSynthesizer, ScriptedParser};
