//! The linguistic parser seam.
//!
//! Sentence annotation is done by an external service. [`HttpParser`] talks
//! to any endpoint that accepts `{"text": "..."}` and answers with a spaCy
//! `Doc.to_json()` document:
//!
//! ```json
//! {"text": "I work at Google.",
//!  "tokens": [{"id": 0, "start": 0, "end": 1, "tag": "PRP", "pos": "PRON",
//!              "lemma": "I", "dep": "nsubj", "head": 1}, ...]}
//! ```
//!
//! Offsets are in characters, not bytes.

use crate::extract::{AnnotatedSentence, RawToken};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default address of a local annotation service.
pub const DEFAULT_PARSER_URL: &str = "http://127.0.0.1:8080/parse";

/// Errors from annotating a sentence.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parser service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode parser output: {0}")]
    Decode(String),

    #[error("Malformed parse: {0}")]
    Malformed(String),

    #[error("No parse available for: {0:?}")]
    Unsupported(String),
}

/// Turns raw text into a dependency-annotated sentence.
///
/// Implementations must be deterministic for a given text.
#[async_trait]
pub trait SentenceParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<AnnotatedSentence, ParseError>;
}

/// Client for an HTTP annotation service returning spaCy JSON.
#[derive(Clone)]
pub struct HttpParser {
    client: reqwest::Client,
    url: String,
}

impl HttpParser {
    /// Create a parser client for the given endpoint.
    pub fn new(url: impl Into<String>) -> Result<Self, ParseError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ParseError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

#[async_trait]
impl SentenceParser for HttpParser {
    async fn parse(&self, text: &str) -> Result<AnnotatedSentence, ParseError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ParseRequest { text })
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "parser unreachable");
                ParseError::Network(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ParseError::Api { status, message });
        }

        let doc: SpacyDoc = response
            .json()
            .await
            .map_err(|e| ParseError::Decode(e.to_string()))?;

        debug!(tokens = doc.tokens.len(), "parsed sentence");
        doc.into_sentence()
    }
}

/// A spaCy `Doc.to_json()` document.
#[derive(Debug, Clone, Deserialize)]
pub struct SpacyDoc {
    pub text: String,
    pub tokens: Vec<SpacyToken>,
}

/// One token of a spaCy document.
#[derive(Debug, Clone, Deserialize)]
pub struct SpacyToken {
    pub id: usize,
    /// Character offset of the first character.
    pub start: usize,
    /// Character offset one past the last character.
    pub end: usize,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub dep: String,
    pub head: usize,
}

impl SpacyDoc {
    /// Decode a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(|e| ParseError::Decode(e.to_string()))
    }

    /// Convert to an annotated sentence, recovering token text and trailing
    /// whitespace from the character offsets.
    pub fn into_sentence(self) -> Result<AnnotatedSentence, ParseError> {
        let chars: Vec<char> = self.text.chars().collect();
        let mut raw = Vec::with_capacity(self.tokens.len());

        for (position, token) in self.tokens.iter().enumerate() {
            if token.id != position {
                return Err(ParseError::Malformed(format!(
                    "token ids out of order: expected {position}, found {}",
                    token.id
                )));
            }
            if token.start > token.end || token.end > chars.len() {
                return Err(ParseError::Malformed(format!(
                    "token {} spans {}..{} outside text of {} characters",
                    token.id,
                    token.start,
                    token.end,
                    chars.len()
                )));
            }

            let text: String = chars[token.start..token.end].iter().collect();
            let whitespace = chars.get(token.end).is_some_and(|c| c.is_whitespace());
            let lemma = if token.lemma.is_empty() {
                text.clone()
            } else {
                token.lemma.clone()
            };

            let mut raw_token = RawToken::new(
                text,
                lemma,
                token.pos.clone(),
                token.tag.clone(),
                token.dep.clone(),
                token.head,
            )
            .with_span(token.start, token.end);
            raw_token.whitespace = whitespace;
            raw.push(raw_token);
        }

        AnnotatedSentence::from_raw(self.text, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RelationExtractor;
    use crate::graph::Relation;

    const WORK_AT_GOOGLE: &str = r#"{
        "text": "I work at Google.",
        "ents": [{"start": 10, "end": 16, "label": "ORG"}],
        "sents": [{"start": 0, "end": 17}],
        "tokens": [
            {"id": 0, "start": 0, "end": 1, "tag": "PRP", "pos": "PRON", "morph": "Case=Nom", "lemma": "I", "dep": "nsubj", "head": 1},
            {"id": 1, "start": 2, "end": 6, "tag": "VBP", "pos": "VERB", "morph": "Tense=Pres", "lemma": "work", "dep": "ROOT", "head": 1},
            {"id": 2, "start": 7, "end": 9, "tag": "IN", "pos": "ADP", "morph": "", "lemma": "at", "dep": "prep", "head": 1},
            {"id": 3, "start": 10, "end": 16, "tag": "NNP", "pos": "PROPN", "morph": "Number=Sing", "lemma": "Google", "dep": "pobj", "head": 2},
            {"id": 4, "start": 16, "end": 17, "tag": ".", "pos": "PUNCT", "morph": "", "lemma": ".", "dep": "punct", "head": 1}
        ]
    }"#;

    #[test]
    fn test_spacy_doc_conversion() {
        let sentence = SpacyDoc::from_json(WORK_AT_GOOGLE)
            .unwrap()
            .into_sentence()
            .unwrap();

        assert_eq!(sentence.text(), "I work at Google.");
        assert_eq!(sentence.len(), 5);
        assert_eq!(sentence.token(3).unwrap().text, "Google");
        assert!(!sentence.token(3).unwrap().whitespace);
        assert!(sentence.token(2).unwrap().whitespace);
        assert_eq!(sentence.subtree_text(1), "I work at Google.");

        let triple = RelationExtractor::new().extract(&sentence).unwrap();
        assert_eq!(triple.relation, Relation::WorksAt);
        assert_eq!(triple.entity, "Google");
    }

    #[test]
    fn test_character_offsets() {
        // "I live in Zürich" - the umlaut is two bytes but one character
        let json = r#"{
            "text": "I live in Zürich",
            "tokens": [
                {"id": 0, "start": 0, "end": 1, "tag": "PRP", "pos": "PRON", "lemma": "I", "dep": "nsubj", "head": 1},
                {"id": 1, "start": 2, "end": 6, "tag": "VBP", "pos": "VERB", "lemma": "live", "dep": "ROOT", "head": 1},
                {"id": 2, "start": 7, "end": 9, "tag": "IN", "pos": "ADP", "lemma": "in", "dep": "prep", "head": 1},
                {"id": 3, "start": 10, "end": 16, "tag": "NNP", "pos": "PROPN", "lemma": "Zürich", "dep": "pobj", "head": 2}
            ]
        }"#;
        let sentence = SpacyDoc::from_json(json).unwrap().into_sentence().unwrap();
        assert_eq!(sentence.token(3).unwrap().text, "Zürich");
    }

    #[test]
    fn test_entity_keeps_source_spacing() {
        let json = r#"{
            "text": "I work at Tata   Motors.",
            "tokens": [
                {"id": 0, "start": 0, "end": 1, "tag": "PRP", "pos": "PRON", "lemma": "I", "dep": "nsubj", "head": 1},
                {"id": 1, "start": 2, "end": 6, "tag": "VBP", "pos": "VERB", "lemma": "work", "dep": "ROOT", "head": 1},
                {"id": 2, "start": 7, "end": 9, "tag": "IN", "pos": "ADP", "lemma": "at", "dep": "prep", "head": 1},
                {"id": 3, "start": 10, "end": 14, "tag": "NNP", "pos": "PROPN", "lemma": "Tata", "dep": "compound", "head": 4},
                {"id": 4, "start": 17, "end": 23, "tag": "NNP", "pos": "PROPN", "lemma": "Motors", "dep": "pobj", "head": 2},
                {"id": 5, "start": 23, "end": 24, "tag": ".", "pos": "PUNCT", "lemma": ".", "dep": "punct", "head": 1}
            ]
        }"#;
        let sentence = SpacyDoc::from_json(json).unwrap().into_sentence().unwrap();
        assert_eq!(sentence.token(4).unwrap().span, Some((17, 23)));

        let triple = RelationExtractor::new().extract(&sentence).unwrap();
        assert_eq!(triple.entity, "Tata   Motors");
    }

    #[test]
    fn test_offsets_outside_text() {
        let json = r#"{"text": "Hi", "tokens": [
            {"id": 0, "start": 0, "end": 9, "tag": "UH", "pos": "INTJ", "lemma": "hi", "dep": "ROOT", "head": 0}
        ]}"#;
        let err = SpacyDoc::from_json(json).unwrap().into_sentence().unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SpacyDoc::from_json("{not json"),
            Err(ParseError::Decode(_))
        ));
    }

    #[test]
    fn test_http_parser_creation() {
        let parser = HttpParser::new(DEFAULT_PARSER_URL).unwrap();
        assert_eq!(parser.url(), DEFAULT_PARSER_URL);
    }
}
