//! Testing utilities.
//!
//! This module provides tools for testing without a parser service or an
//! API key:
//! - `ScriptedParser` returning canned parses
//! - `MockSynthesizer` returning a fixed answer and recording its calls
//! - `fixtures` with hand-written spaCy-style parses of common sentences

use crate::answer::{AnswerSynthesizer, SynthesisError};
use crate::extract::AnnotatedSentence;
use crate::parser::{ParseError, SentenceParser};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A parser that answers from a fixed table of sentences.
///
/// Unknown text fails with [`ParseError::Unsupported`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedParser {
    sentences: HashMap<String, AnnotatedSentence>,
}

impl ScriptedParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that knows every sentence in [`fixtures::all`].
    pub fn with_fixtures() -> Self {
        let mut parser = Self::new();
        for sentence in fixtures::all() {
            parser.add(sentence);
        }
        parser
    }

    /// Register a parse under its own text.
    pub fn add(&mut self, sentence: AnnotatedSentence) {
        self.sentences
            .insert(sentence.text().trim().to_string(), sentence);
    }

    /// Register a parse (builder style).
    pub fn with(mut self, sentence: AnnotatedSentence) -> Self {
        self.add(sentence);
        self
    }
}

#[async_trait]
impl SentenceParser for ScriptedParser {
    async fn parse(&self, text: &str) -> Result<AnnotatedSentence, ParseError> {
        self.sentences
            .get(text.trim())
            .cloned()
            .ok_or_else(|| ParseError::Unsupported(text.to_string()))
    }
}

/// A recorded call to [`MockSynthesizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisCall {
    pub triples: Vec<String>,
    pub question: String,
}

/// An answer synthesizer returning a scripted answer.
pub struct MockSynthesizer {
    answer: Option<String>,
    calls: Mutex<Vec<SynthesisCall>>,
}

impl MockSynthesizer {
    /// Always answer with `answer`.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail as if the API were unreachable.
    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AnswerSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        triples: &[String],
        question: &str,
    ) -> Result<String, SynthesisError> {
        self.calls.lock().push(SynthesisCall {
            triples: triples.to_vec(),
            question: question.to_string(),
        });
        self.answer
            .clone()
            .ok_or_else(|| groq::Error::Network("mock synthesizer offline".to_string()).into())
    }
}

/// Hand-written parses in the shape spaCy's English models produce.
pub mod fixtures {
    use crate::extract::{AnnotatedSentence, RawToken};

    fn tok(text: &str, lemma: &str, pos: &str, tag: &str, dep: &str, head: usize) -> RawToken {
        RawToken::new(text, lemma, pos, tag, dep, head)
    }

    fn build(tokens: Vec<RawToken>) -> AnnotatedSentence {
        AnnotatedSentence::from_tokens(tokens).expect("fixture parses are well formed")
    }

    /// Every fixture below.
    pub fn all() -> Vec<AnnotatedSentence> {
        vec![
            work_at_google(),
            work_at_microsoft(),
            study_physics(),
            study_at_mit(),
            live_in_new_delhi(),
            like_green_tea(),
            like_pizza_punct_in_object(),
            do_i_work_at_google(),
            where_do_i_work(),
            where_do_i_live(),
            what_do_i_like(),
            dont_work_at_google(),
            she_works_at_google(),
            i_sleep(),
            i_am_a_student(),
            why_do_i_like_tea(),
            work_a_night_shift(),
        ]
    }

    /// "I work at Google."
    pub fn work_at_google() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("work", "work", "VERB", "VBP", "ROOT", 1),
            tok("at", "at", "ADP", "IN", "prep", 1),
            tok("Google", "Google", "PROPN", "NNP", "pobj", 2).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I work at Microsoft."
    pub fn work_at_microsoft() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("work", "work", "VERB", "VBP", "ROOT", 1),
            tok("at", "at", "ADP", "IN", "prep", 1),
            tok("Microsoft", "Microsoft", "PROPN", "NNP", "pobj", 2).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I study Physics."
    pub fn study_physics() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("study", "study", "VERB", "VBP", "ROOT", 1),
            tok("Physics", "Physics", "PROPN", "NNP", "dobj", 1).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I study at MIT."
    pub fn study_at_mit() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("study", "study", "VERB", "VBP", "ROOT", 1),
            tok("at", "at", "ADP", "IN", "prep", 1),
            tok("MIT", "MIT", "PROPN", "NNP", "pobj", 2).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I live in New Delhi."
    pub fn live_in_new_delhi() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("live", "live", "VERB", "VBP", "ROOT", 1),
            tok("in", "in", "ADP", "IN", "prep", 1),
            tok("New", "New", "PROPN", "NNP", "compound", 4),
            tok("Delhi", "Delhi", "PROPN", "NNP", "pobj", 2).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I like green tea!"
    pub fn like_green_tea() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("like", "like", "VERB", "VBP", "ROOT", 1),
            tok("green", "green", "ADJ", "JJ", "amod", 3),
            tok("tea", "tea", "NOUN", "NN", "dobj", 1).no_space(),
            tok("!", "!", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I like pizza." with the period attached under "pizza", so the object
    /// span itself ends in punctuation.
    pub fn like_pizza_punct_in_object() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("like", "like", "VERB", "VBP", "ROOT", 1),
            tok("pizza", "pizza", "NOUN", "NN", "dobj", 1).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 2),
        ])
    }

    /// "Do I work at Google?"
    pub fn do_i_work_at_google() -> AnnotatedSentence {
        build(vec![
            tok("Do", "do", "AUX", "VBP", "aux", 2),
            tok("I", "I", "PRON", "PRP", "nsubj", 2),
            tok("work", "work", "VERB", "VB", "ROOT", 2),
            tok("at", "at", "ADP", "IN", "prep", 2),
            tok("Google", "Google", "PROPN", "NNP", "pobj", 3).no_space(),
            tok("?", "?", "PUNCT", ".", "punct", 2),
        ])
    }

    /// "Where do I work?"
    pub fn where_do_i_work() -> AnnotatedSentence {
        build(vec![
            tok("Where", "where", "SCONJ", "WRB", "advmod", 3),
            tok("do", "do", "AUX", "VBP", "aux", 3),
            tok("I", "I", "PRON", "PRP", "nsubj", 3),
            tok("work", "work", "VERB", "VB", "ROOT", 3).no_space(),
            tok("?", "?", "PUNCT", ".", "punct", 3),
        ])
    }

    /// "Where do I live?"
    pub fn where_do_i_live() -> AnnotatedSentence {
        build(vec![
            tok("Where", "where", "SCONJ", "WRB", "advmod", 3),
            tok("do", "do", "AUX", "VBP", "aux", 3),
            tok("I", "I", "PRON", "PRP", "nsubj", 3),
            tok("live", "live", "VERB", "VB", "ROOT", 3).no_space(),
            tok("?", "?", "PUNCT", ".", "punct", 3),
        ])
    }

    /// "What do I like?"
    pub fn what_do_i_like() -> AnnotatedSentence {
        build(vec![
            tok("What", "what", "PRON", "WP", "dobj", 3),
            tok("do", "do", "AUX", "VBP", "aux", 3),
            tok("I", "I", "PRON", "PRP", "nsubj", 3),
            tok("like", "like", "VERB", "VB", "ROOT", 3).no_space(),
            tok("?", "?", "PUNCT", ".", "punct", 3),
        ])
    }

    /// "I don't work at Google."
    pub fn dont_work_at_google() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 3),
            tok("do", "do", "AUX", "VBP", "aux", 3).no_space(),
            tok("n't", "not", "PART", "RB", "neg", 3),
            tok("work", "work", "VERB", "VB", "ROOT", 3),
            tok("at", "at", "ADP", "IN", "prep", 3),
            tok("Google", "Google", "PROPN", "NNP", "pobj", 4).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 3),
        ])
    }

    /// "She works at Google."
    pub fn she_works_at_google() -> AnnotatedSentence {
        build(vec![
            tok("She", "she", "PRON", "PRP", "nsubj", 1),
            tok("works", "work", "VERB", "VBZ", "ROOT", 1),
            tok("at", "at", "ADP", "IN", "prep", 1),
            tok("Google", "Google", "PROPN", "NNP", "pobj", 2).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I sleep."
    pub fn i_sleep() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("sleep", "sleep", "VERB", "VBP", "ROOT", 1).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "Why do I like tea" - a question with no question mark.
    pub fn why_do_i_like_tea() -> AnnotatedSentence {
        build(vec![
            tok("Why", "why", "SCONJ", "WRB", "advmod", 3),
            tok("do", "do", "AUX", "VBP", "aux", 3),
            tok("I", "I", "PRON", "PRP", "nsubj", 3),
            tok("like", "like", "VERB", "VB", "ROOT", 3),
            tok("tea", "tea", "NOUN", "NN", "dobj", 3),
        ])
    }

    /// "I work a night shift." with the object labelled `attr`.
    pub fn work_a_night_shift() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("work", "work", "VERB", "VBP", "ROOT", 1),
            tok("a", "a", "DET", "DT", "det", 4),
            tok("night", "night", "NOUN", "NN", "compound", 4),
            tok("shift", "shift", "NOUN", "NN", "attr", 1).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }

    /// "I am a student."
    pub fn i_am_a_student() -> AnnotatedSentence {
        build(vec![
            tok("I", "I", "PRON", "PRP", "nsubj", 1),
            tok("am", "be", "AUX", "VBP", "ROOT", 1),
            tok("a", "a", "DET", "DT", "det", 3),
            tok("student", "student", "NOUN", "NN", "attr", 1).no_space(),
            tok(".", ".", "PUNCT", ".", "punct", 1),
        ])
    }
}
