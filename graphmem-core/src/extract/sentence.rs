//! Dependency-annotated sentences.
//!
//! Tokens live in one vector and refer to each other by index, so the parse
//! tree can be walked in both directions without shared ownership.

use crate::parser::ParseError;
use serde::{Deserialize, Serialize};

/// Dependency and part-of-speech labels the extractor looks at.
pub mod labels {
    pub const ROOT: &str = "ROOT";
    pub const NSUBJ: &str = "nsubj";
    pub const NSUBJPASS: &str = "nsubjpass";
    pub const NEG: &str = "neg";
    pub const DOBJ: &str = "dobj";
    pub const ATTR: &str = "attr";
    pub const PREP: &str = "prep";
    pub const POBJ: &str = "pobj";

    pub const VERB: &str = "VERB";

    /// Fine-grained tags for wh-pronouns and wh-adverbs.
    pub const INTERROGATIVE_TAGS: [&str; 3] = ["WP", "WP$", "WRB"];
}

/// A token as handed over by a parser, before the tree is indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    pub text: String,
    pub lemma: String,
    /// Coarse part of speech (`VERB`, `PRON`, ...).
    pub pos: String,
    /// Fine-grained tag (`VBP`, `WRB`, ...).
    pub tag: String,
    /// Dependency role (`ROOT`, `nsubj`, ...).
    pub dep: String,
    /// Index of the head token. A root points at itself.
    pub head: usize,
    /// Whether a space follows this token in the source text.
    #[serde(default = "default_whitespace")]
    pub whitespace: bool,
    /// Character offsets `start..end` of the token in the sentence text.
    #[serde(default)]
    pub span: Option<(usize, usize)>,
}

fn default_whitespace() -> bool {
    true
}

impl RawToken {
    /// Create a token followed by a space.
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: impl Into<String>,
        tag: impl Into<String>,
        dep: impl Into<String>,
        head: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos: pos.into(),
            tag: tag.into(),
            dep: dep.into(),
            head,
            whitespace: true,
            span: None,
        }
    }

    /// Record where the token sits in the sentence text (character offsets).
    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Some((start, end));
        self
    }

    /// Mark this token as directly followed by the next one.
    pub fn no_space(mut self) -> Self {
        self.whitespace = false;
        self
    }
}

/// A token inside an [`AnnotatedSentence`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub lemma: String,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    /// Head index; equal to `index` for a root.
    pub head: usize,
    /// Child indices in sentence order.
    pub children: Vec<usize>,
    /// First token index covered by this token's subtree.
    pub left_edge: usize,
    /// Last token index covered by this token's subtree.
    pub right_edge: usize,
    pub whitespace: bool,
    /// Character offsets in the sentence text, when the parser supplied them.
    pub span: Option<(usize, usize)>,
}

impl Token {
    /// Whether this token heads its own tree.
    pub fn is_root(&self) -> bool {
        self.head == self.index
    }
}

/// A sentence decomposed into dependency-annotated tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSentence {
    text: String,
    tokens: Vec<Token>,
}

impl AnnotatedSentence {
    /// Index raw parser output into a navigable tree.
    ///
    /// Fails when a head index or character span is out of range, or heads
    /// form a cycle.
    pub fn from_raw(text: impl Into<String>, raw: Vec<RawToken>) -> Result<Self, ParseError> {
        let text = text.into();
        let len = raw.len();
        let char_count = text.chars().count();
        for (i, t) in raw.iter().enumerate() {
            if let Some((start, end)) = t.span {
                if start > end || end > char_count {
                    return Err(ParseError::Malformed(format!(
                        "token {i} ({:?}) spans {start}..{end} outside text of {char_count} characters",
                        t.text
                    )));
                }
            }
        }
        if let Some((i, t)) = raw.iter().enumerate().find(|(_, t)| t.head >= len) {
            return Err(ParseError::Malformed(format!(
                "token {i} ({:?}) has head {} outside 0..{len}",
                t.text, t.head
            )));
        }

        let mut tokens: Vec<Token> = raw
            .into_iter()
            .enumerate()
            .map(|(index, t)| Token {
                index,
                text: t.text,
                lemma: t.lemma,
                pos: t.pos,
                tag: t.tag,
                dep: t.dep,
                head: t.head,
                children: Vec::new(),
                left_edge: index,
                right_edge: index,
                whitespace: t.whitespace,
                span: t.span,
            })
            .collect();

        for i in 0..len {
            let head = tokens[i].head;
            if head != i {
                tokens[head].children.push(i);
            }
        }

        // Widen every ancestor's span by each token it dominates.
        for i in 0..len {
            let mut current = i;
            let mut steps = 0;
            while tokens[current].head != current {
                current = tokens[current].head;
                steps += 1;
                if steps > len {
                    return Err(ParseError::Malformed(format!(
                        "head cycle through token {i} ({:?})",
                        tokens[i].text
                    )));
                }
                let ancestor = &mut tokens[current];
                ancestor.left_edge = ancestor.left_edge.min(i);
                ancestor.right_edge = ancestor.right_edge.max(i);
            }
        }

        Ok(Self { text, tokens })
    }

    /// Build a sentence whose text is reassembled from its tokens.
    ///
    /// Each token's span is set to where it lands in the reassembled text.
    pub fn from_tokens(mut raw: Vec<RawToken>) -> Result<Self, ParseError> {
        let mut text = String::new();
        let mut offset = 0;
        let count = raw.len();
        for (i, t) in raw.iter_mut().enumerate() {
            let end = offset + t.text.chars().count();
            t.span = Some((offset, end));
            text.push_str(&t.text);
            offset = end;
            if t.whitespace && i + 1 < count {
                text.push(' ');
                offset += 1;
            }
        }
        Self::from_raw(text, raw)
    }

    /// The original sentence text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All tokens in sentence order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get a token by index.
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the direct children of a token in sentence order.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .get(index)
            .map(|t| t.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&c| self.tokens.get(c))
    }

    /// Surface text of a token's whole subtree, leftmost to rightmost token.
    ///
    /// With character spans this is the exact slice of the sentence text;
    /// otherwise tokens are rejoined with single spaces.
    pub fn subtree_text(&self, index: usize) -> String {
        let Some(token) = self.tokens.get(index) else {
            return String::new();
        };
        let span = &self.tokens[token.left_edge..=token.right_edge];

        let first = span.first().and_then(|t| t.span);
        let last = span.last().and_then(|t| t.span);
        if let (Some((start, _)), Some((_, end))) = (first, last) {
            return self.text.chars().skip(start).take(end.saturating_sub(start)).collect();
        }

        let mut text = String::new();
        for (i, t) in span.iter().enumerate() {
            text.push_str(&t.text);
            if t.whitespace && i + 1 < span.len() {
                text.push(' ');
            }
        }
        text
    }
}
