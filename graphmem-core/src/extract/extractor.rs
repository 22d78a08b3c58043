//! First-person fact extraction from a dependency parse.

use super::rules::{RelationRule, DEFAULT_RULES};
use super::sentence::{labels, AnnotatedSentence};
use crate::graph::Relation;
use tracing::debug;

/// Characters removed from the end of an extracted object.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?'];

/// A relation and object found in a sentence. The subject is always the
/// speaking user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub relation: Relation,
    pub entity: String,
}

impl Triple {
    /// Create a new triple.
    pub fn new(relation: Relation, entity: impl Into<String>) -> Self {
        Self {
            relation,
            entity: entity.into(),
        }
    }
}

/// Decides whether a sentence states a storable fact about the speaker.
///
/// A sentence passes through these gates in order; the first one that fails
/// yields `None`:
/// 1. it is not a question,
/// 2. some `ROOT` verb has the subject "I",
/// 3. that verb is not negated,
/// 4. that verb has an object span,
/// 5. the verb lemma maps to a relation in the rule table.
#[derive(Debug, Clone)]
pub struct RelationExtractor {
    rules: Vec<RelationRule>,
}

impl Default for RelationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationExtractor {
    /// Create an extractor with the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Create an extractor with a custom rule table.
    pub fn with_rules(rules: Vec<RelationRule>) -> Self {
        Self { rules }
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[RelationRule] {
        &self.rules
    }

    /// Extract a triple from the sentence, if it states one.
    pub fn extract(&self, sentence: &AnnotatedSentence) -> Option<Triple> {
        if is_question(sentence) {
            debug!(text = sentence.text(), "skipping question");
            return None;
        }

        let Some(verb) = first_person_root_verb(sentence) else {
            debug!(text = sentence.text(), "no first-person root verb");
            return None;
        };

        if is_negated(sentence, verb) {
            debug!(text = sentence.text(), "skipping negated statement");
            return None;
        }

        let Some(entity) = object_text(sentence, verb) else {
            debug!(text = sentence.text(), "no object found");
            return None;
        };

        let lemma = sentence.tokens()[verb].lemma.to_lowercase();
        let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.matches(&lemma, sentence, verb))
        else {
            debug!(text = sentence.text(), lemma = %lemma, "verb has no relation");
            return None;
        };

        Some(Triple::new(rule.relation.clone(), entity))
    }
}

/// A sentence is a question when it opens with a wh-word or ends with `?`.
pub(crate) fn is_question(sentence: &AnnotatedSentence) -> bool {
    let opens_with_wh = sentence
        .tokens()
        .first()
        .is_some_and(|t| labels::INTERROGATIVE_TAGS.contains(&t.tag.as_str()));
    opens_with_wh || sentence.text().trim().ends_with('?')
}

/// Find the first `ROOT` verb whose subject is "I".
pub(crate) fn first_person_root_verb(sentence: &AnnotatedSentence) -> Option<usize> {
    sentence
        .tokens()
        .iter()
        .filter(|t| t.dep == labels::ROOT && t.pos == labels::VERB)
        .find(|t| {
            sentence.children(t.index).any(|c| {
                (c.dep == labels::NSUBJ || c.dep == labels::NSUBJPASS)
                    && c.text.to_lowercase() == "i"
            })
        })
        .map(|t| t.index)
}

pub(crate) fn is_negated(sentence: &AnnotatedSentence, verb: usize) -> bool {
    sentence.children(verb).any(|c| c.dep == labels::NEG)
}

/// Text of the verb's last object: a `dobj`/`attr` subtree or the `pobj`
/// subtree under a `prep`. Trailing punctuation is removed.
pub(crate) fn object_text(sentence: &AnnotatedSentence, verb: usize) -> Option<String> {
    let mut object = None;
    for child in sentence.children(verb) {
        if child.dep == labels::DOBJ || child.dep == labels::ATTR {
            object = Some(sentence.subtree_text(child.index));
        } else if child.dep == labels::PREP {
            if let Some(pobj) = sentence.children(child.index).find(|c| c.dep == labels::POBJ) {
                object = Some(sentence.subtree_text(pobj.index));
            }
        }
    }

    object
        .map(|text| text.trim().trim_end_matches(TRAILING_PUNCTUATION).trim_end().to_string())
        .filter(|text| !text.is_empty())
}
