//! The verb-to-relation table.

use super::sentence::{labels, AnnotatedSentence};
use crate::graph::Relation;

/// Extra condition a rule places on the matched verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCondition {
    /// No extra condition.
    Always,
    /// The verb has a `prep` child whose text is this word (case-insensitive).
    HasPreposition(&'static str),
    /// The verb has no `prep` child with this text.
    LacksPreposition(&'static str),
}

impl RuleCondition {
    /// Evaluate the condition against the verb at `verb` in `sentence`.
    pub fn holds(&self, sentence: &AnnotatedSentence, verb: usize) -> bool {
        match *self {
            RuleCondition::Always => true,
            RuleCondition::HasPreposition(word) => has_preposition(sentence, verb, word),
            RuleCondition::LacksPreposition(word) => !has_preposition(sentence, verb, word),
        }
    }
}

fn has_preposition(sentence: &AnnotatedSentence, verb: usize, word: &str) -> bool {
    sentence
        .children(verb)
        .any(|c| c.dep == labels::PREP && c.text.to_lowercase() == word)
}

/// One row of the table: a verb lemma, the relation it maps to and the
/// condition under which it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRule {
    pub lemma: &'static str,
    pub relation: Relation,
    pub condition: RuleCondition,
}

impl RelationRule {
    /// Check this rule against a lower-cased verb lemma.
    pub fn matches(&self, lemma: &str, sentence: &AnnotatedSentence, verb: usize) -> bool {
        self.lemma == lemma && self.condition.holds(sentence, verb)
    }
}

/// The built-in table. Rows are tried in order and the first match wins.
pub static DEFAULT_RULES: [RelationRule; 5] = [
    RelationRule {
        lemma: "work",
        relation: Relation::WorksAt,
        condition: RuleCondition::Always,
    },
    RelationRule {
        lemma: "live",
        relation: Relation::LivesIn,
        condition: RuleCondition::Always,
    },
    RelationRule {
        lemma: "like",
        relation: Relation::Likes,
        condition: RuleCondition::Always,
    },
    RelationRule {
        lemma: "study",
        relation: Relation::StudiesAt,
        condition: RuleCondition::HasPreposition("at"),
    },
    RelationRule {
        lemma: "study",
        relation: Relation::Studies,
        condition: RuleCondition::LacksPreposition("at"),
    },
];
