//! Relation extraction from dependency-annotated sentences.

mod extractor;
mod rules;
mod sentence;

pub use extractor::{RelationExtractor, Triple};
pub use rules::{RelationRule, RuleCondition, DEFAULT_RULES};
pub use sentence::{labels, AnnotatedSentence, RawToken, Token};
