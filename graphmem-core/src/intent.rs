//! Keyword matching for recall questions such as "where do I work?".
//!
//! Cheap fallback used when a line is not a statement: it only picks which
//! relation the question is about.

use crate::graph::Relation;

/// Words that open a question.
const QUESTION_OPENERS: [&str; 14] = [
    "what", "where", "which", "who", "whom", "whose", "when", "how", "do", "does", "did", "am",
    "is", "are",
];

/// Ordered keyword table. Earlier rows win, so "study at" is checked before
/// the bare "study".
static RECALL_KEYWORDS: [(&[&str], Relation); 5] = [
    (&["work", "job", "employer", "company", "office"], Relation::WorksAt),
    (&["live", "home", "city", "reside", "stay"], Relation::LivesIn),
    (
        &["study at", "studying at", "school", "college", "university"],
        Relation::StudiesAt,
    ),
    (&["study", "studying", "major", "subject"], Relation::Studies),
    (&["like", "favorite", "favourite", "enjoy", "love"], Relation::Likes),
];

/// Pick the relation a recall question is asking about.
pub fn detect_recall_relation(question: &str) -> Option<Relation> {
    let words = normalize(question);
    RECALL_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| contains_phrase(&words, k)))
        .map(|(_, relation)| relation.clone())
}

/// Whether a line reads like a question rather than a statement.
pub fn looks_like_question(text: &str) -> bool {
    let text = text.trim();
    if text.ends_with('?') {
        return true;
    }
    normalize(text)
        .first()
        .is_some_and(|w| QUESTION_OPENERS.contains(&w.as_str()))
}

/// Lower-case words with punctuation removed.
fn normalize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Match a (possibly multi-word) phrase on word boundaries.
fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    if parts.is_empty() || parts.len() > words.len() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(w, p)| w == p))
}
