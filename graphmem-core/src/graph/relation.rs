//! Relation labels on fact edges.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The label carried by an edge from a user to an entity.
///
/// The extractor only ever produces the five built-in relations. Manual
/// `remember:` commands may supply any other label, which is kept verbatim
/// as [`Relation::Custom`].
///
/// Relations compare, hash and sort by label, so a `Custom` carrying a
/// built-in label is the same relation as that built-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Relation {
    /// Employer or workplace.
    WorksAt,
    /// City or place of residence.
    LivesIn,
    /// School, college or university.
    StudiesAt,
    /// Field or subject of study.
    Studies,
    /// Something the user likes.
    Likes,
    /// Any other label supplied by hand. Prefer [`Relation::from_label`],
    /// which maps built-in labels to their own variants.
    Custom(String),
}

impl Relation {
    /// All relations the extractor can emit.
    pub const BUILTIN: [Relation; 5] = [
        Relation::WorksAt,
        Relation::LivesIn,
        Relation::StudiesAt,
        Relation::Studies,
        Relation::Likes,
    ];

    /// Get the edge label for this relation.
    pub fn label(&self) -> &str {
        match self {
            Relation::WorksAt => "WORKS_AT",
            Relation::LivesIn => "LIVES_IN",
            Relation::StudiesAt => "STUDIES_AT",
            Relation::Studies => "STUDIES",
            Relation::Likes => "LIKES",
            Relation::Custom(label) => label,
        }
    }

    /// Map a label to a relation.
    ///
    /// Built-in labels match case-insensitively; anything else becomes a
    /// custom relation with the trimmed label unchanged.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::BUILTIN
            .iter()
            .find(|r| r.label().eq_ignore_ascii_case(label))
            .cloned()
            .unwrap_or_else(|| Relation::Custom(label.to_string()))
    }

    /// Whether this is one of the extractor's relations.
    pub fn is_builtin(&self) -> bool {
        Self::BUILTIN.contains(self)
    }

    /// The built-in variant with exactly this label, or a copy of `self`.
    pub fn canonical(&self) -> Relation {
        Self::BUILTIN
            .iter()
            .find(|r| *r == self)
            .cloned()
            .unwrap_or_else(|| self.clone())
    }

    /// Confirmation shown after a fact with this relation is stored.
    pub fn confirmation(&self, entity: &str) -> String {
        match self.canonical() {
            Relation::WorksAt => format!("Got it. I'll remember you work at {entity}."),
            Relation::LivesIn => format!("Got it. I'll remember you live in {entity}."),
            Relation::StudiesAt => format!("Got it. I'll remember you study at {entity}."),
            Relation::Studies => format!("Got it. I'll remember you study {entity}."),
            Relation::Likes => format!("Got it. I'll remember you like {entity}."),
            Relation::Custom(_) => "Got it. I'll remember that.".to_string(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.label() == other.label()
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label().hash(state);
    }
}

impl PartialOrd for Relation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Relation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label().cmp(other.label())
    }
}

impl FromStr for Relation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl From<String> for Relation {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.label().to_string()
    }
}
