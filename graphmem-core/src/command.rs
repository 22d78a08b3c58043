//! Manual `remember:` / `recall:` commands.
//!
//! These bypass linguistic processing entirely: the first whitespace token
//! is the relation label and the rest of the line is the entity.

use crate::graph::Relation;
use thiserror::Error;

pub const REMEMBER_PREFIX: &str = "remember:";
pub const RECALL_PREFIX: &str = "recall:";

/// A malformed manual command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("remember needs a relation and an entity")]
    MissingEntity,

    #[error("recall needs a relation")]
    MissingRelation,
}

impl CommandError {
    /// Usage hint for the command that failed.
    pub fn usage(&self) -> &'static str {
        match self {
            CommandError::MissingEntity => "remember: relation entity",
            CommandError::MissingRelation => "recall: relation",
        }
    }
}

/// A parsed manual command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store `relation entity` for the current user.
    Remember { relation: Relation, entity: String },
    /// List the entities stored under `relation`.
    Recall { relation: Relation },
}

impl Command {
    /// Parse a line of input.
    ///
    /// Returns `None` when the line is not a command at all, so the caller
    /// can treat it as a statement or question instead.
    pub fn parse(input: &str) -> Option<Result<Command, CommandError>> {
        let input = input.trim();
        if let Some(body) = input.strip_prefix(REMEMBER_PREFIX) {
            Some(
                parse_remember(body)
                    .map(|(relation, entity)| Command::Remember { relation, entity }),
            )
        } else if let Some(body) = input.strip_prefix(RECALL_PREFIX) {
            Some(parse_recall(body).map(|relation| Command::Recall { relation }))
        } else {
            None
        }
    }
}

/// Split the body of a `remember:` command into relation and entity.
pub fn parse_remember(body: &str) -> Result<(Relation, String), CommandError> {
    let body = body.trim();
    let (label, rest) = body
        .split_once(char::is_whitespace)
        .ok_or(CommandError::MissingEntity)?;
    let entity = rest.trim();
    if label.is_empty() || entity.is_empty() {
        return Err(CommandError::MissingEntity);
    }
    Ok((Relation::from_label(label), entity.to_string()))
}

/// Get the relation named in the body of a `recall:` command.
pub fn parse_recall(body: &str) -> Result<Relation, CommandError> {
    let label = body.trim();
    if label.is_empty() {
        return Err(CommandError::MissingRelation);
    }
    Ok(Relation::from_label(label))
}
