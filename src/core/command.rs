//! Command results shared by every player-invoked operation.
//!
//! Game-rule violations are ordinary values, never panics: a declined command
//! returns a `CommandError` and leaves the state untouched.

use crate::companions::CompanionId;
use crate::wallet::Currency;
use std::fmt;
use thiserror::Error;

/// Anything a command can run short of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Currency(Currency),
    SkillPoints,
    PrestigePoints,
    CompanionCards(CompanionId),
}

impl From<Currency> for Resource {
    fn from(currency: Currency) -> Self {
        Resource::Currency(currency)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Currency(currency) => f.write_str(currency.name()),
            Resource::SkillPoints => f.write_str("skill points"),
            Resource::PrestigePoints => f.write_str("prestige points"),
            Resource::CompanionCards(id) => write!(f, "{} cards", id.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Not enough {resource}: need {needed}, have {available}")]
    InsufficientResource {
        resource: Resource,
        needed: u64,
        available: u64,
    },
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyAtLimit(String),
}

impl CommandError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CommandError::InvalidState(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CommandError::NotFound(message.into())
    }

    pub fn at_limit(message: impl Into<String>) -> Self {
        CommandError::AlreadyAtLimit(message.into())
    }

    pub fn short(resource: impl Into<Resource>, needed: u64, available: u64) -> Self {
        CommandError::InsufficientResource {
            resource: resource.into(),
            needed,
            available,
        }
    }
}

/// A successful command: its value, a message, and any incidental effects
/// (auto-disassembly, milestone rewards) the caller should surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T = ()> {
    pub value: T,
    pub message: String,
    pub notes: Vec<String>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, message: impl Into<String>) -> Self {
        Self {
            value,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }
}

impl Outcome<()> {
    pub fn done(message: impl Into<String>) -> Self {
        Self::new((), message)
    }
}

pub type CommandResult<T = ()> = Result<Outcome<T>, CommandError>;

/// Flattened `{ success, message }` view for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub success: bool,
    pub message: String,
}

impl<T> From<&CommandResult<T>> for Reply {
    fn from(result: &CommandResult<T>) -> Self {
        match result {
            Ok(outcome) => {
                let mut message = outcome.message.clone();
                for note in &outcome.notes {
                    message.push_str(" | ");
                    message.push_str(note);
                }
                Reply {
                    success: true,
                    message,
                }
            }
            Err(err) => Reply {
                success: false,
                message: err.to_string(),
            },
        }
    }
}
