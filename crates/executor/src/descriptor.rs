//! Command descriptors parsed from command tokens.
//!
//! A command token is a single camel-case compound word naming an action,
//! a subject entity and, for creates, an optional parent entity:
//!
//! | Token | Action | Subject | Parent |
//! |-------|--------|---------|--------|
//! | `CreateUser` | Create | `user` | - |
//! | `UpdateSportsCar` | Update | `sports_car` | - |
//! | `CreateUserForEmployer` | Create | `user` | `employer` |
//!
//! The parent separator is the word `For` at a camel word boundary, that
//! is, followed by an upper-case letter. `CreateUserForm` therefore names
//! the subject `user_form`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use foreman_core::{EntityName, EntityNameError};

/// Word separating the subject from the parent entity
pub const PARENT_SEPARATOR: &str = "For";

/// Persistence action named by a command token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Insert a new record
    Create,
    /// Modify an existing record
    Update,
    /// Remove an existing record
    Delete,
}

impl Action {
    /// Every action, in prefix-matching order
    pub const ALL: [Action; 3] = [Action::Create, Action::Update, Action::Delete];

    /// Token prefix spelling of the action
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Update => "Update",
            Action::Delete => "Delete",
        }
    }

    /// Split a leading action word off `token`
    fn strip_prefix(token: &str) -> Option<(Action, &str)> {
        Action::ALL
            .into_iter()
            .find_map(|action| token.strip_prefix(action.as_str()).map(|rest| (action, rest)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a token does not name a command.
///
/// Every variant means "not a command": callers resolving tokens treat
/// them all as a no-match and fall through.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Empty token
    #[error("command token cannot be empty")]
    Empty,

    /// Token is not a single alphanumeric word
    #[error("invalid character '{char}' at position {position} in command token")]
    InvalidChar {
        /// Offending character
        char: char,
        /// Character position
        position: usize,
    },

    /// Token does not start with Create, Update or Delete
    #[error("'{token}' does not start with a known action")]
    UnknownAction {
        /// The rejected token
        token: String,
    },

    /// Nothing between the action and the separator or the end
    #[error("'{token}' names no subject entity")]
    EmptySubject {
        /// The rejected token
        token: String,
    },

    /// Action word runs into a lower-case letter (`Created`, `Updates`)
    #[error("'{token}' does not start a new word after the action")]
    NoWordBoundary {
        /// The rejected token
        token: String,
    },

    /// Separator with nothing after it
    #[error("'{token}' ends with 'For' but names no parent entity")]
    EmptyParent {
        /// The rejected token
        token: String,
    },

    /// Parent given on an action other than Create
    #[error("{action} commands cannot name a parent entity")]
    ParentNotAllowed {
        /// The action that carried a parent
        action: Action,
    },

    /// Subject or parent does not normalize to a valid entity name
    #[error("'{segment}' is not a valid entity: {source}")]
    InvalidEntity {
        /// Camel-case segment of the token
        segment: String,
        /// Underlying validation failure
        #[source]
        source: EntityNameError,
    },
}

/// Structured form of a command token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    action: Action,
    subject: EntityName,
    parent: Option<EntityName>,
}

impl Descriptor {
    /// Build a descriptor from its parts
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ParentNotAllowed` if a parent is given for an
    /// action other than Create.
    pub fn new(
        action: Action,
        subject: EntityName,
        parent: Option<EntityName>,
    ) -> Result<Self, ParseError> {
        if parent.is_some() && action != Action::Create {
            return Err(ParseError::ParentNotAllowed { action });
        }
        Ok(Descriptor {
            action,
            subject,
            parent,
        })
    }

    /// Parse a command token.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing why `token` is not a command.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        if token.is_empty() {
            return Err(ParseError::Empty);
        }
        if let Some((position, c)) = token
            .chars()
            .enumerate()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
        {
            return Err(ParseError::InvalidChar { char: c, position });
        }

        let (action, rest) = Action::strip_prefix(token).ok_or_else(|| ParseError::UnknownAction {
            token: token.to_string(),
        })?;

        match rest.chars().next() {
            None => {
                return Err(ParseError::EmptySubject {
                    token: token.to_string(),
                })
            }
            Some(c) if !c.is_ascii_uppercase() => {
                return Err(ParseError::NoWordBoundary {
                    token: token.to_string(),
                })
            }
            Some(_) => {}
        }

        let (subject, parent) = match find_separator(rest) {
            Some(at) => {
                if action != Action::Create {
                    return Err(ParseError::ParentNotAllowed { action });
                }
                (&rest[..at], Some(&rest[at + PARENT_SEPARATOR.len()..]))
            }
            None => (rest, None),
        };

        if subject.is_empty() {
            return Err(ParseError::EmptySubject {
                token: token.to_string(),
            });
        }
        if parent == Some("") {
            return Err(ParseError::EmptyParent {
                token: token.to_string(),
            });
        }

        let subject = entity(subject)?;
        let parent = parent.map(entity).transpose()?;
        Descriptor::new(action, subject, parent)
    }

    /// The action
    pub fn action(&self) -> Action {
        self.action
    }

    /// The subject entity
    pub fn subject(&self) -> &EntityName {
        &self.subject
    }

    /// The parent entity, only ever present for Create
    pub fn parent(&self) -> Option<&EntityName> {
        self.parent.as_ref()
    }
}

/// First `For` that starts a camel word and is followed by another word or
/// by the end of the token.
fn find_separator(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    rest.match_indices(PARENT_SEPARATOR).map(|(at, _)| at).find(|&at| {
        match bytes.get(at + PARENT_SEPARATOR.len()) {
            None => true,
            Some(next) => next.is_ascii_uppercase(),
        }
    })
}

fn entity(segment: &str) -> Result<EntityName, ParseError> {
    EntityName::from_camel(segment).map_err(|source| ParseError::InvalidEntity {
        segment: segment.to_string(),
        source,
    })
}

impl fmt::Display for Descriptor {
    /// Canonical token spelling (`CreateUserForEmployer`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.action, self.subject.to_camel())?;
        if let Some(parent) = &self.parent {
            write!(f, "{}{}", PARENT_SEPARATOR, parent.to_camel())?;
        }
        Ok(())
    }
}

impl FromStr for Descriptor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Descriptor::parse(s)
    }
}
