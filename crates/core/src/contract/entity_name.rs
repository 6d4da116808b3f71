//! Entity name type
//!
//! Entities are addressed by a normalized, snake-case name such as `user`
//! or `customer_invoice`. Command tokens spell them in camel case
//! (`CustomerInvoice`); [`EntityName::from_camel`] performs the conversion.
//!
//! ## Validation
//!
//! Entity names must:
//! - Be 1-128 bytes
//! - Contain only lower-case ASCII letters, digits and underscore
//! - Start with a letter
//! - Not end with an underscore or contain `__`

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of an entity name
pub const MAX_ENTITY_NAME_LENGTH: usize = 128;

/// Suffix appended to an entity name to form its foreign-key attribute
pub const FOREIGN_KEY_SUFFIX: &str = "_id";

/// Normalized entity name
///
/// ## Examples
///
/// Valid names:
/// - "user"
/// - "customer_invoice"
/// - "sports_car2"
///
/// Invalid names:
/// - "" (empty)
/// - "User" (upper case)
/// - "_user"
/// - "user__name"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityName(String);

/// Error when validating an entity name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityNameError {
    /// Name is empty
    #[error("entity name cannot be empty")]
    Empty,
    /// Name exceeds maximum length
    #[error("entity name too long: {length} bytes (max {max})")]
    TooLong {
        /// Actual length of the name
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Name contains invalid character
    #[error("invalid character '{char}' at position {position} (only a-z, 0-9 and underscore allowed)")]
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
    /// Name does not start with a letter
    #[error("entity name must start with a lower-case letter, found '{char}'")]
    InvalidStart {
        /// The invalid starting character
        char: char,
    },
    /// Name has a trailing or doubled underscore
    #[error("entity name '{name}' has a dangling underscore")]
    DanglingUnderscore {
        /// The rejected name
        name: String,
    },
}

impl EntityName {
    /// Create a new EntityName, validating the input
    ///
    /// # Errors
    ///
    /// Returns `EntityNameError` if the name is invalid.
    pub fn new(name: impl Into<String>) -> Result<Self, EntityNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(EntityName(name))
    }

    /// Normalize a camel-case compound word (`CustomerInvoice`) into an
    /// entity name (`customer_invoice`).
    pub fn from_camel(word: &str) -> Result<Self, EntityNameError> {
        Self::new(word.to_case(Case::Snake))
    }

    /// Validate an entity name
    pub fn validate(name: &str) -> Result<(), EntityNameError> {
        if name.is_empty() {
            return Err(EntityNameError::Empty);
        }

        if name.len() > MAX_ENTITY_NAME_LENGTH {
            return Err(EntityNameError::TooLong {
                length: name.len(),
                max: MAX_ENTITY_NAME_LENGTH,
            });
        }

        let first = name.chars().next().unwrap_or_default();
        if !first.is_ascii_lowercase() {
            return Err(EntityNameError::InvalidStart { char: first });
        }

        for (position, c) in name.chars().enumerate() {
            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
                return Err(EntityNameError::InvalidChar { char: c, position });
            }
        }

        if name.ends_with('_') || name.contains("__") {
            return Err(EntityNameError::DanglingUnderscore {
                name: name.to_string(),
            });
        }

        Ok(())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Foreign-key attribute pointing at this entity (`employer` -> `employer_id`)
    pub fn foreign_key(&self) -> String {
        format!("{}{}", self.0, FOREIGN_KEY_SUFFIX)
    }

    /// Camel-case spelling used in command tokens (`customer_invoice` -> `CustomerInvoice`)
    pub fn to_camel(&self) -> String {
        self.0.to_case(Case::Pascal)
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityName {
    type Error = EntityNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntityName::new(value)
    }
}

impl TryFrom<&str> for EntityName {
    type Error = EntityNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EntityName::new(value)
    }
}

impl From<EntityName> for String {
    fn from(name: EntityName) -> Self {
        name.0
    }
}
