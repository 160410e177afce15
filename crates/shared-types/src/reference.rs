// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Validated scripture references
//!
//! A [`VerseReference`] is the human-readable passage selector sent to the
//! upstream scripture API, such as `John 3:16` or `Acts 24:16`. Empty and
//! whitespace-only references cannot be constructed.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

const DEFAULT_REFERENCE: &str = "John 3:16";

/// Error returned when a reference string is empty or whitespace-only
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("verse reference cannot be empty or whitespace-only")]
pub struct InvalidReference;

/// A non-empty, trimmed scripture reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseReference(Box<str>);

impl VerseReference {
    /// Create a reference, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns [`InvalidReference`] if nothing is left after trimming
    pub fn new(reference: impl AsRef<str>) -> Result<Self, InvalidReference> {
        let trimmed = reference.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidReference);
        }
        Ok(Self(Box::from(trimmed)))
    }

    /// The reference text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VerseReference {
    fn default() -> Self {
        Self(Box::from(DEFAULT_REFERENCE))
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VerseReference {
    type Err = InvalidReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for VerseReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for VerseReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VerseReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&raw), &"a non-empty verse reference")
        })
    }
}
