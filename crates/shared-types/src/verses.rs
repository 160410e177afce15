// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Scripture verse types
//!
//! [`Verse`] is the locally seeded record served by the verse endpoints.
//! [`RemoteVerse`] mirrors the payload returned by the upstream scripture API
//! and is never stored.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A locally stored scripture verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Verse {
    /// Random identifier assigned when the verse is created
    #[schema(example = "3f2b8c1e-6a4d-4f0e-9b5a-2c7d1e8f9a01")]
    pub id: String,
    /// Book name
    #[schema(example = "John")]
    pub book: String,
    /// Chapter number as text
    #[schema(example = "3")]
    pub chapter: String,
    /// Verse number as text
    #[schema(example = "16")]
    pub verse: String,
    /// Verse text
    pub text: String,
}

impl Verse {
    /// Create a verse with a freshly generated random identifier
    pub fn new(
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), book, chapter, verse, text)
    }

    /// Create a verse with a caller-supplied identifier
    pub fn with_id(
        id: impl Into<String>,
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            book: book.into(),
            chapter: chapter.into(),
            verse: verse.into(),
            text: text.into(),
        }
    }
}

/// Payload returned by the upstream scripture API for a reference lookup
///
/// Absent fields decode to their empty defaults; only malformed JSON or
/// mistyped fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteVerse {
    /// Normalized reference, e.g. `John 3:16`
    pub reference: String,
    /// Individual verses covered by the reference
    pub verses: Vec<RemoteVerseEntry>,
    /// Full text of the passage
    pub text: String,
    /// Translation identifier, e.g. `web`
    pub translation_id: String,
    /// Translation display name
    pub translation_name: String,
    /// Licensing note for the translation
    pub translation_note: String,
}

/// A single verse inside a [`RemoteVerse`] payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteVerseEntry {
    /// Upstream book identifier, e.g. `JHN`
    pub book_id: String,
    /// Book display name
    pub book_name: String,
    /// Chapter number
    pub chapter: u32,
    /// Verse number
    pub verse: u32,
    /// Verse text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_verses_get_distinct_ids() {
        let first = Verse::new("John", "3", "16", "For God so loved the world");
        let second = Verse::new("John", "3", "16", "For God so loved the world");

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
    }

    #[test]
    fn remote_verse_decodes_upstream_payload() {
        let body = serde_json::json!({
            "reference": "John 3:16",
            "verses": [{
                "book_id": "JHN",
                "book_name": "John",
                "chapter": 3,
                "verse": 16,
                "text": "For God so loved the world...\n"
            }],
            "text": "For God so loved the world...\n",
            "translation_id": "web",
            "translation_name": "World English Bible",
            "translation_note": "Public Domain"
        });

        let payload: RemoteVerse = serde_json::from_value(body).unwrap();
        assert_eq!(payload.reference, "John 3:16");
        assert_eq!(payload.verses.len(), 1);
        assert_eq!(payload.verses[0].chapter, 3);
        assert_eq!(payload.verses[0].verse, 16);
        assert_eq!(payload.translation_id, "web");
    }

    #[test]
    fn remote_verse_tolerates_missing_fields() {
        let payload: RemoteVerse = serde_json::from_str(r#"{"reference":"Acts 24:16"}"#).unwrap();
        assert_eq!(payload.reference, "Acts 24:16");
        assert!(payload.verses.is_empty());
        assert!(payload.translation_note.is_empty());
    }

    #[test]
    fn remote_verse_rejects_mistyped_fields() {
        let result = serde_json::from_str::<RemoteVerse>(r#"{"verses":[{"chapter":"three"}]}"#);
        assert!(result.is_err());
    }
}
