// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory record stores
//!
//! Both stores are built once at startup and never mutated afterwards, so they
//! are shared between request tasks behind an `Arc` without any locking.

use shared_types::{Album, Verse};

/// Read-only ordered collection of albums
#[derive(Debug, Clone, Default)]
pub struct AlbumStore {
    albums: Box<[Album]>,
}

impl AlbumStore {
    /// Create a store holding `albums` in the given order
    pub fn new(albums: impl Into<Box<[Album]>>) -> Self {
        Self {
            albums: albums.into(),
        }
    }

    /// The catalogue served by `/albums`
    pub fn seeded() -> Self {
        Self::new(vec![
            Album::new("1", "Blue Train", "John Coltrane", 56.99),
            Album::new("2", "Jeru", "Gerry Mulligan", 17.99),
            Album::new(
                "3",
                "Sarah Vaughan and Clifford Brown",
                "Sarah Vaughan",
                39.99,
            ),
        ])
    }

    /// All albums in insertion order
    pub fn list(&self) -> &[Album] {
        &self.albums
    }

    /// Number of albums
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    /// Whether the store holds no albums
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

/// Read-only ordered collection of verses
#[derive(Debug, Clone, Default)]
pub struct VerseStore {
    verses: Box<[Verse]>,
}

impl VerseStore {
    /// Create a store holding `verses` in the given order
    pub fn new(verses: impl Into<Box<[Verse]>>) -> Self {
        Self {
            verses: verses.into(),
        }
    }

    /// The verses served by `/api/verse`, each with a fresh random id
    pub fn seeded() -> Self {
        Self::new(vec![
            Verse::new(
                "John",
                "3",
                "16",
                "For God so loved the world, that He gave His only Begotten Son...",
            ),
            Verse::new(
                "Acts",
                "24",
                "16",
                "For this being so, I myself, always strive to have a clear consious before God and men!",
            ),
        ])
    }

    /// All verses in insertion order
    pub fn list(&self) -> &[Verse] {
        &self.verses
    }

    /// First verse whose id equals `id` exactly
    ///
    /// Linear scan; the store holds a handful of records.
    pub fn find_by_id(&self, id: &str) -> Option<&Verse> {
        self.verses.iter().find(|verse| verse.id == id)
    }

    /// Number of verses
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether the store holds no verses
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}
