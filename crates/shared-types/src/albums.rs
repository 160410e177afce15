// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Record album types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A record album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Album {
    /// Album identifier
    #[schema(example = "1")]
    pub id: String,
    /// Album title
    #[schema(example = "Blue Train")]
    pub title: String,
    /// Performing artist
    #[schema(example = "John Coltrane")]
    pub artist: String,
    /// Price in dollars
    #[schema(example = 56.99)]
    pub price: f64,
}

impl Album {
    /// Create a new album record
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }
}
