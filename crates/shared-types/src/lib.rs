// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the verse API service
//!
//! This crate provides the record types that are shared across multiple crates
//! in the workspace, avoiding circular dependencies between the server and the
//! upstream scripture clients.

pub mod albums;
pub mod reference;
pub mod verses;

pub use albums::Album;
pub use reference::{InvalidReference, VerseReference};
pub use verses::{RemoteVerse, RemoteVerseEntry, Verse};
