// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream scripture API integrations
//!
//! This crate provides implementations of the `ApiClient` trait for external
//! services that resolve scripture references.
//!
//! # Architecture
//!
//! - **Client Implementations**: [`bible`] - the bible-api.com integration
//!
//! # Features
//!
//! - **Bounded Calls**: every outbound request carries an explicit timeout
//! - **Typed Failures**: transport, status and decode failures are distinct error variants
//! - **Configuration Validation**: the base URL is parsed and checked at construction
//! - **Testing Support**: integration tests use wiremock for HTTP simulation

pub mod bible;

pub use bible::*;
