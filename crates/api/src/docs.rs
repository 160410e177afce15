// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use shared_types::{Album, Verse};
use utoipa::OpenApi;

use crate::{
    config::Environment,
    routes::handlers::{self, ErrorBody, NotFoundBody},
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` document for the verse API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Verse API",
        description = "Record albums, scripture verses and a bible-api.com pass-through"
    ),
    paths(
        handlers::health_handler,
        handlers::list_albums_handler,
        handlers::list_verses_handler,
        handlers::get_verse_handler,
        handlers::remote_verse_handler,
    ),
    components(schemas(
        Album,
        Verse,
        NotFoundBody,
        ErrorBody,
        HealthCheck,
        HealthStatus,
        Environment,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "albums", description = "Record album catalogue"),
        (name = "verses", description = "Scripture verses"),
    )
)]
pub struct ApiDoc;
