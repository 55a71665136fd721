//! foxden-api — REST API for the Foxden ledger.
//!
//! Thin glue over `foxden-ledger`: request validation, base64 image
//! decoding, and JSON responses. All domain behavior lives below.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/fox?season=` | List foxes of a season |
//! | POST | `/api/fox` | Create a fox (profile record) |
//! | GET | `/api/fox/{fox_id}?season=` | Current fox view |
//! | POST | `/api/fox/{fox_id}/feed` | Append a feed event |
//! | GET | `/api/fox/{fox_id}/image?season=` | Profile image bytes |
//! | GET | `/api/fox/season/{season}` | Raw records of a season |
//! | GET | `/api/providers` | Probe configured providers |

pub mod data_url;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use foxden_ledger::Ledger;
use foxden_store::RedbStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub ledger: Arc<Ledger<RedbStore>>,
}

/// Build the complete API router.
pub fn build_router(ledger: Arc<Ledger<RedbStore>>) -> Router {
    let state = ApiState { ledger };

    let fox_routes = Router::new()
        .route("/", get(handlers::list_foxes).post(handlers::create_fox))
        .route("/season/{season}", get(handlers::inspect_season))
        .route("/{fox_id}", get(handlers::get_fox))
        .route("/{fox_id}/feed", post(handlers::feed_fox))
        .route("/{fox_id}/image", get(handlers::fox_image));

    Router::new()
        .nest("/api/fox", fox_routes)
        .route("/api/providers", get(handlers::check_providers))
        .with_state(state)
}
