pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /validation/customer                 validate a customer draft (POST)
/// /validation/transaction              validate a transaction draft (POST)
/// /validation/form                     evaluate rule specs against a record (POST)
/// /validation/import                   validate an import row set (POST)
/// /validation/import/preview           accepted/rejected row split (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/validation", validation::router())
}
