//! Route definitions for the `/validation` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/validation`.
///
/// ```text
/// POST   /customer         -> validate_customer
/// POST   /transaction      -> validate_transaction
/// POST   /form             -> validate_form
/// POST   /import           -> validate_import
/// POST   /import/preview   -> preview_import
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customer", post(validation::validate_customer))
        .route("/transaction", post(validation::validate_transaction))
        .route("/form", post(validation::validate_form))
        .route("/import", post(validation::validate_import))
        .route("/import/preview", post(validation::preview_import))
}
