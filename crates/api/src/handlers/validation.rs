//! Handlers for the `/validation` resource.
//!
//! Every endpoint is a dry run: input is evaluated and the outcome returned,
//! nothing is stored. A draft that fails validation is a `200` with
//! `is_valid: false`; error statuses are reserved for requests that cannot
//! be evaluated (malformed JSON, bad rule specs, oversized imports).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use indexmap::IndexMap;
use repay_core::validation::entities::{self, CustomerDraft, TransactionDraft};
use repay_core::validation::evaluator;
use repay_core::validation::import::{self, ImportPreview, ImportRow, CUSTOMER_IMPORT_COLUMNS};
use repay_core::validation::rules::{compile_rules, RuleSpec, ValidationResult};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

type ValidationResponse = AppResult<Json<DataResponse<ValidationResult>>>;

// ── Entities ─────────────────────────────────────────────────────────

/// POST /api/v1/validation/customer
///
/// Validate a customer draft (name, optional email/phone, branch).
pub async fn validate_customer(
    payload: Result<Json<CustomerDraft>, JsonRejection>,
) -> ValidationResponse {
    let Json(draft) = payload?;
    let result = entities::validate_customer(&draft);

    tracing::debug!(
        is_valid = result.is_valid(),
        error_count = result.errors().len(),
        "Customer draft validated"
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/validation/transaction
///
/// Validate a transaction draft. The date check uses the server's clock.
pub async fn validate_transaction(
    payload: Result<Json<TransactionDraft>, JsonRejection>,
) -> ValidationResponse {
    let Json(draft) = payload?;
    let result = entities::validate_transaction(&draft);

    tracing::debug!(
        is_valid = result.is_valid(),
        error_count = result.errors().len(),
        "Transaction draft validated"
    );

    Ok(Json(DataResponse { data: result }))
}

// ── Generic forms ────────────────────────────────────────────────────

/// Request body for the form endpoint.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormRequest {
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
    pub rules: IndexMap<String, RuleSpec>,
}

/// POST /api/v1/validation/form
///
/// Compile the submitted rule specs and evaluate them against `data`.
/// An uncompilable rule (bad regex, inverted bounds) is a 400.
pub async fn validate_form(payload: Result<Json<FormRequest>, JsonRejection>) -> ValidationResponse {
    let Json(body) = payload?;
    let rules = compile_rules(&body.rules)?;
    let result = evaluator::validate_form(&body.data, &rules);

    tracing::debug!(
        field_count = rules.len(),
        error_count = result.errors().len(),
        "Form validated"
    );

    Ok(Json(DataResponse { data: result }))
}

// ── Imports ──────────────────────────────────────────────────────────

/// Request body for the import endpoints.
///
/// `rows` is taken as raw JSON: a missing, null or non-array value is the
/// "no data" case, not a malformed request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportRequest {
    #[serde(default)]
    pub rows: Option<Value>,
    /// Defaults to the customer import columns.
    #[serde(default)]
    pub required_columns: Option<Vec<String>>,
}

impl ImportRequest {
    /// Split into normalized rows and the required column list.
    fn into_parts(self) -> (Vec<ImportRow>, Vec<String>) {
        let columns = self.required_columns.unwrap_or_else(|| {
            CUSTOMER_IMPORT_COLUMNS
                .iter()
                .map(|column| column.to_string())
                .collect()
        });
        (import::rows_from_json(self.rows), columns)
    }
}

/// POST /api/v1/validation/import
///
/// Validate an import row set. An empty or non-array `rows` is a normal
/// failed result ("No data to validate"), not an HTTP error.
pub async fn validate_import(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> ValidationResponse {
    let Json(body) = payload?;
    let (rows, columns) = body.into_parts();
    ensure_row_limit(&state, rows.len())?;

    let result = import::validate_import_data(&rows, &columns);

    tracing::info!(
        row_count = rows.len(),
        error_count = result.errors().len(),
        "Import validated"
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/validation/import/preview
///
/// Split an import into the rows that would be accepted and those that
/// would be rejected, with per-row errors.
pub async fn preview_import(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<ImportPreview>>> {
    let Json(body) = payload?;
    let (rows, columns) = body.into_parts();
    ensure_row_limit(&state, rows.len())?;

    let preview = import::preview_import(&rows, &columns);

    tracing::info!(
        total_rows = preview.total_rows,
        accepted = preview.accepted.len(),
        rejected = preview.rejected.len(),
        clean = preview.is_clean(),
        "Import preview generated"
    );

    Ok(Json(DataResponse { data: preview }))
}

fn ensure_row_limit(state: &AppState, row_count: usize) -> AppResult<()> {
    let max = state.config.max_import_rows;
    if row_count > max {
        return Err(AppError::BadRequest(format!(
            "Import has {row_count} rows; at most {max} are accepted per request"
        )));
    }
    Ok(())
}
