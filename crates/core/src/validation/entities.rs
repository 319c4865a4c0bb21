//! Customer and transaction draft validation.
//!
//! These checks encode rules a generic [`FieldRule`](super::rules::FieldRule)
//! cannot: fields that are validated only when present, and a fixed message
//! order the forms rely on.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::primitives::{
    validate_amount, validate_date_at, validate_email, validate_phone, validate_required,
    AmountInput,
};
use super::rules::ValidationResult;
use crate::types::Timestamp;

/// A customer as entered in the customer form, before it is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct CustomerDraft {
    #[ts(optional)]
    pub full_name: Option<String>,
    #[ts(optional)]
    pub email: Option<String>,
    #[ts(optional)]
    pub phone: Option<String>,
    #[ts(optional)]
    pub branch_id: Option<String>,
}

/// A repayment or debt transaction before it is saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export)]
pub struct TransactionDraft {
    #[ts(optional)]
    pub customer_id: Option<String>,
    #[ts(optional)]
    pub bank_account_id: Option<String>,
    #[ts(optional)]
    pub amount: Option<AmountInput>,
    #[ts(optional)]
    pub transaction_type: Option<String>,
    #[ts(optional)]
    pub transaction_date: Option<String>,
}

/// Validate a customer draft.
///
/// Errors appear in the order name, email, phone, branch. Email and phone
/// are only checked when non-empty.
pub fn validate_customer(draft: &CustomerDraft) -> ValidationResult {
    [
        validate_required(&draft.full_name, "Full name"),
        non_empty(&draft.email).and_then(validate_email),
        non_empty(&draft.phone).and_then(validate_phone),
        validate_required(&draft.branch_id, "Branch"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Validate a transaction draft against the current time.
pub fn validate_transaction(draft: &TransactionDraft) -> ValidationResult {
    validate_transaction_at(draft, Utc::now())
}

/// Validate a transaction draft with an explicit reference time for the
/// date-not-in-future check.
///
/// Errors appear in the order customer, bank account, amount, type, date.
/// The amount is always checked; the date only when non-empty.
pub fn validate_transaction_at(draft: &TransactionDraft, now: Timestamp) -> ValidationResult {
    [
        validate_required(&draft.customer_id, "Customer"),
        validate_required(&draft.bank_account_id, "Bank account"),
        validate_amount(draft.amount.as_ref()),
        validate_required(&draft.transaction_type, "Transaction type"),
        non_empty(&draft.transaction_date).and_then(|date| validate_date_at(date, now)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
