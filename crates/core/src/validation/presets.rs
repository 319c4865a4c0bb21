//! Named field rules shared by the customer, login and payment forms.
//!
//! [`password`] is stricter than
//! [`validate_password`](super::primitives::validate_password): forms opt
//! into one or the other, so both are kept.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::primitives::{validate_amount, AmountInput, EMAIL_RE, PHONE_RE};
use super::rules::FieldRule;

/// Minimum length for the strict password rule.
pub const STRONG_PASSWORD_MIN_LENGTH: usize = 8;

/// Length bounds for person and company names.
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 100;

/// Rule names accepted in a form's JSON rule specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Preset {
    Email,
    Phone,
    Password,
    Name,
    Amount,
}

impl Preset {
    /// The field rule this preset stands for.
    pub fn rule(self) -> FieldRule {
        match self {
            Self::Email => email(),
            Self::Phone => phone(),
            Self::Password => password(),
            Self::Name => name(),
            Self::Amount => amount(),
        }
    }
}

pub fn email() -> FieldRule {
    FieldRule::new().required().pattern(EMAIL_RE.clone())
}

/// Optional phone. Unlike `validate_phone`, whitespace is not stripped.
pub fn phone() -> FieldRule {
    FieldRule::new().pattern(PHONE_RE.clone())
}

/// At least 8 characters with a lowercase letter, an uppercase letter and
/// a digit.
pub fn password() -> FieldRule {
    FieldRule::new()
        .required()
        .min_length(STRONG_PASSWORD_MIN_LENGTH)
        .custom(|value| {
            let s = value.and_then(|v| v.as_str())?;
            let has_lower = s.chars().any(char::is_lowercase);
            let has_upper = s.chars().any(char::is_uppercase);
            let has_digit = s.chars().any(|c| c.is_ascii_digit());
            if has_lower && has_upper && has_digit {
                None
            } else {
                Some(
                    "Password must contain an uppercase letter, a lowercase letter and a number"
                        .to_string(),
                )
            }
        })
}

pub fn name() -> FieldRule {
    FieldRule::new()
        .required()
        .length(NAME_MIN_LENGTH, NAME_MAX_LENGTH)
}

pub fn amount() -> FieldRule {
    FieldRule::new().required().custom(|value| {
        let input = value.and_then(AmountInput::from_json);
        validate_amount(input.as_ref())
    })
}
