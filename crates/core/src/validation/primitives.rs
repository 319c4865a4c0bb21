//! Single-value validators.
//!
//! Every check returns `None` when the value passes and `Some(message)` with
//! a user-facing message when it fails. Malformed input is an ordinary
//! failure, never a panic.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// `local@domain.tld` with no whitespace and no extra `@`.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Optional `+`, a leading 1-9, then up to 15 more ASCII digits.
pub const PHONE_PATTERN: &str = r"^\+?[1-9][0-9]{0,15}$";

/// Minimum password length accepted by [`validate_password`].
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Largest accepted monetary amount.
pub const MAX_AMOUNT: f64 = 999_999_999.99;

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

pub(crate) static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// A value that can be tested for "was anything provided".
///
/// Absent, null and whitespace-only strings are blank. JSON numbers and
/// booleans never are, so `0` and `false` satisfy a required check.
pub trait FieldValue {
    fn is_blank(&self) -> bool;
}

impl FieldValue for Value {
    fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl FieldValue for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl FieldValue for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(|v| v.is_blank())
    }
}

// ---------------------------------------------------------------------------
// Amount input
// ---------------------------------------------------------------------------

/// A monetary amount as typed by the user: usually a JSON number or a
/// numeric string such as `"100.50"`.
///
/// Any other JSON value lands in `Other` so it reaches the numeric-parse
/// failure instead of being rejected while decoding the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AmountInput {
    Number(f64),
    Text(String),
    Other(Value),
}

impl AmountInput {
    /// Interpret a loose JSON value as an amount. Anything that is neither a
    /// number nor a string yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// The numeric value, or `None` when the input does not parse to a
    /// finite number.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Email: required, then `local@domain.tld`.
pub fn validate_email(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Email is required".to_string());
    }
    if !EMAIL_RE.is_match(value) {
        return Some("Invalid email format".to_string());
    }
    None
}

/// Password: required, at least [`MIN_PASSWORD_LENGTH`] characters.
///
/// The stricter form rule lives in
/// [`presets::password`](super::presets::password); the two are separate
/// checks.
pub fn validate_password(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Password is required".to_string());
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
    None
}

/// Phone: optional. Whitespace is ignored before matching [`PHONE_PATTERN`].
pub fn validate_phone(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !PHONE_RE.is_match(&compact) {
        return Some("Invalid phone number format".to_string());
    }
    None
}

/// Amount: must parse to a number in `0..=MAX_AMOUNT`.
///
/// An absent amount fails the parse step, so callers can pass the raw
/// optional field without checking presence first.
pub fn validate_amount(value: Option<&AmountInput>) -> Option<String> {
    let Some(amount) = value.and_then(AmountInput::to_number) else {
        return Some("Amount must be a valid number".to_string());
    };
    if amount < 0.0 {
        return Some("Amount cannot be negative".to_string());
    }
    if amount > MAX_AMOUNT {
        return Some("Amount is too large".to_string());
    }
    None
}

/// Required: fails only for absent, null, or whitespace-only values.
pub fn validate_required<V: FieldValue + ?Sized>(value: &V, field_name: &str) -> Option<String> {
    if value.is_blank() {
        return Some(format!("{field_name} is required"));
    }
    None
}

/// Length in characters, `min` checked before `max`.
pub fn validate_length(value: &str, min: usize, max: usize, field_name: &str) -> Option<String> {
    length_error(value, Some(min), Some(max), field_name)
}

/// Shared by [`validate_length`] and the field evaluator, where either
/// bound may be absent.
pub(crate) fn length_error(
    value: &str,
    min: Option<usize>,
    max: Option<usize>,
    field_name: &str,
) -> Option<String> {
    let len = value.chars().count();
    if let Some(min) = min {
        if len < min {
            return Some(format!("{field_name} must be at least {min} characters"));
        }
    }
    if let Some(max) = max {
        if len > max {
            return Some(format!("{field_name} must be no more than {max} characters"));
        }
    }
    None
}

/// Date: must parse and must not be later than the current UTC time.
pub fn validate_date(value: &str) -> Option<String> {
    validate_date_at(value, Utc::now())
}

/// Date check against an explicit reference time.
pub fn validate_date_at(value: &str, now: Timestamp) -> Option<String> {
    let Some(date) = parse_date(value) else {
        return Some("Invalid date format".to_string());
    };
    if date > now {
        return Some("Date cannot be in the future".to_string());
    }
    None
}

/// Parse the date forms the front end submits.
///
/// RFC 3339 timestamps keep their offset; `YYYY-MM-DD` is midnight UTC and
/// offset-less date-times are read as UTC.
pub fn parse_date(value: &str) -> Option<Timestamp> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    // -- email --

    #[test]
    fn email_accepts_well_formed_addresses() {
        assert_eq!(validate_email("test@example.com"), None);
        assert_eq!(validate_email("first.last+tag@sub.example.co"), None);
    }

    #[test]
    fn email_empty_is_required() {
        assert_eq!(validate_email("").as_deref(), Some("Email is required"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in ["invalid-email", "test@", "@example.com", "a b@example.com", "a@b"] {
            assert_eq!(
                validate_email(bad).as_deref(),
                Some("Invalid email format"),
                "{bad} should be rejected"
            );
        }
    }

    // -- password --

    #[test]
    fn password_rules() {
        assert_eq!(validate_password("").as_deref(), Some("Password is required"));
        assert_eq!(
            validate_password("abc12").as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(validate_password("abc123"), None);
    }

    // -- phone --

    #[test]
    fn phone_empty_is_valid() {
        assert_eq!(validate_phone(""), None);
    }

    #[test]
    fn phone_accepts_digits_and_plus_prefix() {
        assert_eq!(validate_phone("1234567890"), None);
        assert_eq!(validate_phone("+1234567890"), None);
        assert_eq!(validate_phone("+1 234 567 890"), None);
    }

    #[test]
    fn phone_short_number_matches_pattern() {
        assert_eq!(validate_phone("123"), None);
    }

    #[test]
    fn phone_rejects_bad_input() {
        for bad in ["abc", "0123456789", "+", "12345678901234567", "123-456"] {
            assert_eq!(
                validate_phone(bad).as_deref(),
                Some("Invalid phone number format"),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        assert!(validate_phone("١٢٣").is_some());
    }

    // -- amount --

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        assert_eq!(validate_amount(Some(&AmountInput::Number(100.0))), None);
        assert_eq!(validate_amount(Some(&AmountInput::Text("100.50".into()))), None);
        assert_eq!(validate_amount(Some(&AmountInput::Number(0.0))), None);
        assert_eq!(validate_amount(Some(&AmountInput::Number(MAX_AMOUNT))), None);
    }

    #[test]
    fn amount_rejects_negative() {
        assert_eq!(
            validate_amount(Some(&AmountInput::Number(-100.0))).as_deref(),
            Some("Amount cannot be negative")
        );
    }

    #[test]
    fn amount_rejects_unparseable() {
        for input in [
            Some(AmountInput::Text("invalid".into())),
            Some(AmountInput::Text("NaN".into())),
            Some(AmountInput::Text(String::new())),
            None,
        ] {
            assert_eq!(
                validate_amount(input.as_ref()).as_deref(),
                Some("Amount must be a valid number")
            );
        }
    }

    #[test]
    fn amount_rejects_too_large() {
        assert_eq!(
            validate_amount(Some(&AmountInput::Number(1_000_000_000.0))).as_deref(),
            Some("Amount is too large")
        );
    }

    #[test]
    fn amount_non_numeric_json_decodes_and_fails_parse() {
        for raw in [json!(true), json!({"v": 1}), json!([1])] {
            let input: AmountInput = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(input, AmountInput::Other(raw));
            assert_eq!(
                validate_amount(Some(&input)).as_deref(),
                Some("Amount must be a valid number")
            );
        }
    }

    #[test]
    fn amount_from_json() {
        assert_eq!(AmountInput::from_json(&json!(5)), Some(AmountInput::Number(5.0)));
        assert_eq!(
            AmountInput::from_json(&json!("5")),
            Some(AmountInput::Text("5".into()))
        );
        assert_eq!(AmountInput::from_json(&json!(null)), None);
        assert_eq!(AmountInput::from_json(&json!(true)), None);
    }

    // -- required --

    #[test]
    fn required_accepts_zero_and_false() {
        assert_eq!(validate_required(&json!(0), "Field"), None);
        assert_eq!(validate_required(&json!(false), "Field"), None);
    }

    #[test]
    fn required_rejects_empty_and_whitespace() {
        assert_eq!(validate_required("", "Field").as_deref(), Some("Field is required"));
        assert_eq!(validate_required("   ", "Field").as_deref(), Some("Field is required"));
    }

    #[test]
    fn required_rejects_absent_and_null() {
        let absent: Option<&Value> = None;
        assert_eq!(validate_required(&absent, "Field").as_deref(), Some("Field is required"));
        assert_eq!(
            validate_required(&Some(&Value::Null), "Field").as_deref(),
            Some("Field is required")
        );
        assert_eq!(
            validate_required(&None::<String>, "Branch").as_deref(),
            Some("Branch is required")
        );
    }

    // -- length --

    #[test]
    fn length_bounds() {
        assert_eq!(
            validate_length("a", 2, 10, "Field").as_deref(),
            Some("Field must be at least 2 characters")
        );
        assert_eq!(validate_length("test", 2, 10, "Field"), None);
        assert_eq!(
            validate_length("abcdefghijk", 2, 10, "Field").as_deref(),
            Some("Field must be no more than 10 characters")
        );
    }

    #[test]
    fn length_too_short_wins_over_too_long() {
        // Inverted bounds: a value can violate both, only the minimum is reported.
        assert_eq!(
            validate_length("abc", 5, 2, "Field").as_deref(),
            Some("Field must be at least 5 characters")
        );
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(validate_length("ñé", 2, 2, "Field"), None);
    }

    // -- date --

    #[test]
    fn date_in_past_is_valid() {
        assert_eq!(validate_date_at("2024-01-15", at(2025, 6, 1)), None);
        assert_eq!(validate_date_at("2024-01-15T10:30:00Z", at(2025, 6, 1)), None);
        assert_eq!(validate_date_at("2024-01-15T10:30", at(2025, 6, 1)), None);
    }

    #[test]
    fn date_in_future_is_rejected() {
        assert_eq!(
            validate_date_at("2025-12-31", at(2025, 6, 1)).as_deref(),
            Some("Date cannot be in the future")
        );
    }

    #[test]
    fn date_equal_to_now_is_valid() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(validate_date_at("2025-06-01", now), None);
    }

    #[test]
    fn date_unparseable_is_rejected() {
        for bad in ["not-a-date", "2025-13-01", "31/12/2025", ""] {
            assert_eq!(
                validate_date_at(bad, at(2025, 6, 1)).as_deref(),
                Some("Invalid date format"),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn date_uses_wall_clock_by_default() {
        assert_eq!(validate_date("2000-01-01"), None);
        assert!(validate_date("9999-01-01").is_some());
    }

    #[test]
    fn parse_date_keeps_offset() {
        let parsed = parse_date("2025-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn validators_are_idempotent() {
        for input in ["", "abc", "test@example.com"] {
            assert_eq!(validate_email(input), validate_email(input));
            assert_eq!(validate_phone(input), validate_phone(input));
        }
    }
}
