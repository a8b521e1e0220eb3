//! Rendering of registration rows.
//!
//! Fields render in a fixed, explicit order with a formatter tag per
//! field, rather than inferring formats from key names. Fields missing
//! from a record are skipped; formatting never panics on malformed data.

use chrono::{DateTime, Local, Utc};
use serde_json::{Map, Value};

/// How a field value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Plain string form
    Text,
    /// Booleans as "Yes"/"No"
    YesNo,
    /// Whole-dollar amount
    Money,
    /// Store timestamp or date string
    Timestamp,
}

/// One entry of the display schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub format: FieldFormat,
}

/// The admin table's field order. This list and the event fee table are
/// the stable contracts of the stored document shape.
pub const DISPLAY_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "firstName", label: "First Name", format: FieldFormat::Text },
    FieldSpec { key: "lastName", label: "Last Name", format: FieldFormat::Text },
    FieldSpec { key: "email", label: "Email", format: FieldFormat::Text },
    FieldSpec { key: "event", label: "Event", format: FieldFormat::Text },
    FieldSpec { key: "shirtSize", label: "Shirt Size", format: FieldFormat::Text },
    FieldSpec { key: "eventFee", label: "Fee", format: FieldFormat::Money },
    FieldSpec { key: "status", label: "Status", format: FieldFormat::Text },
    FieldSpec { key: "paymentStatus", label: "Payment", format: FieldFormat::Text },
    FieldSpec { key: "agreeToTerms", label: "Agreed to Terms", format: FieldFormat::YesNo },
    FieldSpec { key: "registeredAt", label: "Registered At", format: FieldFormat::Timestamp },
];

/// Render a record as ordered (label, value) pairs, skipping fields the
/// record doesn't carry.
pub fn render_record(fields: &Map<String, Value>) -> Vec<(&'static str, String)> {
    DISPLAY_FIELDS
        .iter()
        .filter_map(|spec| {
            fields
                .get(spec.key)
                .map(|value| (spec.label, render_value(value, spec.format)))
        })
        .collect()
}

/// Render a single value under a format tag.
pub fn render_value(value: &Value, format: FieldFormat) -> String {
    if value.is_null() {
        return "-".to_string();
    }

    match format {
        FieldFormat::Text => plain(value),
        FieldFormat::YesNo => match value.as_bool() {
            Some(true) => "Yes".to_string(),
            Some(false) => "No".to_string(),
            None => plain(value),
        },
        FieldFormat::Money => match value.as_u64() {
            Some(amount) => format!("${}", amount),
            None => plain(value),
        },
        FieldFormat::Timestamp => format_timestamp(value),
    }
}

/// Format a timestamp value. Total: accepts the store-native
/// `{seconds, nanoseconds}` shape or a parseable date string, and falls
/// back to plain string conversion for anything else.
pub fn format_timestamp(value: &Value) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%b %-d, %Y, %-I:%M %p")
            .to_string(),
        None => plain(value),
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Object(map) => {
            let seconds = map.get("seconds")?.as_i64()?;
            let nanoseconds = map
                .get("nanoseconds")
                .and_then(Value::as_u64)
                .unwrap_or(0) as u32;
            DateTime::from_timestamp(seconds, nanoseconds)
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_rfc2822(s))
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
