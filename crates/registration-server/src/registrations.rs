//! Registration domain: events, fees and record construction.

use crate::error::ApiError;
use registration_store::server_timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Collection holding one document per registration.
pub const REGISTRATIONS_COLLECTION: &str = "registrations";

/// Initial lifecycle status of a new registration.
pub const STATUS_REGISTERED: &str = "registered";

/// Initial payment status of a new registration.
pub const PAYMENT_PENDING: &str = "pending";

/// Race events open for registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "half")]
    HalfMarathon,
}

impl EventKind {
    /// Parse an event key as submitted by the form.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "5k" => Some(EventKind::FiveK),
            "10k" => Some(EventKind::TenK),
            "half" => Some(EventKind::HalfMarathon),
            _ => None,
        }
    }

    /// The wire key for this event.
    pub fn key(&self) -> &'static str {
        match self {
            EventKind::FiveK => "5k",
            EventKind::TenK => "10k",
            EventKind::HalfMarathon => "half",
        }
    }

    /// Registration fee in whole dollars, as published on the site.
    pub fn fee(&self) -> u32 {
        match self {
            EventKind::FiveK => 35,
            EventKind::TenK => 45,
            EventKind::HalfMarathon => 65,
        }
    }
}

/// Shirt sizes offered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShirtSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl ShirtSize {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "xs" => Some(ShirtSize::Xs),
            "s" => Some(ShirtSize::S),
            "m" => Some(ShirtSize::M),
            "l" => Some(ShirtSize::L),
            "xl" => Some(ShirtSize::Xl),
            "xxl" => Some(ShirtSize::Xxl),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ShirtSize::Xs => "xs",
            ShirtSize::S => "s",
            ShirtSize::M => "m",
            ShirtSize::L => "l",
            ShirtSize::Xl => "xl",
            ShirtSize::Xxl => "xxl",
        }
    }
}

/// A registration submission as it arrives from the form.
///
/// Event and shirt size come in as raw keys so unknown values can be
/// rejected with a categorized error rather than a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub shirt_size: String,
    #[serde(default)]
    pub agree_to_terms: bool,
}

/// Validate a submission and build the document to store.
///
/// The fee is always derived from the event key here; whatever the client
/// sent for it is ignored. `registeredAt` is left for the store to stamp.
pub fn build_record(form: &RegistrationForm) -> Result<(EventKind, Map<String, Value>), ApiError> {
    if !form.agree_to_terms {
        return Err(ApiError::Validation(
            "You must agree to the terms and conditions".into(),
        ));
    }

    if form.first_name.trim().is_empty() || form.last_name.trim().is_empty() {
        return Err(ApiError::Validation("First and last name are required".into()));
    }

    if form.email.trim().is_empty() || !form.email.contains('@') {
        return Err(ApiError::Validation("A valid email address is required".into()));
    }

    let event = EventKind::from_key(&form.event)
        .ok_or_else(|| ApiError::InvalidEvent(form.event.clone()))?;

    let shirt_size = ShirtSize::from_key(&form.shirt_size)
        .ok_or_else(|| ApiError::Validation("Select a shirt size".into()))?;

    let mut fields = Map::new();
    fields.insert("firstName".into(), json!(form.first_name));
    fields.insert("lastName".into(), json!(form.last_name));
    fields.insert("email".into(), json!(form.email));
    fields.insert("event".into(), json!(event.key()));
    fields.insert("shirtSize".into(), json!(shirt_size.key()));
    fields.insert("eventFee".into(), json!(event.fee()));
    fields.insert("status".into(), json!(STATUS_REGISTERED));
    fields.insert("paymentStatus".into(), json!(PAYMENT_PENDING));
    fields.insert("agreeToTerms".into(), json!(true));
    fields.insert("registeredAt".into(), server_timestamp());

    Ok((event, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            event: "5k".into(),
            shirt_size: "m".into(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn test_fee_table() {
        assert_eq!(EventKind::FiveK.fee(), 35);
        assert_eq!(EventKind::TenK.fee(), 45);
        assert_eq!(EventKind::HalfMarathon.fee(), 65);
    }

    #[test]
    fn test_event_keys_round_trip() {
        for event in [EventKind::FiveK, EventKind::TenK, EventKind::HalfMarathon] {
            assert_eq!(EventKind::from_key(event.key()), Some(event));
        }
        assert_eq!(EventKind::from_key(""), None);
        assert_eq!(EventKind::from_key("marathon"), None);
    }

    #[test]
    fn test_event_serializes_as_key() {
        let json = serde_json::to_string(&EventKind::FiveK).unwrap();
        assert_eq!(json, "\"5k\"");
    }

    #[test]
    fn test_shirt_sizes() {
        for key in ["xs", "s", "m", "l", "xl", "xxl"] {
            let size = ShirtSize::from_key(key).unwrap();
            assert_eq!(size.key(), key);
        }
        assert_eq!(ShirtSize::from_key("xxxl"), None);
    }

    #[test]
    fn test_build_record_valid() {
        let (event, fields) = build_record(&valid_form()).unwrap();

        assert_eq!(event, EventKind::FiveK);
        assert_eq!(fields["firstName"], json!("Jane"));
        assert_eq!(fields["eventFee"], json!(35));
        assert_eq!(fields["status"], json!("registered"));
        assert_eq!(fields["paymentStatus"], json!("pending"));
        assert_eq!(fields["agreeToTerms"], json!(true));
        // Left for the store to stamp
        assert_eq!(fields["registeredAt"], registration_store::server_timestamp());
    }

    #[test]
    fn test_build_record_requires_consent() {
        let form = RegistrationForm {
            agree_to_terms: false,
            ..valid_form()
        };
        assert!(matches!(
            build_record(&form),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_build_record_rejects_unknown_event() {
        let form = RegistrationForm {
            event: "ultra".into(),
            ..valid_form()
        };
        assert!(matches!(
            build_record(&form),
            Err(ApiError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_build_record_rejects_blank_event() {
        let form = RegistrationForm {
            event: String::new(),
            ..valid_form()
        };
        assert!(matches!(
            build_record(&form),
            Err(ApiError::InvalidEvent(_))
        ));
    }

    #[test]
    fn test_build_record_rejects_missing_name() {
        let form = RegistrationForm {
            first_name: "  ".into(),
            ..valid_form()
        };
        assert!(matches!(build_record(&form), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_build_record_rejects_bad_email() {
        let form = RegistrationForm {
            email: "not-an-email".into(),
            ..valid_form()
        };
        assert!(matches!(build_record(&form), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_fee_ignores_client_input() {
        // The form has no fee field at all; the record always derives it
        let form = RegistrationForm {
            event: "half".into(),
            ..valid_form()
        };
        let (_, fields) = build_record(&form).unwrap();
        assert_eq!(fields["eventFee"], json!(65));
    }

    #[test]
    fn test_form_deserializes_camel_case() {
        let form: RegistrationForm = serde_json::from_str(
            r#"{
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "event": "10k",
                "shirtSize": "l",
                "agreeToTerms": true
            }"#,
        )
        .unwrap();

        assert_eq!(form.first_name, "Jane");
        assert_eq!(form.shirt_size, "l");
        assert!(form.agree_to_terms);
    }
}
