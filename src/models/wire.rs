use serde::{ Serialize, Deserialize };
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Chat personality sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    General,
    Kids,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::General => "general",
            Mode::Kids => "kids",
        }
    }

    /// Apology rendered when a request fails.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Mode::General => "Sorry, I encountered an error. Please try again.",
            Mode::Kids => "Oops! Something went wrong. Please try again! 😊",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseModeError {
    message: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "general" => Ok(Mode::General),
            "kids" => Ok(Mode::Kids),
            _ =>
                Err(ParseModeError {
                    message: format!("Invalid chat mode: '{}'", s),
                }),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Body returned by `POST /chat`. Fields are kept loosely typed; a field of an
/// unexpected type only affects that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    pub response: Option<Value>,
    pub emergency_contacts: Option<Value>,
    pub is_emergency: Option<Value>,
    pub error: Option<Value>,
}

impl ChatResponse {
    /// Decodes a response body. Only non-JSON bodies and JSON `null` are errors;
    /// any other non-object body decodes to an empty response.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(<serde_json::Error as serde::de::Error>::custom("response body is null")),
            Value::Object(mut fields) =>
                Ok(Self {
                    response: fields.remove("response"),
                    emergency_contacts: fields.remove("emergency_contacts"),
                    is_emergency: fields.remove("isEmergency"),
                    error: fields.remove("error"),
                }),
            _ => Ok(Self::default()),
        }
    }
}

/// Ordered `service -> number` pairs as received from the server.
pub type EmergencyContacts = Vec<(String, String)>;

/// Result of one submission, decided once at the transport boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Ok {
        text: Option<String>,
        emergency_contacts: Option<EmergencyContacts>,
        is_emergency: bool,
    },
    Failed {
        reason: String,
    },
}

impl From<ChatResponse> for ChatOutcome {
    fn from(resp: ChatResponse) -> Self {
        let text = resp.response
            .filter(is_truthy)
            .map(|value| display_value(&value));
        let emergency_contacts = resp.emergency_contacts.filter(is_truthy).map(contact_entries);
        let is_emergency = resp.is_emergency.as_ref().map(is_truthy).unwrap_or(false);

        ChatOutcome::Ok { text, emergency_contacts, is_emergency }
    }
}

/// Key/value pairs of a contacts payload. Arrays and strings are keyed by index;
/// scalars have no entries.
fn contact_entries(contacts: Value) -> EmergencyContacts {
    match contacts {
        Value::Object(map) =>
            map
                .into_iter()
                .map(|(service, number)| (service, display_value(&number)))
                .collect(),
        Value::Array(items) =>
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), display_value(item)))
                .collect(),
        Value::String(s) =>
            s
                .chars()
                .enumerate()
                .map(|(i, c)| (i.to_string(), c.to_string()))
                .collect(),
        _ => Vec::new(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose truthiness for fields the server may send with unexpected types.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(body: Value) -> ChatResponse {
        ChatResponse::from_body(body.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn request_omits_unset_language() {
        let req = ChatRequest {
            message: "hi".into(),
            mode: Mode::Kids,
            language: None,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"message": "hi", "mode": "kids"}));
    }

    #[test]
    fn outcome_keeps_contact_order() {
        let resp = decode(
            json!({
                "response": "Stay calm.",
                "emergency_contacts": {"Police": "911", "Fire": "911", "Poison Control": "1-800-222-1222"}
            })
        );
        match ChatOutcome::from(resp) {
            ChatOutcome::Ok { text, emergency_contacts, is_emergency } => {
                assert_eq!(text.as_deref(), Some("Stay calm."));
                let services: Vec<_> = emergency_contacts
                    .unwrap()
                    .into_iter()
                    .map(|(s, _)| s)
                    .collect();
                assert_eq!(services, vec!["Police", "Fire", "Poison Control"]);
                assert!(!is_emergency);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn empty_response_text_is_dropped() {
        let resp = decode(json!({"response": ""}));
        assert_eq!(ChatOutcome::from(resp), ChatOutcome::Ok {
            text: None,
            emergency_contacts: None,
            is_emergency: false,
        });
    }

    #[test]
    fn emergency_flag_accepts_loose_values() {
        for (raw, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!("yes"), true),
            (json!(null), false),
        ] {
            let resp = decode(json!({"isEmergency": raw}));
            match ChatOutcome::from(resp) {
                ChatOutcome::Ok { is_emergency, .. } => assert_eq!(is_emergency, expected),
                other => panic!("unexpected outcome: {:?}", other),
            }
        }
    }

    #[test]
    fn mistyped_fields_only_drop_themselves() {
        let resp = decode(json!({"response": 5, "emergency_contacts": [], "isEmergency": "no"}));
        assert_eq!(ChatOutcome::from(resp), ChatOutcome::Ok {
            text: Some("5".into()),
            emergency_contacts: Some(Vec::new()),
            is_emergency: true,
        });
    }

    #[test]
    fn array_contacts_are_keyed_by_index() {
        let resp = decode(json!({"emergency_contacts": ["911", "112"], "response": false}));
        assert_eq!(ChatOutcome::from(resp), ChatOutcome::Ok {
            text: None,
            emergency_contacts: Some(vec![("0".into(), "911".into()), ("1".into(), "112".into())]),
            is_emergency: false,
        });
    }

    #[test]
    fn non_object_body_is_empty_response() {
        assert_eq!(ChatResponse::from_body(br#""hello""#).unwrap(), ChatResponse::default());
        assert_eq!(ChatResponse::from_body(b"[1, 2]").unwrap(), ChatResponse::default());
    }

    #[test]
    fn null_and_non_json_bodies_fail() {
        assert!(ChatResponse::from_body(b"null").is_err());
        assert!(ChatResponse::from_body(b"<html>oops</html>").is_err());
        assert!(ChatResponse::from_body(b"").is_err());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Kids".parse::<Mode>().unwrap(), Mode::Kids);
        assert_eq!("general".parse::<Mode>().unwrap(), Mode::General);
        assert!("legal".parse::<Mode>().is_err());
    }
}
