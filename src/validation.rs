use serde::Serialize;

use crate::model::{ContactInput, NewContact};

/// One rule violation, shaped the way API clients already consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub location: &'static str,
}

impl FieldError {
    pub fn body_field(param: &str, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.to_string()),
            location: "body",
        }
    }

    pub fn body(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
            location: "body",
        }
    }
}

/// Checks a create request and splits it into the fields to persist.
pub fn validate_new_contact(input: ContactInput) -> Result<NewContact, Vec<FieldError>> {
    let Some(name) = input.name.filter(|name| !name.is_empty()) else {
        return Err(vec![FieldError::body_field("name", "Name is required")]);
    };

    Ok(NewContact {
        name,
        email: input.email,
        phone: input.phone,
        kind: input.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_is_rejected() {
        let errors = validate_new_contact(ContactInput::default()).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].param.as_deref(), Some("name"));
        assert_eq!(errors[0].msg, "Name is required");
    }

    #[test]
    fn empty_name_is_rejected() {
        let input = ContactInput {
            name: Some(String::new()),
            ..ContactInput::default()
        };

        assert!(validate_new_contact(input).is_err());
    }

    #[test]
    fn optional_fields_pass_through() {
        let input = ContactInput {
            name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: None,
            kind: Some("professional".to_string()),
        };

        let contact = validate_new_contact(input).unwrap();
        assert_eq!(contact.name, "Jane");
        assert_eq!(contact.email.as_deref(), Some("jane@example.com"));
        assert_eq!(contact.phone, None);
        assert_eq!(contact.kind.as_deref(), Some("professional"));
    }

    #[test]
    fn field_error_serialization() {
        let json = serde_json::to_value(FieldError::body("bad json")).unwrap();
        assert_eq!(json, serde_json::json!({"msg": "bad json", "location": "body"}));
    }
}
