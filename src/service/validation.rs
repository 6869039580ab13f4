//! Request body validation against the resource's attribute set.

use crate::config::{ResourceDef, NAME_COLUMN};
use crate::error::AppError;
use serde_json::Value;
use std::collections::HashMap;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. `name` must be a string; other attributes string or null.
    pub fn validate(resource: &ResourceDef, body: &HashMap<String, Value>) -> Result<(), AppError> {
        match body.get(NAME_COLUMN) {
            None | Some(Value::Null) => {
                return Err(AppError::Validation(format!("{} is required", NAME_COLUMN)))
            }
            Some(_) => {}
        }
        Self::validate_partial(resource, body)
    }

    /// Validate only the attributes present in body (for PUT). `name` may be omitted but not nulled.
    pub fn validate_partial(
        resource: &ResourceDef,
        body: &HashMap<String, Value>,
    ) -> Result<(), AppError> {
        for field in resource.fields {
            let Some(v) = body.get(*field) else { continue };
            match v {
                Value::String(_) => {}
                Value::Null if *field != NAME_COLUMN => {}
                Value::Null => {
                    return Err(AppError::Validation(format!("{} must not be null", field)))
                }
                _ => {
                    return Err(AppError::Validation(format!(
                        "{} must be a string or null",
                        field
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PEOPLE, PLANETS};
    use serde_json::json;

    fn body(v: Value) -> HashMap<String, Value> {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn create_requires_name() {
        assert!(RequestValidator::validate(&PEOPLE, &body(json!({"height": "172"}))).is_err());
        assert!(RequestValidator::validate(&PEOPLE, &body(json!({"name": null}))).is_err());
        assert!(RequestValidator::validate(&PEOPLE, &body(json!({"name": "Luke Skywalker"}))).is_ok());
    }

    #[test]
    fn attributes_must_be_strings_or_null() {
        let err = RequestValidator::validate(&PLANETS, &body(json!({"name": "Hoth", "diameter": 7200})))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.contains("diameter")));
        assert!(RequestValidator::validate(&PLANETS, &body(json!({"name": "Hoth", "diameter": null}))).is_ok());
    }

    #[test]
    fn unknown_and_server_fields_are_ignored() {
        let b = body(json!({"name": "Yoda", "id": 5, "created_at": 1, "lightsaber": ["green"]}));
        assert!(RequestValidator::validate(&PEOPLE, &b).is_ok());
    }

    #[test]
    fn partial_update_rules() {
        assert!(RequestValidator::validate_partial(&PEOPLE, &body(json!({"height": "185"}))).is_ok());
        assert!(RequestValidator::validate_partial(&PEOPLE, &body(json!({"mass": null}))).is_ok());
        assert!(RequestValidator::validate_partial(&PEOPLE, &body(json!({"name": null}))).is_err());
        assert!(RequestValidator::validate_partial(&PEOPLE, &body(json!({"gender": true}))).is_err());
    }
}
