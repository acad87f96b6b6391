//! Request DTO validation
//!
//! Bridges `validator` derive output into [`AppError::ValidationList`] so
//! malformed input is reported as a structured list of field violations.

use validator::Validate;

use crate::utils::error::{AppError, FieldViolation};

/// Validate a request payload, collecting every field violation.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let violations = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldViolation {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        AppError::ValidationList(violations)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
        #[validate(length(min = 6))]
        password: String,
    }

    #[test]
    fn collects_all_violations() {
        let bad = Signup {
            email: "not-an-email".into(),
            password: "123".into(),
        };

        let err = validate_payload(&bad).unwrap_err();
        match err {
            AppError::ValidationList(violations) => {
                assert_eq!(violations.len(), 2);
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert!(fields.contains(&"email"));
                assert!(fields.contains(&"password"));
            }
            other => panic!("expected ValidationList, got {:?}", other),
        }
    }

    #[test]
    fn passes_valid_payload() {
        let ok = Signup {
            email: "a@b.com".into(),
            password: "secret1".into(),
        };
        assert!(validate_payload(&ok).is_ok());
    }
}
