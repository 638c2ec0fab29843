//! Validation Utilities

use axum::{extract::rejection::JsonRejection, Json};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
///
/// Nested structs and lists are flattened into dotted paths such as
/// `user.email` or `locations[1].zipcode`.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors = Vec::new();
    collect_field_errors("", &errors, &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    AppError::InvalidFields(field_errors)
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e.message.clone().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

/// Unwrap a JSON body and run its `validator` rules.
pub fn validated<T: DeserializeOwned + Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    value.validate().map_err(validation_error)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Account {
        #[validate(email(message = "invalid email"))]
        email: String,
    }

    #[derive(Debug, Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,

        #[validate(nested)]
        user: Account,

        #[validate(nested)]
        others: Vec<Account>,
    }

    fn fields(error: AppError) -> Vec<(String, String)> {
        match error {
            AppError::InvalidFields(errors) => errors.into_iter().map(|e| (e.field, e.message)).collect(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_error_message() {
        let errors = Account { email: "nope".into() }.validate().unwrap_err();

        assert_eq!(
            fields(validation_error(errors)),
            vec![("email".to_string(), "invalid email".to_string())]
        );
    }

    #[test]
    fn test_nested_errors_are_flattened() {
        let input = Signup {
            name: String::new(),
            user: Account { email: "nope".into() },
            others: vec![Account { email: "a@x.com".into() }, Account { email: "bad".into() }],
        };

        let errors = fields(validation_error(input.validate().unwrap_err()));

        assert_eq!(
            errors,
            vec![
                ("name".to_string(), "name is required".to_string()),
                ("others[1].email".to_string(), "invalid email".to_string()),
                ("user.email".to_string(), "invalid email".to_string()),
            ]
        );
    }
}
