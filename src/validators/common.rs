//! Shared validation plumbing.

use validator::ValidationErrors;

use crate::errors::ApiError;

/// Flatten `validator` field errors into one message per failed rule.
///
/// Fields are reported in name order. A rule without a message is reported
/// as `<field> is invalid`.
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut fields: Vec<_> = e.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());

    let errors = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    ApiError::validation(errors)
}
