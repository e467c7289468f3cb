use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::constants::{
    CODE_EMAIL_EXISTS, CODE_INTERNAL_ERROR, CODE_INVALID_TOKEN, CODE_USERNAME_EXISTS,
    CODE_VALIDATION_FAILED, ERR_EMAIL_EXISTS, ERR_USERNAME_EXISTS,
};
use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    Forbidden { code: String, message: String },
    NotFound { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
}

impl ApiError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        ApiError::Unauthorized {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn forbidden(code: &str, message: &str) -> Self {
        ApiError::Forbidden {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn not_found(code: &str, message: &str) -> Self {
        ApiError::NotFound {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: message.into(),
        }
    }

    pub fn validation(errors: Vec<String>) -> Self {
        ApiError::ValidationError {
            code: CODE_VALIDATION_FAILED.to_string(),
            errors,
        }
    }

    /// Machine-readable code carried by every variant.
    pub fn code(&self) -> &str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::Unauthorized { code, .. }
            | ApiError::Forbidden { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::InternalServerError { code, .. }
            | ApiError::ValidationError { code, .. } => code,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::ValidationError { code, errors } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: "Validation failed".to_string(),
                errors: Some(errors.clone()),
            },
            ApiError::BadRequest { code, message }
            | ApiError::Unauthorized { code, message }
            | ApiError::Forbidden { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::InternalServerError { code, message } => ErrorResponse {
                success: false,
                code: code.clone(),
                message: message.clone(),
                errors: None,
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::Unauthorized { code, message } => {
                write!(f, "Unauthorized [{}]: {}", code, message)
            }
            ApiError::Forbidden { code, message } => {
                write!(f, "Forbidden [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::ValidationError { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let ApiError::Unauthorized { .. } = self {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(self.body())
    }
}

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Map a duplicate-key message to the conflict it reports, by index name.
/// Indexes other than email and username yield `None`.
fn duplicate_key_conflict(message: &str) -> Option<ApiError> {
    if message.contains("index: email") {
        Some(ApiError::bad_request(CODE_EMAIL_EXISTS, ERR_EMAIL_EXISTS))
    } else if message.contains("index: username") {
        Some(ApiError::bad_request(CODE_USERNAME_EXISTS, ERR_USERNAME_EXISTS))
    } else {
        None
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
            if write_error.code == DUPLICATE_KEY {
                if let Some(conflict) = duplicate_key_conflict(&write_error.message) {
                    return conflict;
                }
            }
        }
        ApiError::internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Unauthorized {
            code: CODE_INVALID_TOKEN.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CODE_INVALID_CREDENTIALS;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request(CODE_EMAIL_EXISTS, "x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::forbidden("FORBIDDEN", "x").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response =
            ApiError::unauthorized(CODE_INVALID_CREDENTIALS, "nope").error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_validation_body_lists_errors() {
        let body = ApiError::validation(vec!["a".into(), "b".into()]).body();
        assert!(!body.success);
        assert_eq!(body.code, CODE_VALIDATION_FAILED);
        assert_eq!(body.errors.unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_key_maps_to_conflict_code() {
        let email = duplicate_key_conflict(
            "E11000 duplicate key error collection: veranode.users index: email_1 dup key: { email: \"a@b.io\" }",
        )
        .unwrap();
        assert_eq!(email.code(), CODE_EMAIL_EXISTS);
        assert_eq!(email.status_code(), StatusCode::BAD_REQUEST);

        let username = duplicate_key_conflict(
            "E11000 duplicate key error collection: veranode.users index: username_1 dup key: { username: \"alice\" }",
        )
        .unwrap();
        assert_eq!(username.code(), CODE_USERNAME_EXISTS);

        assert!(duplicate_key_conflict(
            "E11000 duplicate key error collection: veranode.users index: api_key_hash_1"
        )
        .is_none());
    }
}
