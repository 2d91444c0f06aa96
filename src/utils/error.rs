use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Duplicate(String),
    InvalidCredentials,
    InvalidToken(String),
    NotFound(String),
    Upload(String),
    Database(String),
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Duplicate(msg) => write!(f, "{}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Upload(msg) => write!(f, "{}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message safe to return to the client. Database and IO details
    /// stay in the server log only.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Io(_) => "Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Duplicate(_)
            | AppError::InvalidCredentials
            | AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.public_message(),
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        // E11000: unique index violation (duplicate email/phone)
        if let mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref we)) =
            *err.kind
        {
            if we.code == 11000 {
                return AppError::Duplicate("User already exists".to_string());
            }
        }
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::Validation("missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Duplicate("dup".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidToken("expired".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("User not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_details_are_not_exposed() {
        let err = AppError::Database("connection refused at 10.0.0.1".into());
        assert_eq!(err.public_message(), "Server Error");

        let err = AppError::Io("permission denied: /uploads".into());
        assert_eq!(err.public_message(), "Server Error");
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = AppError::Duplicate("User already exists".into());
        assert_eq!(err.public_message(), "User already exists");

        assert_eq!(
            AppError::InvalidCredentials.public_message(),
            "Invalid credentials"
        );
    }
}
