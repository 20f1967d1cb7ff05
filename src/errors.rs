use axum::http::StatusCode;
use thiserror::Error;

/// Rejected user input. The snapshot is untouched when one of these is
/// returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("a date is required")]
    MissingDate,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("cannot log push-ups for {0}, it is in the future")]
    FutureDate(String),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),
    #[error("yearly goal must be positive")]
    InvalidGoal,
    #[error("no such month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn tracker_errors_become_bad_requests() {
        let err = AppError::from(TrackerError::NonPositiveAmount(-3));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "amount must be positive, got -3");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
