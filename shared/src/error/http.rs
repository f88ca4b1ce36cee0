//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::TabNotFound
            | Self::CartLineNotFound
            | Self::ProductNotFound
            | Self::OptionNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::TabAlreadyPaid
            | Self::TabAlreadyReady
            | Self::InvalidStatusTransition => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidCredentials | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::TabNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::OptionNotAllowed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
