//! Error conversions
//!
//! Axum response rendering for [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 problem details; `message` mirrors `detail` for the web client
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "message": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use axum::response::IntoResponse;

    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_status_follows_kind() {
        let response = AppError::new(ErrorKind::Locked, "Account locked").into_response();
        assert_eq!(response.status().as_u16(), 423);

        let response = AppError::internal("Internal server error").into_response();
        assert_eq!(response.status().as_u16(), 500);
    }
}
