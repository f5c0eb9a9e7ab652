use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use isg_scrape::ScrapeError;
use serde_json::json;

/// A [`ScrapeError`] on its way to the HTTP caller.
#[derive(Debug)]
pub struct ApiError(pub ScrapeError);

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScrapeError::Transport(_) => StatusCode::BAD_GATEWAY,
            ScrapeError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ScrapeError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            ScrapeError::UnknownParameter(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn kind(&self) -> &'static str {
        match &self.0 {
            ScrapeError::Transport(_) => "transport",
            ScrapeError::Extraction(_) => "extraction",
            ScrapeError::InvalidPayload { .. } => "invalid_payload",
            ScrapeError::UnknownParameter(_) => "unknown_parameter",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        if status.is_server_error() {
            tracing::error!(%status, kind = self.kind(), %message, "api.error");
        } else {
            tracing::warn!(%status, kind = self.kind(), %message, "api.error");
        }
        (
            status,
            Json(json!({ "error": { "kind": self.kind(), "message": message } })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isg_http::HttpError;
    use isg_scrape::ExtractError;

    #[test]
    fn maps_error_taxonomy_to_status() {
        let cases = [
            (
                ScrapeError::Transport(HttpError::Network("refused".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ScrapeError::Extraction(ExtractError::Missing {
                    pattern: "jsvalues",
                    key: "val16".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ScrapeError::InvalidPayload {
                    field: "value",
                    value: "\"".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ScrapeError::UnknownParameter("val99".into()),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
